//! Utility helpers for tests.
//!
//! Builders for plane samples and a target that records every write it
//! receives, so tests can assert on push counts as well as final values.

use std::sync::{Arc, Mutex, PoisonError};

use floor_detect::{PlaneSample, PropertyTarget, SemanticFlags};
use glam::Vec4;

/// A floor-tagged sample at `height`.
pub fn floor_sample(height: f32) -> PlaneSample {
    PlaneSample::new(height, SemanticFlags::FLOOR)
}

/// A wall-tagged sample at `height`.
pub fn wall_sample(height: f32) -> PlaneSample {
    PlaneSample::new(height, SemanticFlags::WALL)
}

/// A single write observed by a [`RecordingTarget`].
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    /// A vector property write.
    Vector(String, Vec4),
    /// A scalar property write.
    Float(String, f32),
}

/// Target appending every write to a shared log.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    log: Arc<Mutex<Vec<Write>>>,
}

impl RecordingTarget {
    /// Snapshot of the writes received so far.
    pub fn writes(&self) -> Vec<Write> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Vector writes made to `name`, in order.
    pub fn vectors(&self, name: &str) -> Vec<Vec4> {
        self.writes()
            .into_iter()
            .filter_map(|write| match write {
                Write::Vector(property, value) if property == name => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Scalar writes made to `name`, in order.
    pub fn floats(&self, name: &str) -> Vec<f32> {
        self.writes()
            .into_iter()
            .filter_map(|write| match write {
                Write::Float(property, value) if property == name => Some(value),
                _ => None,
            })
            .collect()
    }

    fn record(&self, write: Write) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(write);
    }
}

impl PropertyTarget for RecordingTarget {
    fn set_vector(&mut self, name: &str, value: Vec4) {
        self.record(Write::Vector(name.to_owned(), value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(Write::Float(name.to_owned(), value));
    }
}

/// Assert that `actual` matches `expected` component-wise within `epsilon`.
///
/// # Panics
/// Panics with both vectors when any component differs by more than
/// `epsilon`.
pub fn assert_vec4_near(actual: Vec4, expected: Vec4, epsilon: f32) {
    assert!(
        (actual - expected).abs().max_element() <= epsilon,
        "expected {expected:?}, got {actual:?}"
    );
}
