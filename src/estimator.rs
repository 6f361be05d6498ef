//! Sliding time-window average of floor height samples.
//!
//! The estimator keeps every floor measurement younger than `max_age` and
//! reports their arithmetic mean. Detection is sticky: once a floor sample
//! has been seen, [`FloorHeightEstimator::has_floor`] stays `true` even if
//! the window later drains.

use std::collections::VecDeque;

use log::{info, trace};

use crate::sample::PlaneSample;

/// A single floor height reading and the clock value it was taken at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Measured height.
    pub value: f32,
    /// Clock reading in seconds at ingest time.
    pub timestamp: f64,
}

impl Measurement {
    /// Age of the measurement relative to `now`.
    #[must_use]
    pub fn age(&self, now: f64) -> f64 {
        now - self.timestamp
    }
}

/// Time-ordered measurements with a running sum for O(1) averaging.
///
/// Callers append with non-decreasing timestamps; the window never reorders.
#[derive(Debug, Clone, Default)]
pub struct MeasurementWindow {
    entries: VecDeque<Measurement>,
    sum: f64,
}

impl MeasurementWindow {
    /// Appends a measurement at the tail.
    pub fn push(&mut self, measurement: Measurement) {
        self.sum += f64::from(measurement.value);
        self.entries.push_back(measurement);
    }

    /// Drops measurements from the head while they are older than `max_age`.
    ///
    /// Returns the number of measurements removed.
    pub fn prune(&mut self, now: f64, max_age: f64) -> usize {
        let mut removed = 0;
        while let Some(head) = self.entries.front() {
            if head.age(now) <= max_age {
                break;
            }
            self.sum -= f64::from(head.value);
            self.entries.pop_front();
            removed += 1;
        }
        if self.entries.is_empty() {
            // Resets rounding drift left by repeated subtraction.
            self.sum = 0.0;
        }
        removed
    }

    /// Mean of the retained values, or `None` when empty.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "Heights originate as f32 and window sizes stay far below 2^52."
    )]
    pub fn mean(&self) -> Option<f32> {
        if self.entries.is_empty() {
            return None;
        }
        Some((self.sum / self.entries.len() as f64) as f32)
    }

    /// Number of retained measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window holds no measurements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates retained measurements from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.entries.iter()
    }
}

/// Snapshot of the estimator's output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloorEstimate {
    /// Whether any floor sample has ever been ingested.
    pub has_floor: bool,
    /// Averaged floor height. Meaningless while `has_floor` is `false`.
    pub floor_y: f32,
}

/// Maintains the measurement window and the running floor estimate.
///
/// # Examples
///
/// ```
/// use floor_detect::{FloorHeightEstimator, PlaneSample, SemanticFlags};
///
/// let mut estimator = FloorHeightEstimator::new(2.0);
/// estimator.ingest(0.0, &PlaneSample::new(1.0, SemanticFlags::FLOOR));
/// estimator.ingest(0.5, &PlaneSample::new(1.2, SemanticFlags::FLOOR));
/// assert!(estimator.has_floor());
/// assert!((estimator.floor_y() - 1.1).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct FloorHeightEstimator {
    max_age: f64,
    window: MeasurementWindow,
    estimate: FloorEstimate,
}

impl FloorHeightEstimator {
    /// Creates an estimator averaging over `max_age` seconds.
    #[must_use]
    pub fn new(max_age: f64) -> Self {
        Self {
            max_age,
            window: MeasurementWindow::default(),
            estimate: FloorEstimate::default(),
        }
    }

    /// Feeds one sample taken at `now`. Non-floor samples are ignored.
    pub fn ingest(&mut self, now: f64, sample: &PlaneSample) {
        if !sample.is_floor() {
            trace!("ignoring non-floor sample with flags {:#x}", sample.flags.0);
            return;
        }

        if !self.estimate.has_floor {
            info!("floor detected at height {}", sample.height);
        }
        self.estimate.has_floor = true;

        let pruned = self.window.prune(now, self.max_age);
        if pruned > 0 {
            trace!("pruned {pruned} floor measurements older than {}s", self.max_age);
        }
        self.window.push(Measurement {
            value: sample.height,
            timestamp: now,
        });

        // The window holds at least the measurement just pushed.
        if let Some(mean) = self.window.mean() {
            self.estimate.floor_y = mean;
        }
    }

    /// Feeds a batch of samples, all stamped with the same `now`.
    pub fn ingest_batch(&mut self, now: f64, samples: &[PlaneSample]) {
        for sample in samples {
            self.ingest(now, sample);
        }
    }

    /// Whether a floor has ever been detected.
    #[must_use]
    pub const fn has_floor(&self) -> bool {
        self.estimate.has_floor
    }

    /// Averaged floor height; `0.0` until a floor has been detected.
    #[must_use]
    pub const fn floor_y(&self) -> f32 {
        self.estimate.floor_y
    }

    /// Averaged floor height, or `None` before the first floor sample.
    #[must_use]
    pub const fn floor_height(&self) -> Option<f32> {
        if self.estimate.has_floor {
            Some(self.estimate.floor_y)
        } else {
            None
        }
    }

    /// Current estimate snapshot.
    #[must_use]
    pub const fn estimate(&self) -> FloorEstimate {
        self.estimate
    }

    /// Retained measurements.
    #[must_use]
    pub const fn window(&self) -> &MeasurementWindow {
        &self.window
    }

    /// Averaging window length in seconds.
    #[must_use]
    pub const fn max_age(&self) -> f64 {
        self.max_age
    }
}
