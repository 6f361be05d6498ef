//! Destinations for published floor properties.
//!
//! A [`PlaneSink`] either broadcasts into one global [`PropertyBlock`] that
//! any number of consumers read, or writes into an explicit list of
//! [`PropertyTarget`]s. Absent or dead targets are skipped without failing
//! the rest of the push.

use std::sync::{Arc, Mutex, Weak};

use glam::Vec4;
use hashbrown::HashMap;
use log::{trace, warn};

use crate::config::SinkMode;

/// Something holding named shader-style properties.
pub trait PropertyTarget {
    /// Whether the target can still receive writes.
    fn is_live(&self) -> bool {
        true
    }

    /// Stores a four-component vector under `name`.
    fn set_vector(&mut self, name: &str, value: Vec4);

    /// Stores a scalar under `name`.
    fn set_float(&mut self, name: &str, value: f32);
}

/// Boxed target stored in a [`PlaneSink::Targets`] list.
pub type BoxedTarget = Box<dyn PropertyTarget + Send + Sync>;

/// Named property storage, used both as the global broadcast store and as a
/// per-material block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBlock {
    vectors: HashMap<String, Vec4>,
    floats: HashMap<String, f32>,
    writes: u64,
}

impl PropertyBlock {
    /// Reads the vector stored under `name`.
    #[must_use]
    pub fn vector(&self, name: &str) -> Option<Vec4> {
        self.vectors.get(name).copied()
    }

    /// Reads the scalar stored under `name`.
    #[must_use]
    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Total number of writes received.
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.writes
    }
}

impl PropertyTarget for PropertyBlock {
    fn set_vector(&mut self, name: &str, value: Vec4) {
        self.writes += 1;
        self.vectors.insert(name.to_owned(), value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.writes += 1;
        self.floats.insert(name.to_owned(), value);
    }
}

impl<T: PropertyTarget> PropertyTarget for Arc<Mutex<T>> {
    fn is_live(&self) -> bool {
        self.lock().is_ok_and(|target| target.is_live())
    }

    fn set_vector(&mut self, name: &str, value: Vec4) {
        if let Ok(mut target) = self.lock() {
            target.set_vector(name, value);
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        if let Ok(mut target) = self.lock() {
            target.set_float(name, value);
        }
    }
}

impl<T: PropertyTarget> PropertyTarget for Weak<Mutex<T>> {
    fn is_live(&self) -> bool {
        self.upgrade().is_some_and(|target| target.is_live())
    }

    fn set_vector(&mut self, name: &str, value: Vec4) {
        if let Some(mut target) = self.upgrade() {
            target.set_vector(name, value);
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        if let Some(mut target) = self.upgrade() {
            target.set_float(name, value);
        }
    }
}

/// Where the publisher writes plane and tolerance values.
pub enum PlaneSink {
    /// A single global store shared by every consumer.
    Broadcast(PropertyBlock),
    /// Explicit targets. `None` slots are unassigned and skipped.
    Targets(Vec<Option<BoxedTarget>>),
}

impl std::fmt::Debug for PlaneSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Broadcast(block) => f.debug_tuple("Broadcast").field(block).finish(),
            Self::Targets(targets) => f
                .debug_struct("Targets")
                .field("slots", &targets.len())
                .finish(),
        }
    }
}

impl Default for PlaneSink {
    fn default() -> Self {
        Self::for_mode(SinkMode::default())
    }
}

impl PlaneSink {
    /// Creates an empty sink of the requested kind.
    #[must_use]
    pub fn for_mode(mode: SinkMode) -> Self {
        match mode {
            SinkMode::Broadcast => Self::Broadcast(PropertyBlock::default()),
            SinkMode::Targets => Self::Targets(Vec::new()),
        }
    }

    /// Adds a target slot. Returns `false` for broadcast sinks, which have no
    /// target list.
    pub fn register_slot(&mut self, slot: Option<BoxedTarget>) -> bool {
        match self {
            Self::Broadcast(_) => {
                warn!("ignoring target registration on a broadcast sink");
                false
            }
            Self::Targets(targets) => {
                targets.push(slot);
                true
            }
        }
    }

    /// Adds a live target. See [`PlaneSink::register_slot`].
    pub fn register<T>(&mut self, target: T) -> bool
    where
        T: PropertyTarget + Send + Sync + 'static,
    {
        self.register_slot(Some(Box::new(target)))
    }

    /// The global store, when broadcasting.
    #[must_use]
    pub const fn global(&self) -> Option<&PropertyBlock> {
        match self {
            Self::Broadcast(block) => Some(block),
            Self::Targets(_) => None,
        }
    }

    /// Writes `value` to every live target. Returns how many received it.
    pub fn push_vector(&mut self, name: &str, value: Vec4) -> usize {
        self.deliver(|target| target.set_vector(name, value))
    }

    /// Writes `value` to every live target. Returns how many received it.
    pub fn push_float(&mut self, name: &str, value: f32) -> usize {
        self.deliver(|target| target.set_float(name, value))
    }

    fn deliver(&mut self, mut write: impl FnMut(&mut dyn PropertyTarget)) -> usize {
        match self {
            Self::Broadcast(block) => {
                write(block);
                1
            }
            Self::Targets(targets) => {
                let mut delivered = 0;
                for (index, slot) in targets.iter_mut().enumerate() {
                    match slot {
                        Some(target) if target.is_live() => {
                            write(target.as_mut());
                            delivered += 1;
                        }
                        _ => trace!("skipping absent or dead target in slot {index}"),
                    }
                }
                delivered
            }
        }
    }
}
