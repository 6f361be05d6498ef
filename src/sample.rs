//! Plane samples delivered by the external plane-detection service.
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Semantic classification bits attached to a detected plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticFlags(pub u32);

impl SemanticFlags {
    /// No classification.
    pub const NONE: Self = Self(0);
    /// Plane classified as a ceiling.
    pub const CEILING: Self = Self(1 << 0);
    /// Plane classified as a floor.
    pub const FLOOR: Self = Self(1 << 1);
    /// Plane classified as a wall.
    pub const WALL: Self = Self(1 << 2);

    /// Returns `true` when every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// Returns the union of both flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for SemanticFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// A labelled height measurement from the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneSample {
    /// Height of the plane's centre along the world up axis.
    pub height: f32,
    /// Classification flags reported by the sensor.
    pub flags: SemanticFlags,
}

impl PlaneSample {
    /// Creates a sample from a height and its flags.
    #[must_use]
    pub const fn new(height: f32, flags: SemanticFlags) -> Self {
        Self { height, flags }
    }

    /// Creates a sample from a detected plane's centre, taking its `y`.
    #[must_use]
    pub const fn from_center(center: Vec3, flags: SemanticFlags) -> Self {
        Self::new(center.y, flags)
    }

    /// Whether the sensor tagged this plane as floor.
    #[must_use]
    pub const fn is_floor(&self) -> bool {
        self.flags.contains(SemanticFlags::FLOOR)
    }
}
