//! Configuration for the floor detector.
//!
//! Every field has a documented default so hosts can embed the struct in
//! their own settings and override only what they need.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_ANGLE_TOLERANCE, DEFAULT_BOUNDS_SIZE, DEFAULT_MARGIN, DEFAULT_MAX_AGE,
    FLOOR_NORMAL_ANGLE_MAX_DELTA_PROPERTY, FLOOR_PLANE_PROPERTY,
};

/// How published values reach their consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkMode {
    /// Write into a single global property store read by every consumer.
    #[default]
    Broadcast,
    /// Write into each registered target individually.
    Targets,
}

/// Errors raised when a configuration cannot drive the detector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f64,
    },
    /// The detection bounds would collapse or invert the anchor's scale.
    #[error("bounds_size must be positive, got {value}")]
    NonPositiveBounds {
        /// Value that failed validation.
        value: f32,
    },
}

/// Tunables for measurement smoothing and plane publication.
///
/// # Examples
///
/// ```
/// use floor_detect::FloorDetectionConfig;
///
/// let config = FloorDetectionConfig {
///     max_age: 1.0,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorDetectionConfig {
    /// Seconds a measurement stays in the averaging window. Pruning fires on
    /// `age > max_age`, so zero or negative values keep only the latest batch.
    pub max_age: f64,
    /// Offset added to the floor height before deriving the published plane.
    pub margin: f32,
    /// Edge length of the square region the sensor detects planes in.
    pub bounds_size: f32,
    /// Angular tolerance in degrees forwarded to consumers.
    pub angle_tolerance: f32,
    /// Delivery strategy for published values.
    pub sink_mode: SinkMode,
    /// Property receiving the plane vector.
    pub plane_property: String,
    /// Property receiving the angular tolerance.
    pub tolerance_property: String,
}

impl Default for FloorDetectionConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            margin: DEFAULT_MARGIN,
            bounds_size: DEFAULT_BOUNDS_SIZE,
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
            sink_mode: SinkMode::default(),
            plane_property: FLOOR_PLANE_PROPERTY.to_owned(),
            tolerance_property: FLOOR_NORMAL_ANGLE_MAX_DELTA_PROPERTY.to_owned(),
        }
    }
}

impl FloorDetectionConfig {
    /// Checks that every numeric field can drive the detector.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonFinite`] for NaN or infinite fields and
    /// [`ConfigError::NonPositiveBounds`] when `bounds_size <= 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("max_age", self.max_age)?;
        finite("margin", f64::from(self.margin))?;
        finite("bounds_size", f64::from(self.bounds_size))?;
        finite("angle_tolerance", f64::from(self.angle_tolerance))?;
        if self.bounds_size <= 0.0 {
            return Err(ConfigError::NonPositiveBounds {
                value: self.bounds_size,
            });
        }
        Ok(())
    }

    /// Scale applied to a floor anchor so its extent matches the detection
    /// bounds.
    #[must_use]
    pub fn bounds_scale(&self) -> Vec3 {
        Vec3::splat(self.bounds_size)
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}
