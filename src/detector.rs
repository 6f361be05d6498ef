//! Facade pairing the floor height estimator with the plane publisher.

use log::warn;

use crate::config::{ConfigError, FloorDetectionConfig};
use crate::estimator::{FloorEstimate, FloorHeightEstimator};
use crate::plane::PlaneAnchor;
use crate::publisher::{PlanePublisher, PublishReport};
use crate::sample::PlaneSample;
use crate::sink::PlaneSink;

/// Owns the estimator, the publisher and the sink they feed.
///
/// Hosts call [`FloorDetector::ingest`] whenever the sensor delivers samples
/// and [`FloorDetector::tick`] once per frame, in any interleaving. Clock
/// readings that go backwards are clamped to the latest value seen so the
/// measurement window stays time-ordered.
///
/// # Examples
///
/// ```
/// use floor_detect::{FloorDetectionConfig, FloorDetector, PlaneAnchor, PlaneSample, SemanticFlags};
///
/// let mut detector = FloorDetector::new(FloorDetectionConfig::default())?;
/// detector.ingest(0.0, &[PlaneSample::new(1.0, SemanticFlags::FLOOR)]);
/// let report = detector.tick(0.016, &PlaneAnchor::default());
/// assert!(report.plane_pushed);
/// # Ok::<(), floor_detect::ConfigError>(())
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "plugin", derive(bevy::prelude::Resource))]
pub struct FloorDetector {
    config: FloorDetectionConfig,
    estimator: FloorHeightEstimator,
    publisher: PlanePublisher,
    sink: PlaneSink,
    clock: Option<f64>,
}

impl FloorDetector {
    /// Builds a detector with an empty sink of the configured mode.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] raised by [`FloorDetectionConfig::validate`].
    pub fn new(config: FloorDetectionConfig) -> Result<Self, ConfigError> {
        let sink = PlaneSink::for_mode(config.sink_mode);
        Self::with_sink(config, sink)
    }

    /// Builds a detector publishing into `sink`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] raised by [`FloorDetectionConfig::validate`].
    pub fn with_sink(config: FloorDetectionConfig, sink: PlaneSink) -> Result<Self, ConfigError> {
        config.validate()?;
        let estimator = FloorHeightEstimator::new(config.max_age);
        let publisher = PlanePublisher::new(
            config.margin,
            config.angle_tolerance,
            config.plane_property.clone(),
            config.tolerance_property.clone(),
        );
        Ok(Self {
            config,
            estimator,
            publisher,
            sink,
            clock: None,
        })
    }

    /// Feeds a batch of sensor samples observed at `now`.
    pub fn ingest(&mut self, now: f64, samples: &[PlaneSample]) {
        let stamp = self.advance_clock(now);
        self.estimator.ingest_batch(stamp, samples);
    }

    /// Publishes the floor plane anchored at `anchor`.
    pub fn tick(&mut self, now: f64, anchor: &PlaneAnchor) -> PublishReport {
        self.advance_clock(now);
        self.publisher
            .tick(anchor, self.estimator.floor_y(), &mut self.sink)
    }

    /// Changes the angular tolerance forwarded to consumers.
    pub const fn set_angle_tolerance(&mut self, degrees: f32) {
        self.config.angle_tolerance = degrees;
        self.publisher.set_angle_tolerance(degrees);
    }

    /// Current floor estimate.
    #[must_use]
    pub const fn estimate(&self) -> FloorEstimate {
        self.estimator.estimate()
    }

    /// Whether a floor has ever been detected.
    #[must_use]
    pub const fn has_floor(&self) -> bool {
        self.estimator.has_floor()
    }

    /// Averaged floor height; check [`FloorDetector::has_floor`] first.
    #[must_use]
    pub const fn floor_y(&self) -> f32 {
        self.estimator.floor_y()
    }

    /// The underlying estimator.
    #[must_use]
    pub const fn estimator(&self) -> &FloorHeightEstimator {
        &self.estimator
    }

    /// The sink receiving published values.
    #[must_use]
    pub const fn sink(&self) -> &PlaneSink {
        &self.sink
    }

    /// Mutable access to the sink, e.g. to register targets.
    pub const fn sink_mut(&mut self) -> &mut PlaneSink {
        &mut self.sink
    }

    /// Configuration the detector was built with, including runtime edits.
    #[must_use]
    pub const fn config(&self) -> &FloorDetectionConfig {
        &self.config
    }

    fn advance_clock(&mut self, now: f64) -> f64 {
        match self.clock {
            Some(latest) if now < latest => {
                warn!("clock moved backwards from {latest} to {now}; holding at {latest}");
                latest
            }
            _ => {
                self.clock = Some(now);
                now
            }
        }
    }
}
