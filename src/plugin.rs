//! Bevy plugin driving the floor detector from the ECS schedule.
//!
//! Sensor refreshes arrive as [`PlanesUpdated`] events and are ingested by an
//! observer, stamped with the elapsed [`Time`]. Every `Update` the plane is
//! republished from the [`FloorAnchor`] entity's world-space
//! [`GlobalTransform`], so the floor plane stays live whether or not any
//! simulation is advancing. Hosts that parent the anchor need
//! [`TransformPlugin`](bevy::transform::TransformPlugin) (part of the default
//! plugins) to propagate it.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, trace};
use thiserror::Error;

use crate::config::{ConfigError, FloorDetectionConfig};
use crate::detector::FloorDetector;
use crate::plane::PlaneAnchor;
use crate::sample::PlaneSample;

/// Marker for the entity whose transform anchors the published plane.
///
/// Newly added anchors are scaled to the configured detection bounds.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct FloorAnchor;

/// A batch of plane samples delivered by the sensor.
#[derive(Event, Debug, Clone, Default)]
pub struct PlanesUpdated {
    /// Samples in delivery order.
    pub samples: Vec<PlaneSample>,
}

impl PlanesUpdated {
    /// Wraps a batch of samples.
    #[must_use]
    pub const fn new(samples: Vec<PlaneSample>) -> Self {
        Self { samples }
    }
}

/// Event raised when the plugin cannot build its detector.
#[derive(Event, Debug, Clone, Error)]
#[error("invalid floor detection config: {cause}")]
pub struct FloorDetectionError {
    /// Validation failure reported by the configuration.
    pub cause: ConfigError,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_floor_detection_error(event: On<FloorDetectionError>) {
    error!("floor detection disabled: {}", event.event());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> and Res<T> by value."
)]
fn ingest_planes_observer(
    event: On<PlanesUpdated>,
    time: Res<Time>,
    mut detector: ResMut<FloorDetector>,
) {
    detector.ingest(time.elapsed_secs_f64(), &event.event().samples);
}

/// Scales newly added anchors to the detection bounds.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn apply_detection_bounds_system(
    detector: Res<FloorDetector>,
    mut anchors: Query<&mut Transform, Added<FloorAnchor>>,
) {
    let scale = detector.config().bounds_scale();
    for mut transform in &mut anchors {
        transform.scale = scale;
    }
}

/// Republishes the floor plane from the anchor's world transform.
///
/// Falls back to an upright anchor at the origin when there is not exactly
/// one [`FloorAnchor`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn publish_floor_plane_system(
    time: Res<Time>,
    mut detector: ResMut<FloorDetector>,
    anchors: Query<&GlobalTransform, With<FloorAnchor>>,
) {
    let anchor = anchors.single().map_or_else(
        |_| {
            trace!("no unique floor anchor; publishing from the origin");
            PlaneAnchor::default()
        },
        |transform| PlaneAnchor {
            position: transform.translation(),
            up: *transform.up(),
        },
    );
    detector.tick(time.elapsed_secs_f64(), &anchor);
}

/// Plugin installing the floor detector and its systems.
///
/// # Examples
///
/// ```ignore
/// use bevy::prelude::*;
/// use floor_detect::plugin::{FloorAnchor, FloorDetectionPlugin};
///
/// let mut app = App::new();
/// app.add_plugins(FloorDetectionPlugin::default());
/// app.world_mut().spawn((FloorAnchor, Transform::default()));
/// app.update();
/// ```
#[derive(Debug, Default)]
pub struct FloorDetectionPlugin {
    /// Configuration for the detector inserted by the plugin.
    pub config: FloorDetectionConfig,
}

impl Plugin for FloorDetectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_floor_detection_error);

        let detector = match FloorDetector::new(self.config.clone()) {
            Ok(detector) => detector,
            Err(cause) => {
                app.world_mut().trigger(FloorDetectionError { cause });
                return;
            }
        };

        app.register_type::<FloorAnchor>();
        app.init_resource::<Time>();
        app.insert_resource(detector);
        app.add_observer(ingest_planes_observer);
        app.add_systems(
            Update,
            (apply_detection_bounds_system, publish_floor_plane_system).chain(),
        );
    }
}
