//! Change-gated publication of the floor plane to property targets.

use floor_detect::{
    FloorDetectionConfig, FloorDetector, PlaneAnchor, PlaneSink, PropertyTarget, SinkMode,
    FLOOR_NORMAL_ANGLE_MAX_DELTA_PROPERTY, FLOOR_PLANE_PROPERTY,
};
use glam::{Vec3, Vec4};
use mockall::{mock, predicate::eq};
use test_utils::{assert_vec4_near, floor_sample, RecordingTarget};

mock! {
    pub Material {}
    impl PropertyTarget for Material {
        fn is_live(&self) -> bool;
        fn set_vector(&mut self, name: &str, value: Vec4);
        fn set_float(&mut self, name: &str, value: f32);
    }
}

fn targets_detector() -> FloorDetector {
    let config = FloorDetectionConfig {
        sink_mode: SinkMode::Targets,
        ..Default::default()
    };
    FloorDetector::new(config).expect("config is valid")
}

#[test]
fn upright_anchor_publishes_floor_plus_margin() {
    let recorder = RecordingTarget::default();
    let mut detector = targets_detector();
    detector.sink_mut().register(recorder.clone());
    detector.ingest(0.0, &[floor_sample(1.0)]);
    detector.tick(0.0, &PlaneAnchor::default());

    let planes = recorder.vectors(FLOOR_PLANE_PROPERTY);
    assert_eq!(planes.len(), 1);
    assert_vec4_near(planes[0], Vec4::new(0.0, 1.0, 0.0, 1.05), 1e-6);
}

#[test]
fn repeated_ticks_push_plane_once_until_floor_changes() {
    let recorder = RecordingTarget::default();
    let mut detector = targets_detector();
    detector.sink_mut().register(recorder.clone());
    detector.ingest(0.0, &[floor_sample(1.0)]);
    detector.tick(0.0, &PlaneAnchor::default());
    detector.tick(0.1, &PlaneAnchor::default());
    detector.tick(0.2, &PlaneAnchor::default());
    assert_eq!(recorder.vectors(FLOOR_PLANE_PROPERTY).len(), 1);

    detector.ingest(0.3, &[floor_sample(2.0)]);
    detector.tick(0.3, &PlaneAnchor::default());
    let planes = recorder.vectors(FLOOR_PLANE_PROPERTY);
    assert_eq!(planes.len(), 2);
    assert_vec4_near(planes[1], Vec4::new(0.0, 1.0, 0.0, 1.55), 1e-6);
    assert_eq!(recorder.floats(FLOOR_NORMAL_ANGLE_MAX_DELTA_PROPERTY), vec![20.0]);
}

#[test]
fn translating_upright_anchor_does_not_republish() {
    let recorder = RecordingTarget::default();
    let mut detector = targets_detector();
    detector.sink_mut().register(recorder.clone());
    detector.tick(
        0.0,
        &PlaneAnchor {
            position: Vec3::new(0.0, 3.0, 0.0),
            up: Vec3::Y,
        },
    );
    detector.tick(
        0.1,
        &PlaneAnchor {
            position: Vec3::new(5.0, -2.0, 1.0),
            up: Vec3::Y,
        },
    );
    assert_eq!(recorder.vectors(FLOOR_PLANE_PROPERTY).len(), 1);
}

#[test]
fn rotating_anchor_republishes_with_new_normal() {
    let recorder = RecordingTarget::default();
    let mut detector = targets_detector();
    detector.sink_mut().register(recorder.clone());
    detector.tick(0.0, &PlaneAnchor::default());
    detector.tick(
        0.1,
        &PlaneAnchor {
            position: Vec3::ZERO,
            up: Vec3::Z,
        },
    );
    let planes = recorder.vectors(FLOOR_PLANE_PROPERTY);
    assert_eq!(planes.len(), 2);
    assert_vec4_near(planes[1], Vec4::new(0.0, 0.0, 1.0, 0.0), 1e-6);
}

#[test]
fn dead_targets_are_skipped_without_blocking_live_ones() {
    let mut dead = MockMaterial::new();
    dead.expect_is_live().return_const(false);
    dead.expect_set_vector().never();
    dead.expect_set_float().never();

    let mut live = MockMaterial::new();
    live.expect_is_live().return_const(true);
    live.expect_set_vector()
        .with(eq(FLOOR_PLANE_PROPERTY), eq(Vec4::new(0.0, 1.0, 0.0, 0.05)))
        .times(1)
        .return_const(());
    live.expect_set_float()
        .with(eq(FLOOR_NORMAL_ANGLE_MAX_DELTA_PROPERTY), eq(20.0_f32))
        .times(1)
        .return_const(());

    let mut detector = targets_detector();
    assert!(detector.sink_mut().register(dead));
    assert!(detector.sink_mut().register_slot(None));
    assert!(detector.sink_mut().register(live));
    detector.tick(0.0, &PlaneAnchor::default());
    detector.tick(0.1, &PlaneAnchor::default());
}

#[test]
fn broadcast_sink_is_readable_by_consumers() {
    let mut detector =
        FloorDetector::with_sink(FloorDetectionConfig::default(), PlaneSink::default())
            .expect("default config is valid");
    detector.ingest(0.0, &[floor_sample(0.25)]);
    detector.tick(0.0, &PlaneAnchor::default());
    let global = detector.sink().global().expect("broadcast sink");
    let plane = global
        .vector(FLOOR_PLANE_PROPERTY)
        .expect("plane published");
    assert_vec4_near(plane, Vec4::new(0.0, 1.0, 0.0, 0.3), 1e-6);
}
