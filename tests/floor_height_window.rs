//! Windowed averaging of floor height samples.

use approx::assert_relative_eq;
use floor_detect::{FloorHeightEstimator, PlaneSample, SemanticFlags};
use rstest::rstest;
use test_utils::{floor_sample, wall_sample};

fn assert_window_fresh(estimator: &FloorHeightEstimator, now: f64) {
    for measurement in estimator.window().iter() {
        assert!(
            measurement.age(now) <= estimator.max_age(),
            "measurement at {} is older than {}s at {now}",
            measurement.timestamp,
            estimator.max_age()
        );
    }
}

#[rstest]
#[case(vec![0.0, 0.1, 0.2, 0.3])]
#[case(vec![0.0, 1.0, 2.5, 2.5, 4.0, 9.0])]
#[case(vec![0.0, 1.99, 2.0, 2.01, 4.02])]
fn retained_measurements_never_exceed_max_age(#[case] stamps: Vec<f64>) {
    let mut estimator = FloorHeightEstimator::new(2.0);
    for (index, now) in stamps.iter().copied().enumerate() {
        #[expect(clippy::cast_precision_loss, reason = "Small test indices.")]
        estimator.ingest(now, &floor_sample(index as f32));
        assert_window_fresh(&estimator, now);
    }
}

#[rstest]
#[case(vec![1.0], 1.0)]
#[case(vec![1.0, 2.0, 3.0, 4.0], 2.5)]
#[case(vec![-0.25, 0.25], 0.0)]
#[case(vec![1.1, 1.3, 0.9, 1.05, 0.95], 1.06)]
fn estimate_is_mean_of_window(#[case] heights: Vec<f32>, #[case] expected: f32) {
    let mut estimator = FloorHeightEstimator::new(2.0);
    let samples: Vec<PlaneSample> = heights.into_iter().map(floor_sample).collect();
    estimator.ingest_batch(0.5, &samples);
    assert_relative_eq!(estimator.floor_y(), expected, epsilon = 1e-6);
}

#[test]
fn window_scenario_from_three_samples_then_late_sample() {
    let mut estimator = FloorHeightEstimator::new(2.0);
    estimator.ingest(0.0, &floor_sample(1.0));
    estimator.ingest(0.5, &floor_sample(1.2));
    estimator.ingest(1.0, &floor_sample(0.8));
    assert_relative_eq!(estimator.floor_y(), 1.0, epsilon = 1e-6);

    estimator.ingest(3.0, &floor_sample(3.0));
    let retained: Vec<f64> = estimator.window().iter().map(|m| m.timestamp).collect();
    assert_eq!(retained, vec![1.0, 3.0]);
    assert_relative_eq!(estimator.floor_y(), 1.9, epsilon = 1e-6);
}

#[test]
fn detection_is_sticky_after_window_drains() {
    let mut estimator = FloorHeightEstimator::new(2.0);
    estimator.ingest(0.0, &floor_sample(1.5));
    estimator.ingest(100.0, &wall_sample(7.0));
    assert!(estimator.has_floor());
    assert_eq!(estimator.floor_height(), Some(1.5));
}

#[test]
fn mixed_flag_samples_count_as_floor() {
    let mut estimator = FloorHeightEstimator::new(2.0);
    estimator.ingest(
        0.0,
        &PlaneSample::new(0.4, SemanticFlags::FLOOR | SemanticFlags::WALL),
    );
    assert!(estimator.has_floor());
    assert_relative_eq!(estimator.floor_y(), 0.4);
}
