use super::*;

#[test]
fn scale_maps_extent_onto_duration() {
    let s = StepScale::new(0.0, 2000.0, 10.0).unwrap();
    assert!((s.step_sec - 0.005).abs() < 1e-12);
    assert!((s.steps_to_secs(1000.0) - 5.0).abs() < 1e-9);
    assert!((s.secs_to_steps(0.5) - 100.0).abs() < 1e-9);
}

#[test]
fn single_step_extent_has_zero_rate() {
    let s = StepScale::new(42.0, 42.0, 10.0).unwrap();
    assert_eq!(s.step_sec, 0.0);
    assert_eq!(s.secs_to_steps(1.0), 0.0);
    assert_eq!(s.sample_step(3, 10), 42.0);
}

#[test]
fn inverted_or_non_finite_extent_is_rejected() {
    assert!(StepScale::new(5.0, 1.0, 10.0).is_err());
    assert!(StepScale::new(f64::NAN, 1.0, 10.0).is_err());
}

#[test]
fn sample_steps_are_evenly_spaced_and_exclude_end() {
    let s = StepScale::new(0.0, 100.0, 1.0).unwrap();
    assert_eq!(s.sample_step(0, 4), 0.0);
    assert_eq!(s.sample_step(1, 4), 25.0);
    assert_eq!(s.sample_step(3, 4), 75.0);
}

#[test]
fn frame_rounding() {
    assert_eq!(secs_to_frames_round(0.5, 60.0), 30);
    assert_eq!(secs_to_frames_round(0.0, 60.0), 0);
    assert_eq!(secs_to_frames_round(10.0, 29.97), 300);
}
