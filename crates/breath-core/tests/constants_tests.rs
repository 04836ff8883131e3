// Relationships between tuning constants.

use breath_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn defaults_lie_inside_their_ranges() {
    assert!(BASE_SIZE_MIN <= DEFAULT_BASE_SIZE && DEFAULT_BASE_SIZE <= BASE_SIZE_MAX);
    assert!(DEFAULT_BASE_SIZE <= DEFAULT_INHALE_MAX && DEFAULT_INHALE_MAX <= INHALE_MAX_LIMIT);
    assert!(EXHALE_MIN_LIMIT <= DEFAULT_EXHALE_MIN && DEFAULT_EXHALE_MIN <= DEFAULT_BASE_SIZE);
    assert!(SCALE_MIN <= DEFAULT_SCALE && DEFAULT_SCALE <= SCALE_MAX);
    assert!(INTENSITY_MIN <= DEFAULT_INTENSITY && DEFAULT_INTENSITY <= INTENSITY_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_are_fractions() {
    assert!(0.0 < SMOOTHING_MIN_FACTOR && SMOOTHING_MIN_FACTOR < SMOOTHING_MAX_FACTOR);
    assert!(SMOOTHING_MAX_FACTOR < 1.0);
    assert!(SMOOTHING_MIN_FACTOR <= SMOOTHING_BASE_FACTOR);
    assert!(0.0 < REDUCED_MOTION_FACTOR && REDUCED_MOTION_FACTOR < 1.0);
    assert!(0.0 < REDUCED_MOTION_AMPLITUDE && REDUCED_MOTION_AMPLITUDE < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn opacity_never_exceeds_one() {
    assert!(OPACITY_BASE + OPACITY_PULSE <= 1.0 + 1e-6);
    assert!(OPACITY_PAUSE + OPACITY_PULSE <= OPACITY_BASE + 1e-6);
    assert!(OPACITY_PULSE_REDUCED < OPACITY_PULSE);
}

#[test]
fn steps_reach_both_bounds() {
    let scale_steps = ((SCALE_MAX - SCALE_MIN) / SCALE_STEP).round();
    assert!(scale_steps >= 1.0);
    let intensity_steps = ((INTENSITY_MAX - INTENSITY_MIN) / INTENSITY_STEP).round();
    assert!(intensity_steps >= 1.0);
    assert!(DEFAULT_FRAMES_PER_SECOND > 0);
}
