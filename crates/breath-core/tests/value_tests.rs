// Breathing value calculator: easing, targets and smoothing.

use breath_core::*;

fn phase(kind: PhaseKind) -> Phase {
    Phase::new(kind, 4.0, 0.5).unwrap()
}

#[test]
fn cubic_ease_hits_endpoints_and_midpoint() {
    assert!(cubic_ease_in_out(0.0).abs() < 1e-6);
    assert!((cubic_ease_in_out(0.5) - 0.5).abs() < 1e-6);
    assert!((cubic_ease_in_out(1.0) - 1.0).abs() < 1e-6);
}

#[test]
fn cubic_ease_is_monotonic() {
    let mut prev = cubic_ease_in_out(0.0);
    for i in 1..=100 {
        let t = i as f32 / 100.0;
        let v = cubic_ease_in_out(t);
        assert!(v >= prev, "ease decreased at t={t}");
        prev = v;
    }
}

#[test]
fn targets_follow_phase_kind() {
    let e = BreathingExtents::default();
    let close = |a: f32, b: f32| (a - b).abs() < 1e-6;
    assert!(close(target_value(PhaseKind::Inhale, 0.0, &e), e.base()));
    assert!(close(target_value(PhaseKind::Inhale, 1.0, &e), e.inhale_max()));
    assert!(close(target_value(PhaseKind::Hold, 0.3, &e), e.inhale_max()));
    assert!(close(target_value(PhaseKind::Exhale, 0.0, &e), e.inhale_max()));
    assert!(close(target_value(PhaseKind::Exhale, 1.0, &e), e.exhale_min()));
    assert!(close(target_value(PhaseKind::Pause, 0.7, &e), e.exhale_min()));
}

#[test]
fn adaptive_factor_is_bounded() {
    assert!((adaptive_factor(0.6, 0.6) - SMOOTHING_BASE_FACTOR).abs() < 1e-6);
    assert!((adaptive_factor(100.0, 0.0) - SMOOTHING_MAX_FACTOR).abs() < 1e-6);
    for i in 0..50 {
        let f = adaptive_factor(i as f32 * 0.05, 0.0);
        assert!(
            (SMOOTHING_MIN_FACTOR..=SMOOTHING_MAX_FACTOR).contains(&f),
            "factor {f} out of range"
        );
    }
}

#[test]
fn first_value_equals_base_at_inhale_start() {
    let mut calc = BreathingValueCalculator::default();
    let e = BreathingExtents::default();
    let v = calc.next(&phase(PhaseKind::Inhale), 0.0, 0.5, false, &e);
    assert!((v - e.base()).abs() < 1e-6);
}

#[test]
fn value_converges_to_hold_target() {
    let mut calc = BreathingValueCalculator::default();
    let e = BreathingExtents::default();
    let hold = phase(PhaseKind::Hold);
    let mut v = 0.0;
    for _ in 0..300 {
        v = calc.next(&hold, 0.5, 1.0, false, &e);
    }
    assert!((v - e.inhale_max()).abs() < 1e-3, "did not converge: {v}");
    assert_eq!(calc.previous_value(), v);
}

#[test]
fn reduced_motion_damps_the_excursion() {
    let mut calc = BreathingValueCalculator::default();
    let e = BreathingExtents::default();
    let hold = phase(PhaseKind::Hold);
    let mut v = 0.0;
    for _ in 0..500 {
        v = calc.next(&hold, 0.5, 1.0, true, &e);
    }
    let expected = e.base() + (e.inhale_max() - e.base()) * REDUCED_MOTION_AMPLITUDE;
    assert!((v - expected).abs() < 1e-3, "reduced value {v} != {expected}");
}

#[test]
fn values_stay_within_extents_and_move_smoothly() {
    let mut calc = BreathingValueCalculator::default();
    let e = BreathingExtents::default();
    let kinds = [
        PhaseKind::Inhale,
        PhaseKind::Hold,
        PhaseKind::Exhale,
        PhaseKind::Pause,
    ];
    let mut prev = calc.previous_value();
    for cycle in 0..4 {
        for kind in kinds {
            let p = phase(kind);
            for step in 0..=60 {
                let reduce = cycle % 2 == 1;
                let v = calc.next(&p, step as f32 / 60.0, 1.0, reduce, &e);
                assert!(
                    v >= e.exhale_min() - 1e-6 && v <= e.inhale_max() + 1e-6,
                    "value {v} escaped extents"
                );
                assert!((v - prev).abs() < 0.1, "jump from {prev} to {v} on {kind}");
                prev = v;
            }
        }
    }
}

#[test]
fn toggling_reduced_motion_does_not_jump() {
    let mut calc = BreathingValueCalculator::default();
    let e = BreathingExtents::default();
    let hold = phase(PhaseKind::Hold);
    for _ in 0..100 {
        calc.next(&hold, 0.5, 1.0, true, &e);
    }
    let before = calc.previous_value();
    let after = calc.next(&hold, 0.5, 1.0, false, &e);
    assert!((after - before).abs() <= SMOOTHING_MAX_FACTOR * (e.inhale_max() - before) + 1e-6);
}

#[test]
fn progress_outside_unit_range_is_clamped() {
    let e = BreathingExtents::default();
    let inhale = phase(PhaseKind::Inhale);
    let mut a = BreathingValueCalculator::default();
    let mut b = BreathingValueCalculator::default();
    assert_eq!(
        a.next(&inhale, 7.0, 1.0, false, &e),
        b.next(&inhale, 1.0, 1.0, false, &e)
    );
}

#[test]
fn reduced_motion_moves_less_than_normal_motion() {
    let e = BreathingExtents::default();
    let cases = [
        (PhaseKind::Inhale, 0.75),
        (PhaseKind::Hold, 0.5),
        (PhaseKind::Exhale, 0.5),
        (PhaseKind::Pause, 0.5),
    ];
    for (kind, progress) in cases {
        let p = phase(kind);
        let mut reduced = BreathingValueCalculator::default();
        let mut normal = BreathingValueCalculator::default();
        let start = reduced.previous_value();
        let reduced_step = (reduced.next(&p, progress, 1.0, true, &e) - start).abs();
        let normal_step = (normal.next(&p, progress, 1.0, false, &e) - start).abs();
        assert!(normal_step > 0.0, "{kind} did not move");
        assert!(
            reduced_step < normal_step,
            "{kind}: reduced step {reduced_step} >= normal step {normal_step}"
        );
    }
}
