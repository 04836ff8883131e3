//! Per-frame breathing value.
//!
//! The value is the normalized shape size. Each phase kind defines a target
//! (eased during inhale/exhale, constant during hold/pause) and the emitted
//! value chases that target with a velocity-adaptive lerp, which keeps the
//! shape continuous across phase and pattern switches.

use crate::config::BreathingExtents;
use crate::constants::*;
use crate::pattern::{Phase, PhaseKind};

/// Cubic ease-in-out on `t` in [0, 1].
#[inline]
pub fn cubic_ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor
}

/// Unsmoothed target size for `kind` at `progress` through the phase.
pub fn target_value(kind: PhaseKind, progress: f32, extents: &BreathingExtents) -> f32 {
    let base = extents.base();
    let high = extents.inhale_max();
    let low = extents.exhale_min();
    match kind {
        PhaseKind::Inhale => base + cubic_ease_in_out(progress) * (high - base),
        PhaseKind::Hold => high,
        PhaseKind::Exhale => high - cubic_ease_in_out(progress) * (high - low),
        PhaseKind::Pause => low,
    }
}

/// Lerp factor for normal motion: larger target jumps are followed faster,
/// within [`SMOOTHING_MIN_FACTOR`, `SMOOTHING_MAX_FACTOR`].
#[inline]
pub fn adaptive_factor(target: f32, previous: f32) -> f32 {
    (SMOOTHING_BASE_FACTOR + (target - previous).abs() * SMOOTHING_VELOCITY_GAIN)
        .clamp(SMOOTHING_MIN_FACTOR, SMOOTHING_MAX_FACTOR)
}

/// Stateful calculator; `previous_value` is its only state.
#[derive(Clone, Debug)]
pub struct BreathingValueCalculator {
    previous_value: f32,
}

impl Default for BreathingValueCalculator {
    fn default() -> Self {
        Self {
            previous_value: DEFAULT_BASE_SIZE,
        }
    }
}

impl BreathingValueCalculator {
    pub fn new(initial_value: f32) -> Self {
        Self {
            previous_value: initial_value,
        }
    }

    /// Last emitted value.
    pub fn previous_value(&self) -> f32 {
        self.previous_value
    }

    /// Compute the next smoothed value and remember it.
    ///
    /// `intensity` is accepted for parity with the render frame but the size
    /// target is defined by `extents` alone. Both motion modes store the
    /// emitted value, so toggling reduced motion mid-run does not jump.
    pub fn next(
        &mut self,
        phase: &Phase,
        progress: f32,
        _intensity: f32,
        reduce_motion: bool,
        extents: &BreathingExtents,
    ) -> f32 {
        let progress = progress.clamp(0.0, 1.0);
        let target = target_value(phase.kind(), progress, extents);
        let previous = self.previous_value;

        let value = if reduce_motion {
            let base = extents.base();
            let damped = base + (target - base) * REDUCED_MOTION_AMPLITUDE;
            lerp(previous, damped, REDUCED_MOTION_FACTOR)
        } else {
            lerp(previous, target, adaptive_factor(target, previous))
        };

        self.previous_value = value;
        value
    }
}
