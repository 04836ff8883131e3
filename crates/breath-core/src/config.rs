//! Engine configuration and the persisted settings layout.
//!
//! Every setter clamps its input into the documented interval; NaN falls back
//! to the field's default so a bad value from storage or a slider never
//! reaches the renderer.

use crate::constants::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[inline]
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// The three sizes the animated value oscillates between.
///
/// Invariant: `exhale_min <= base <= inhale_max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreathingExtents {
    #[serde(rename = "baseSize")]
    base: f32,
    inhale_max: f32,
    exhale_min: f32,
}

impl Default for BreathingExtents {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_SIZE,
            inhale_max: DEFAULT_INHALE_MAX,
            exhale_min: DEFAULT_EXHALE_MIN,
        }
    }
}

impl BreathingExtents {
    /// Clamp all three values into mutually consistent ranges.
    ///
    /// `base` is clamped first; `inhale_max` and `exhale_min` are then
    /// clamped against it.
    pub fn new(base: f32, inhale_max: f32, exhale_min: f32) -> Self {
        let base = clamp_or(base, BASE_SIZE_MIN, BASE_SIZE_MAX, DEFAULT_BASE_SIZE);
        let inhale_max = clamp_or(
            inhale_max,
            base,
            INHALE_MAX_LIMIT,
            DEFAULT_INHALE_MAX.max(base),
        );
        let exhale_min = clamp_or(
            exhale_min,
            EXHALE_MIN_LIMIT,
            base,
            DEFAULT_EXHALE_MIN.min(base),
        );
        Self {
            base,
            inhale_max,
            exhale_min,
        }
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    pub fn inhale_max(&self) -> f32 {
        self.inhale_max
    }

    pub fn exhale_min(&self) -> f32 {
        self.exhale_min
    }

    pub fn with_base(self, base: f32) -> Self {
        Self::new(base, self.inhale_max, self.exhale_min)
    }

    pub fn with_inhale_max(self, inhale_max: f32) -> Self {
        Self::new(self.base, inhale_max, self.exhale_min)
    }

    pub fn with_exhale_min(self, exhale_min: f32) -> Self {
        Self::new(self.base, self.inhale_max, exhale_min)
    }
}

/// Runtime configuration handed to the phase clock.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    scale: f32,
    intensity: f32,
    extents: BreathingExtents,
    reduce_motion: bool,
    shape_position: Vec2,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            intensity: DEFAULT_INTENSITY,
            extents: BreathingExtents::default(),
            reduce_motion: false,
            shape_position: Vec2::ZERO,
        }
    }
}

impl EngineConfig {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn extents(&self) -> &BreathingExtents {
        &self.extents
    }

    pub fn reduce_motion(&self) -> bool {
        self.reduce_motion
    }

    pub fn shape_position(&self) -> Vec2 {
        self.shape_position
    }

    /// Set the size multiplier, clamped to [`SCALE_MIN`, `SCALE_MAX`].
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = clamp_or(scale, SCALE_MIN, SCALE_MAX, DEFAULT_SCALE);
    }

    pub fn adjust_scale(&mut self, delta: f32) {
        self.set_scale(self.scale + delta);
    }

    /// Set the global intensity, clamped to [`INTENSITY_MIN`, `INTENSITY_MAX`].
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = clamp_or(intensity, INTENSITY_MIN, INTENSITY_MAX, DEFAULT_INTENSITY);
    }

    pub fn adjust_intensity(&mut self, delta: f32) {
        self.set_intensity(self.intensity + delta);
    }

    pub fn set_extents(&mut self, base: f32, inhale_max: f32, exhale_min: f32) {
        self.extents = BreathingExtents::new(base, inhale_max, exhale_min);
    }

    pub fn set_reduce_motion(&mut self, enabled: bool) {
        self.reduce_motion = enabled;
    }

    /// Place the shape relative to the canvas center, clamped per axis.
    pub fn set_shape_position(&mut self, position: Vec2) {
        let limit = SHAPE_POSITION_LIMIT;
        self.shape_position = Vec2::new(
            clamp_or(position.x, -limit, limit, 0.0),
            clamp_or(position.y, -limit, limit, 0.0),
        );
    }

    pub fn move_shape(&mut self, delta: Vec2) {
        self.set_shape_position(self.shape_position + delta);
    }
}

/// Persisted user settings; the host decides where and how they are stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub shape_id: String,
    pub pattern_id: String,
    pub theme_id: String,
    pub sequence_id: String,
    pub scale: f32,
    pub intensity: f32,
    pub breathing_params: BreathingExtents,
    pub shape_position: [f32; 2],
    pub reduce_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shape_id: "circle".to_string(),
            pattern_id: "zen-simple".to_string(),
            theme_id: "ocean".to_string(),
            sequence_id: "training-sequence".to_string(),
            scale: DEFAULT_SCALE,
            intensity: DEFAULT_INTENSITY,
            breathing_params: BreathingExtents::default(),
            shape_position: [0.0, 0.0],
            reduce_motion: false,
        }
    }
}

impl Settings {
    /// Build a clamped engine configuration from these settings.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.set_scale(self.scale);
        config.set_intensity(self.intensity);
        let p = &self.breathing_params;
        config.set_extents(p.base, p.inhale_max, p.exhale_min);
        config.set_reduce_motion(self.reduce_motion);
        config.set_shape_position(Vec2::from(self.shape_position));
        config
    }
}
