// Shared tuning constants for the breathing engine and its hosts.

// Breathing extents (normalized shape size)
pub const DEFAULT_BASE_SIZE: f32 = 0.6; // resting size, also the smoothing seed
pub const DEFAULT_INHALE_MAX: f32 = 1.0; // size reached at the top of an inhale
pub const DEFAULT_EXHALE_MIN: f32 = 0.4; // size reached at the bottom of an exhale

pub const BASE_SIZE_MIN: f32 = 0.1;
pub const BASE_SIZE_MAX: f32 = 1.5;
pub const INHALE_MAX_LIMIT: f32 = 2.0; // inhale_max lives in [base, INHALE_MAX_LIMIT]
pub const EXHALE_MIN_LIMIT: f32 = 0.1; // exhale_min lives in [EXHALE_MIN_LIMIT, base]

// User-facing size and intensity controls
pub const DEFAULT_SCALE: f32 = 1.0;
pub const SCALE_MIN: f32 = 0.5;
pub const SCALE_MAX: f32 = 2.0;
pub const SCALE_STEP: f32 = 0.1;

pub const DEFAULT_INTENSITY: f32 = 0.7;
pub const INTENSITY_MIN: f32 = 0.1;
pub const INTENSITY_MAX: f32 = 1.0;
pub const INTENSITY_STEP: f32 = 0.1;

// Velocity-adaptive smoothing: factor = clamp(BASE + |delta| * GAIN, MIN, MAX)
pub const SMOOTHING_BASE_FACTOR: f32 = 0.08;
pub const SMOOTHING_VELOCITY_GAIN: f32 = 0.05;
pub const SMOOTHING_MIN_FACTOR: f32 = 0.02;
pub const SMOOTHING_MAX_FACTOR: f32 = 0.15;

// Reduced motion: keep 30% of the excursion and follow it at a fixed rate
pub const REDUCED_MOTION_AMPLITUDE: f32 = 0.3;
pub const REDUCED_MOTION_FACTOR: f32 = 0.1;

// Shape opacity
pub const OPACITY_BASE: f32 = 0.8;
pub const OPACITY_PAUSE: f32 = 0.4;
pub const OPACITY_PULSE: f32 = 0.2;
pub const OPACITY_PULSE_REDUCED: f32 = 0.05;

// Layout
pub const SHAPE_BASE_RADIUS: f32 = 60.0; // radius in canvas units at value 1.0, scale 1.0
pub const SHAPE_POSITION_LIMIT: f32 = 80.0; // max offset from the canvas center on each axis

// Frame pacing
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 60;
