use thiserror::Error;

/// Construction-time failures for patterns, sequences and preset lookups.
///
/// Runtime configuration is clamped rather than rejected, so nothing in here
/// is produced while the clock is ticking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreathError {
    #[error("pattern `{0}` has no phases")]
    EmptyPattern(String),

    #[error("phase duration must be a finite number of seconds > 0, got {0}")]
    InvalidDuration(f32),

    #[error("phase intensity must lie in [0, 1], got {0}")]
    InvalidIntensity(f32),

    #[error("sequence `{0}` has no steps")]
    EmptySequence(String),

    #[error("step {index} of sequence `{sequence}` has zero repetitions")]
    ZeroRepetitions { sequence: String, index: usize },

    #[error("unknown {kind} `{id}`")]
    UnknownPreset { kind: &'static str, id: String },

    #[error("unknown phase name `{0}`")]
    UnknownPhase(String),

    #[error("malformed phase `{0}`, expected name:seconds[:intensity]")]
    MalformedPhase(String),
}
