//! Breathing phases and patterns.
//!
//! A `Pattern` is an ordered, cyclic list of `Phase`s. Both are validated on
//! construction and immutable afterwards; the clock and the sequence manager
//! share patterns through `Arc<Pattern>`.

use crate::error::BreathError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Which part of the breath a phase guides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Inhale,
    Hold,
    Exhale,
    Pause,
}

impl PhaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseKind::Inhale => "inhale",
            PhaseKind::Hold => "hold",
            PhaseKind::Exhale => "exhale",
            PhaseKind::Pause => "pause",
        }
    }

    /// Capitalized label for phase indicators ("Inhale", "Hold", ...).
    pub fn label(self) -> &'static str {
        match self {
            PhaseKind::Inhale => "Inhale",
            PhaseKind::Hold => "Hold",
            PhaseKind::Exhale => "Exhale",
            PhaseKind::Pause => "Pause",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseKind {
    type Err = BreathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inhale" => Ok(PhaseKind::Inhale),
            "hold" => Ok(PhaseKind::Hold),
            "exhale" => Ok(PhaseKind::Exhale),
            "pause" | "rest" => Ok(PhaseKind::Pause),
            other => Err(BreathError::UnknownPhase(other.to_string())),
        }
    }
}

/// One timed segment of a breathing cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    kind: PhaseKind,
    duration_sec: f32,
    intensity: f32,
}

impl Phase {
    /// Build a phase, rejecting non-positive durations and intensities outside [0, 1].
    pub fn new(kind: PhaseKind, duration_sec: f32, intensity: f32) -> Result<Self, BreathError> {
        if !duration_sec.is_finite() || duration_sec <= 0.0 {
            return Err(BreathError::InvalidDuration(duration_sec));
        }
        if !(0.0..=1.0).contains(&intensity) {
            return Err(BreathError::InvalidIntensity(intensity));
        }
        Ok(Self {
            kind,
            duration_sec,
            intensity,
        })
    }

    pub fn kind(&self) -> PhaseKind {
        self.kind
    }

    pub fn duration_sec(&self) -> f32 {
        self.duration_sec
    }

    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.duration_sec as f64 * 1000.0
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

/// Coarse grouping used by pickers and status displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Relaxing,
    Active,
    Flow,
    Custom,
}

/// An ordered, cyclic list of phases defining one breathing technique.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    id: String,
    name: String,
    kind: PatternKind,
    description: String,
    phases: SmallVec<[Phase; 4]>,
    total_duration_sec: f32,
}

impl Pattern {
    /// Build a pattern; fails when `phases` is empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: PatternKind,
        phases: impl IntoIterator<Item = Phase>,
    ) -> Result<Self, BreathError> {
        let id = id.into();
        let phases: SmallVec<[Phase; 4]> = phases.into_iter().collect();
        if phases.is_empty() {
            return Err(BreathError::EmptyPattern(id));
        }
        let total_duration_sec = phases.iter().map(Phase::duration_sec).sum();
        Ok(Self {
            id,
            name: name.into(),
            kind,
            description: String::new(),
            phases,
            total_duration_sec,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build a `custom` pattern from a compact description such as
    /// `"inhale:4:0.8,hold:2,exhale:6"`.
    pub fn custom(id: impl Into<String>, text: &str) -> Result<Self, BreathError> {
        let id = id.into();
        let phases = parse_phases(text)?;
        Pattern::new(id.clone(), id, PatternKind::Custom, phases)
            .map(|p| p.with_description(format!("Custom pattern ({text})")))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phase at `index`, falling back to the first phase when out of range.
    #[inline]
    pub fn phase(&self, index: usize) -> &Phase {
        self.phases.get(index).unwrap_or(&self.phases[0])
    }

    /// Sum of all phase durations in seconds.
    pub fn total_duration_sec(&self) -> f32 {
        self.total_duration_sec
    }

    /// Full cycles per minute at this pattern's pace.
    pub fn breaths_per_minute(&self) -> f32 {
        60.0 / self.total_duration_sec
    }
}

/// Parse `name:seconds[:intensity]` entries separated by commas.
///
/// Intensity defaults to 1.0 when omitted.
pub fn parse_phases(text: &str) -> Result<Vec<Phase>, BreathError> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.split(':');
            let kind: PhaseKind = parts.next().unwrap_or_default().parse()?;
            let duration = parts
                .next()
                .and_then(|s| s.trim().parse::<f32>().ok())
                .ok_or_else(|| BreathError::MalformedPhase(entry.to_string()))?;
            let intensity = match parts.next() {
                Some(s) => s
                    .trim()
                    .parse::<f32>()
                    .map_err(|_| BreathError::MalformedPhase(entry.to_string()))?,
                None => 1.0,
            };
            if parts.next().is_some() {
                return Err(BreathError::MalformedPhase(entry.to_string()));
            }
            Phase::new(kind, duration, intensity)
        })
        .collect()
}
