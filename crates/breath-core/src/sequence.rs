//! Sequences chain patterns with repetition counts. The `SequenceManager`
//! advances on cycle completion and installs each step's pattern into the
//! phase clock.

use crate::clock::PhaseClock;
use crate::error::BreathError;
use crate::pattern::Pattern;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub struct SequenceStep {
    pub pattern: Arc<Pattern>,
    pub repetitions: u32,
    pub description: String,
}

impl SequenceStep {
    pub fn new(pattern: Arc<Pattern>, repetitions: u32, description: impl Into<String>) -> Self {
        Self {
            pattern,
            repetitions,
            description: description.into(),
        }
    }
}

/// An ordered, non-empty list of steps; every step repeats at least once.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    id: String,
    name: String,
    description: String,
    steps: Vec<SequenceStep>,
    looping: bool,
}

impl Sequence {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<SequenceStep>,
        looping: bool,
    ) -> Result<Self, BreathError> {
        let id = id.into();
        if steps.is_empty() {
            return Err(BreathError::EmptySequence(id));
        }
        if let Some(index) = steps.iter().position(|s| s.repetitions == 0) {
            return Err(BreathError::ZeroRepetitions {
                sequence: id,
                index,
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            description: description.into(),
            steps,
            looping,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Cycles needed to go through every step once.
    pub fn total_cycles(&self) -> u32 {
        self.steps.iter().map(|s| s.repetitions).sum()
    }
}

pub type PatternObserver = Box<dyn FnMut(&Pattern, &str) -> anyhow::Result<()>>;

/// What a cycle completion did to the sequence cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceProgress {
    /// No sequence is active.
    Idle,
    /// Still on the same step; carries the new repetition count.
    Repeated(u32),
    /// Moved to the step with this index.
    Advanced(usize),
    /// Wrapped from the last step back to the first.
    Looped,
    /// Ran past the last step of a non-looping sequence and went inactive.
    Finished,
}

#[derive(Default)]
pub struct SequenceManager {
    sequence: Option<Arc<Sequence>>,
    step_index: usize,
    repetition: u32,
    active: bool,
    pattern_observer: Option<PatternObserver>,
}

impl SequenceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pattern_observer(
        &mut self,
        observer: impl FnMut(&Pattern, &str) -> anyhow::Result<()> + 'static,
    ) {
        self.pattern_observer = Some(Box::new(observer));
    }

    /// Install `sequence` with a fresh cursor. If a sequence was running, the
    /// new one starts right away.
    pub fn set_sequence(&mut self, sequence: Arc<Sequence>, clock: &mut PhaseClock, now_ms: f64) {
        let was_active = self.active;
        self.sequence = Some(sequence);
        self.step_index = 0;
        self.repetition = 0;
        self.active = false;
        if was_active {
            self.start_sequence(clock, now_ms);
        }
    }

    /// Begin at step 0. Returns false when no sequence is set.
    pub fn start_sequence(&mut self, clock: &mut PhaseClock, now_ms: f64) -> bool {
        let Some(sequence) = self.sequence.clone() else {
            return false;
        };
        self.active = true;
        self.step_index = 0;
        self.repetition = 0;
        log::info!("sequence {} started", sequence.id());
        self.install_step(clock, now_ms);
        true
    }

    /// Go inactive; the clock keeps running the last installed pattern.
    pub fn stop_sequence(&mut self) {
        if self.active {
            if let Some(sequence) = &self.sequence {
                log::info!("sequence {} stopped", sequence.id());
            }
        }
        self.active = false;
    }

    pub fn on_cycle_complete(&mut self, clock: &mut PhaseClock, now_ms: f64) -> SequenceProgress {
        if !self.active {
            return SequenceProgress::Idle;
        }
        let Some(step) = self.current_step() else {
            return SequenceProgress::Idle;
        };
        let repetitions = step.repetitions;
        self.repetition += 1;
        if self.repetition >= repetitions {
            self.advance_to_next_step(clock, now_ms)
        } else {
            SequenceProgress::Repeated(self.repetition)
        }
    }

    /// Move to the next step of the active sequence. Does nothing while
    /// inactive.
    pub fn advance_to_next_step(&mut self, clock: &mut PhaseClock, now_ms: f64) -> SequenceProgress {
        if !self.active {
            return SequenceProgress::Idle;
        }
        let Some(sequence) = self.sequence.clone() else {
            return SequenceProgress::Idle;
        };
        self.step_index += 1;
        self.repetition = 0;

        let progress = if self.step_index >= sequence.steps().len() {
            if !sequence.is_looping() {
                self.step_index = sequence.steps().len() - 1;
                self.active = false;
                log::info!("sequence {} finished", sequence.id());
                return SequenceProgress::Finished;
            }
            self.step_index = 0;
            log::info!("sequence {} looped", sequence.id());
            SequenceProgress::Looped
        } else {
            SequenceProgress::Advanced(self.step_index)
        };

        self.install_step(clock, now_ms);
        progress
    }

    fn install_step(&mut self, clock: &mut PhaseClock, now_ms: f64) {
        let Some(step) = self.current_step() else {
            return;
        };
        let pattern = Arc::clone(&step.pattern);
        let info = self.step_info();
        log::info!("{info}");
        clock.set_pattern(Arc::clone(&pattern), now_ms);
        if let Some(observer) = self.pattern_observer.as_mut() {
            if let Err(err) = observer(&pattern, &info) {
                log::warn!("pattern observer failed: {err:#}");
            }
        }
    }

    fn current_step(&self) -> Option<&SequenceStep> {
        self.sequence
            .as_ref()
            .and_then(|s| s.steps().get(self.step_index))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn sequence(&self) -> Option<&Arc<Sequence>> {
        self.sequence.as_ref()
    }

    pub fn current_pattern(&self) -> Option<&Arc<Pattern>> {
        self.current_step().map(|s| &s.pattern)
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn repetition(&self) -> u32 {
        self.repetition
    }

    /// `"Step 2/4: 5 Rest breaths (3/5)"`, or an empty string without a sequence.
    pub fn step_info(&self) -> String {
        match (&self.sequence, self.current_step()) {
            (Some(sequence), Some(step)) => format!(
                "Step {}/{}: {} ({}/{})",
                self.step_index + 1,
                sequence.steps().len(),
                step.description,
                self.repetition,
                step.repetitions
            ),
            _ => String::new(),
        }
    }

    pub fn sequence_info(&self) -> String {
        match &self.sequence {
            None => "No sequence".to_string(),
            Some(sequence) if !self.active => format!("{} (stopped)", sequence.name()),
            Some(_) => self.step_info(),
        }
    }
}
