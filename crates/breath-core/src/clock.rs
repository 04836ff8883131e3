//! Phase clock: walks the phases of the active pattern against a
//! millisecond timeline and emits one `Frame` per tick.

use crate::config::EngineConfig;
use crate::pattern::{Pattern, Phase};
use crate::state::{PhaseIndicator, ShapeVisual, Theme};
use crate::value::BreathingValueCalculator;
use std::sync::Arc;

/// Everything computed for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Smoothed shape size.
    pub value: f32,
    pub phase: Phase,
    pub phase_index: usize,
    /// Progress through `phase` in [0, 1].
    pub progress: f32,
    /// Phase intensity multiplied by the configured global intensity.
    pub intensity: f32,
    pub visual: ShapeVisual,
}

impl Frame {
    pub fn indicator(&self) -> PhaseIndicator {
        PhaseIndicator::new(self.phase.kind(), self.progress)
    }
}

/// Host-side consumer of frames (canvas, GPU quad, terminal line...).
pub trait RenderSink {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()>;
}

impl<F> RenderSink for F
where
    F: FnMut(&Frame) -> anyhow::Result<()>,
{
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self(frame)
    }
}

pub type PhaseObserver = Box<dyn FnMut(&Phase, f32) -> anyhow::Result<()>>;
pub type CycleObserver = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Summary of a tick, returned to the driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub frame: Frame,
    /// The clock moved to the next phase during this tick.
    pub phase_changed: bool,
    /// The phase index wrapped to 0 during this tick.
    pub cycle_completed: bool,
}

/// Position inside the active pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationCursor {
    pub phase_index: usize,
    pub phase_start_ms: f64,
    pub running: bool,
}

pub struct PhaseClock {
    pattern: Arc<Pattern>,
    config: EngineConfig,
    theme: Theme,
    cursor: AnimationCursor,
    calculator: BreathingValueCalculator,
    phase_observer: Option<PhaseObserver>,
    cycle_observer: Option<CycleObserver>,
}

impl PhaseClock {
    pub fn new(pattern: Arc<Pattern>, config: EngineConfig) -> Self {
        Self {
            calculator: BreathingValueCalculator::new(config.extents().base()),
            pattern,
            config,
            theme: Theme::default(),
            cursor: AnimationCursor {
                phase_index: 0,
                phase_start_ms: 0.0,
                running: false,
            },
            phase_observer: None,
            cycle_observer: None,
        }
    }

    pub fn set_phase_observer(
        &mut self,
        observer: impl FnMut(&Phase, f32) -> anyhow::Result<()> + 'static,
    ) {
        self.phase_observer = Some(Box::new(observer));
    }

    pub fn set_cycle_observer(&mut self, observer: impl FnMut() -> anyhow::Result<()> + 'static) {
        self.cycle_observer = Some(Box::new(observer));
    }

    pub fn clear_observers(&mut self) {
        self.phase_observer = None;
        self.cycle_observer = None;
    }

    /// Start at the first phase. No-op when already running.
    pub fn start(&mut self, now_ms: f64) {
        if self.cursor.running {
            return;
        }
        self.cursor = AnimationCursor {
            phase_index: 0,
            phase_start_ms: now_ms,
            running: true,
        };
        log::debug!("clock started on pattern {}", self.pattern.id());
    }

    pub fn stop(&mut self) {
        if self.cursor.running {
            log::debug!("clock stopped");
        }
        self.cursor.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.cursor.running
    }

    pub fn cursor(&self) -> AnimationCursor {
        self.cursor
    }

    pub fn pattern(&self) -> &Arc<Pattern> {
        &self.pattern
    }

    pub fn current_phase(&self) -> &Phase {
        self.pattern.phase(self.cursor.phase_index)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Last value handed to the render sink.
    pub fn value(&self) -> f32 {
        self.calculator.previous_value()
    }

    /// Replace the pattern and restart it from its first phase.
    ///
    /// The smoothing state is kept, so the shape glides to the new target.
    pub fn set_pattern(&mut self, pattern: Arc<Pattern>, now_ms: f64) {
        log::debug!("pattern {} -> {}", self.pattern.id(), pattern.id());
        self.pattern = pattern;
        self.reset_phase(now_ms);
    }

    pub fn reset_phase(&mut self, now_ms: f64) {
        self.cursor.phase_index = 0;
        self.cursor.phase_start_ms = now_ms;
    }

    /// Fraction of the current phase elapsed at `now_ms`; 0 when stopped.
    pub fn current_progress(&self, now_ms: f64) -> f32 {
        if !self.cursor.running {
            return 0.0;
        }
        let elapsed = now_ms - self.cursor.phase_start_ms;
        (elapsed / self.current_phase().duration_ms()).clamp(0.0, 1.0) as f32
    }

    /// Move the phase start so that `current_progress(now_ms) == progress`.
    pub fn restore_progress(&mut self, progress: f32, now_ms: f64) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.cursor.phase_start_ms = now_ms - progress as f64 * self.current_phase().duration_ms();
    }

    /// Advance the animation to `now_ms`. Returns `None` when stopped.
    pub fn tick(&mut self, now_ms: f64, sink: Option<&mut dyn RenderSink>) -> Option<Tick> {
        if !self.cursor.running {
            return None;
        }

        let phase = *self.current_phase();
        let duration_ms = phase.duration_ms();
        let elapsed = now_ms - self.cursor.phase_start_ms;
        let progress = (elapsed / duration_ms).clamp(0.0, 1.0) as f32;
        let intensity = phase.intensity() * self.config.intensity();

        let value = self.calculator.next(
            &phase,
            progress,
            intensity,
            self.config.reduce_motion(),
            self.config.extents(),
        );
        let frame = Frame {
            value,
            phase,
            phase_index: self.cursor.phase_index,
            progress,
            intensity,
            visual: ShapeVisual::compute(
                value,
                phase.kind(),
                progress,
                self.config.scale(),
                self.config.reduce_motion(),
                self.config.shape_position(),
                &self.theme,
            ),
        };

        if let Some(sink) = sink {
            if let Err(err) = sink.render(&frame) {
                log::warn!("render sink failed: {err:#}");
            }
        }
        if let Some(observer) = self.phase_observer.as_mut() {
            if let Err(err) = observer(&phase, progress) {
                log::warn!("phase observer failed: {err:#}");
            }
        }

        let mut phase_changed = false;
        let mut cycle_completed = false;
        if progress >= 1.0 {
            let next = (self.cursor.phase_index + 1) % self.pattern.len();
            let overflow = (elapsed - duration_ms).max(0.0);
            self.cursor.phase_start_ms = now_ms - overflow;
            self.cursor.phase_index = next;
            phase_changed = true;
            log::debug!(
                "{} -> {} ({} phase {next})",
                phase.kind(),
                self.current_phase().kind(),
                self.pattern.id()
            );

            if next == 0 {
                cycle_completed = true;
                if let Some(observer) = self.cycle_observer.as_mut() {
                    if let Err(err) = observer() {
                        log::warn!("cycle observer failed: {err:#}");
                    }
                }
            }
        }

        Some(Tick {
            frame,
            phase_changed,
            cycle_completed,
        })
    }
}
