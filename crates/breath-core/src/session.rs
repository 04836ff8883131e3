//! `BreathingSession` ties the catalog, phase clock and sequence manager
//! together behind the controls a host binds to keys or buttons.

use crate::clock::{PhaseClock, RenderSink, Tick};
use crate::config::{EngineConfig, Settings};
use crate::constants::{INTENSITY_STEP, SCALE_STEP};
use crate::error::BreathError;
use crate::pattern::Pattern;
use crate::presets::Catalog;
use crate::sequence::{Sequence, SequenceManager, SequenceProgress};
use crate::state::{BreathingShape, Theme};
use glam::Vec2;
use std::sync::Arc;

/// Index one step forward or back in a list of `len`, wrapping.
#[inline]
fn wrap_step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

fn lookup(kind: &str, id: &str, found: Option<usize>) -> usize {
    found.unwrap_or_else(|| {
        log::warn!("unknown {kind} id {id:?}, using the first one");
        0
    })
}

pub struct BreathingSession {
    catalog: Catalog,
    clock: PhaseClock,
    sequences: SequenceManager,
    shape_index: usize,
    pattern_index: usize,
    theme_index: usize,
    sequence_index: usize,
}

impl BreathingSession {
    /// Session over the built-in catalog with default settings.
    pub fn builtin() -> Result<Self, BreathError> {
        Self::new(Catalog::builtin()?, &Settings::default())
    }

    /// Build a session from `settings`. Unknown ids fall back to the first
    /// entry; the catalog must contain at least one pattern.
    pub fn new(catalog: Catalog, settings: &Settings) -> Result<Self, BreathError> {
        let pattern_index = lookup(
            "pattern",
            &settings.pattern_id,
            catalog.pattern_index(&settings.pattern_id),
        );
        let pattern = catalog
            .patterns()
            .get(pattern_index)
            .cloned()
            .ok_or_else(|| BreathError::UnknownPreset {
                kind: "pattern",
                id: settings.pattern_id.clone(),
            })?;

        let mut session = Self {
            clock: PhaseClock::new(pattern, settings.engine_config()),
            sequences: SequenceManager::new(),
            shape_index: 0,
            pattern_index,
            theme_index: 0,
            sequence_index: 0,
            catalog,
        };
        session.select_presets(settings, 0.0);
        Ok(session)
    }

    fn select_presets(&mut self, settings: &Settings, now_ms: f64) {
        let catalog = &self.catalog;
        self.shape_index = lookup("shape", &settings.shape_id, catalog.shape_index(&settings.shape_id));
        self.theme_index = lookup("theme", &settings.theme_id, catalog.theme_index(&settings.theme_id));
        self.sequence_index = lookup(
            "sequence",
            &settings.sequence_id,
            catalog.sequence_index(&settings.sequence_id),
        );
        let theme = self.theme().clone();
        self.clock.set_theme(theme);
        if let Some(sequence) = self.selected_sequence() {
            self.sequences.set_sequence(sequence, &mut self.clock, now_ms);
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut PhaseClock {
        &mut self.clock
    }

    pub fn sequences(&self) -> &SequenceManager {
        &self.sequences
    }

    pub fn sequences_mut(&mut self) -> &mut SequenceManager {
        &mut self.sequences
    }

    pub fn config(&self) -> &EngineConfig {
        self.clock.config()
    }

    pub fn shape(&self) -> Option<&BreathingShape> {
        self.catalog.shapes().get(self.shape_index)
    }

    pub fn pattern(&self) -> &Arc<Pattern> {
        self.clock.pattern()
    }

    pub fn theme(&self) -> &Theme {
        self.catalog.themes().get(self.theme_index).unwrap_or(self.clock.theme())
    }

    pub fn selected_sequence(&self) -> Option<Arc<Sequence>> {
        self.catalog.sequences().get(self.sequence_index).cloned()
    }

    pub fn start(&mut self, now_ms: f64) {
        log::info!("session started with pattern {}", self.pattern().id());
        self.clock.start(now_ms);
    }

    pub fn stop(&mut self) {
        self.clock.stop();
        log::info!("session stopped");
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Tick the clock and feed cycle completions to the sequence manager.
    pub fn tick(&mut self, now_ms: f64, sink: Option<&mut dyn RenderSink>) -> Option<Tick> {
        let tick = self.clock.tick(now_ms, sink)?;
        if tick.cycle_completed {
            let progress = self.sequences.on_cycle_complete(&mut self.clock, now_ms);
            if matches!(
                progress,
                SequenceProgress::Advanced(_) | SequenceProgress::Looped
            ) {
                self.sync_pattern_index();
            }
        }
        Some(tick)
    }

    fn sync_pattern_index(&mut self) {
        if let Some(index) = self.catalog.pattern_index(self.clock.pattern().id()) {
            self.pattern_index = index;
        }
    }

    fn switch_shape(&mut self, forward: bool, now_ms: f64) {
        let progress = self.clock.current_progress(now_ms);
        self.shape_index = wrap_step(self.shape_index, self.catalog.shapes().len(), forward);
        self.clock.restore_progress(progress, now_ms);
        if let Some(shape) = self.shape() {
            log::info!("shape: {}", shape.name);
        }
    }

    /// Switch to the next shape without disturbing the breathing phase.
    pub fn next_shape(&mut self, now_ms: f64) {
        self.switch_shape(true, now_ms);
    }

    pub fn previous_shape(&mut self, now_ms: f64) {
        self.switch_shape(false, now_ms);
    }

    fn install_pattern(&mut self, index: usize, now_ms: f64) {
        let Some(pattern) = self.catalog.patterns().get(index).cloned() else {
            return;
        };
        self.sequences.stop_sequence();
        self.pattern_index = index;
        log::info!("pattern: {} ({})", pattern.name(), pattern.id());
        self.clock.set_pattern(pattern, now_ms);
    }

    /// Manual pattern selection; restarts the pattern and stops any sequence.
    pub fn next_pattern(&mut self, now_ms: f64) {
        let index = wrap_step(self.pattern_index, self.catalog.patterns().len(), true);
        self.install_pattern(index, now_ms);
    }

    pub fn previous_pattern(&mut self, now_ms: f64) {
        let index = wrap_step(self.pattern_index, self.catalog.patterns().len(), false);
        self.install_pattern(index, now_ms);
    }

    pub fn select_pattern(&mut self, id: &str, now_ms: f64) -> Result<(), BreathError> {
        let index = self
            .catalog
            .pattern_index(id)
            .ok_or_else(|| BreathError::UnknownPreset {
                kind: "pattern",
                id: id.to_string(),
            })?;
        self.install_pattern(index, now_ms);
        Ok(())
    }

    /// Add `pattern` to the catalog and make it the active pattern.
    pub fn add_custom_pattern(&mut self, pattern: Pattern, now_ms: f64) {
        let index = self.catalog.insert_pattern(Arc::new(pattern));
        self.install_pattern(index, now_ms);
    }

    /// Start the selected sequence, or stop it if active. Returns whether a
    /// sequence is active afterwards.
    pub fn toggle_sequence(&mut self, now_ms: f64) -> bool {
        if self.sequences.is_active() {
            self.sequences.stop_sequence();
        } else if self.sequences.start_sequence(&mut self.clock, now_ms) {
            self.sync_pattern_index();
        }
        self.sequences.is_active()
    }

    /// Select the next sequence; an active sequence switches over immediately.
    pub fn next_sequence(&mut self, now_ms: f64) {
        self.sequence_index = wrap_step(self.sequence_index, self.catalog.sequences().len(), true);
        if let Some(sequence) = self.selected_sequence() {
            log::info!("sequence: {}", sequence.name());
            self.sequences.set_sequence(sequence, &mut self.clock, now_ms);
            self.sync_pattern_index();
        }
    }

    pub fn select_sequence(&mut self, id: &str, now_ms: f64) -> Result<(), BreathError> {
        let sequence = Arc::clone(self.catalog.sequence(id)?);
        self.sequence_index = self.catalog.sequence_index(id).unwrap_or(self.sequence_index);
        self.sequences.set_sequence(sequence, &mut self.clock, now_ms);
        self.sync_pattern_index();
        Ok(())
    }

    pub fn cycle_theme(&mut self) {
        self.theme_index = wrap_step(self.theme_index, self.catalog.themes().len(), true);
        let theme = self.theme().clone();
        log::info!("theme: {}", theme.name);
        self.clock.set_theme(theme);
    }

    pub fn select_theme(&mut self, id: &str) -> Result<(), BreathError> {
        self.theme_index = self
            .catalog
            .theme_index(id)
            .ok_or_else(|| BreathError::UnknownPreset {
                kind: "theme",
                id: id.to_string(),
            })?;
        let theme = self.theme().clone();
        self.clock.set_theme(theme);
        Ok(())
    }

    pub fn select_shape(&mut self, id: &str) -> Result<(), BreathError> {
        self.shape_index = self
            .catalog
            .shape_index(id)
            .ok_or_else(|| BreathError::UnknownPreset {
                kind: "shape",
                id: id.to_string(),
            })?;
        Ok(())
    }

    pub fn increase_scale(&mut self) {
        self.clock.config_mut().adjust_scale(SCALE_STEP);
    }

    pub fn decrease_scale(&mut self) {
        self.clock.config_mut().adjust_scale(-SCALE_STEP);
    }

    pub fn increase_intensity(&mut self) {
        self.clock.config_mut().adjust_intensity(INTENSITY_STEP);
    }

    pub fn decrease_intensity(&mut self) {
        self.clock.config_mut().adjust_intensity(-INTENSITY_STEP);
    }

    pub fn set_extents(&mut self, base: f32, inhale_max: f32, exhale_min: f32) {
        self.clock.config_mut().set_extents(base, inhale_max, exhale_min);
    }

    pub fn set_reduce_motion(&mut self, enabled: bool) {
        self.clock.config_mut().set_reduce_motion(enabled);
    }

    pub fn move_shape(&mut self, delta: Vec2) {
        self.clock.config_mut().move_shape(delta);
    }

    /// Snapshot of the current selection and configuration.
    pub fn settings(&self) -> Settings {
        let config = self.clock.config();
        Settings {
            shape_id: self.shape().map(|s| s.id.to_string()).unwrap_or_default(),
            pattern_id: self.pattern().id().to_string(),
            theme_id: self.theme().id.to_string(),
            sequence_id: self
                .selected_sequence()
                .map(|s| s.id().to_string())
                .unwrap_or_default(),
            scale: config.scale(),
            intensity: config.intensity(),
            breathing_params: *config.extents(),
            shape_position: config.shape_position().to_array(),
            reduce_motion: config.reduce_motion(),
        }
    }

    /// Apply persisted settings. Any active sequence is stopped and the
    /// selected pattern restarts from its first phase.
    pub fn apply_settings(&mut self, settings: &Settings, now_ms: f64) {
        self.sequences.stop_sequence();
        self.clock.set_config(settings.engine_config());
        self.select_presets(settings, now_ms);
        let index = lookup(
            "pattern",
            &settings.pattern_id,
            self.catalog.pattern_index(&settings.pattern_id),
        );
        self.install_pattern(index, now_ms);
    }

    pub fn reset(&mut self, now_ms: f64) {
        log::info!("session reset to defaults");
        self.apply_settings(&Settings::default(), now_ms);
    }
}
