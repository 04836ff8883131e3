//! Visual-side state types shared with hosts.
//!
//! These types avoid referencing any platform API. A host maps a
//! `ShapeVisual` onto whatever it draws with (canvas, GPU quad, terminal).

use crate::constants::*;
use crate::pattern::PhaseKind;
use glam::{Vec2, Vec4};

/// Outline drawn for the breathing shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
    Star,
    Heart,
    Lotus,
}

/// A selectable shape preset.
#[derive(Clone, Debug, PartialEq)]
pub struct BreathingShape {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ShapeKind,
    /// SVG path in a 200x200 view box; `None` for shapes drawn analytically.
    pub svg_path: Option<&'static str>,
    pub description: &'static str,
}

/// Theme palette as straight-alpha RGBA in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeColors {
    pub primary: Vec4,
    pub secondary: Vec4,
    pub background: Vec4,
    pub accent: Vec4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ThemeEffects {
    pub glow: bool,
    pub pulse: bool,
    pub gradient: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: ThemeColors,
    pub effects: ThemeEffects,
}

impl Theme {
    /// Stroke color for a phase: inhale and pause use primary, hold accent,
    /// exhale secondary.
    pub fn phase_color(&self, kind: PhaseKind) -> Vec4 {
        match kind {
            PhaseKind::Inhale | PhaseKind::Pause => self.colors.primary,
            PhaseKind::Hold => self.colors.accent,
            PhaseKind::Exhale => self.colors.secondary,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            id: "minimal",
            name: "Minimal",
            colors: ThemeColors {
                primary: rgba(255, 255, 255, 0.8),
                secondary: rgba(200, 200, 200, 0.6),
                background: rgba(0, 0, 0, 0.1),
                accent: rgba(255, 255, 255, 1.0),
            },
            effects: ThemeEffects::default(),
        }
    }
}

/// CSS-style `rgba(r, g, b, a)` with 8-bit channels.
#[inline]
pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Vec4 {
    Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
}

/// Everything a renderer needs to draw one frame of the shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeVisual {
    /// `config.scale * value`
    pub scale: f32,
    /// Outline radius in canvas units.
    pub radius: f32,
    pub opacity: f32,
    pub color: Vec4,
    /// Offset from the canvas center.
    pub position: Vec2,
}

impl ShapeVisual {
    pub fn compute(
        value: f32,
        kind: PhaseKind,
        progress: f32,
        scale: f32,
        reduce_motion: bool,
        position: Vec2,
        theme: &Theme,
    ) -> Self {
        let scale = scale * value;
        Self {
            scale,
            radius: SHAPE_BASE_RADIUS * scale,
            opacity: phase_opacity(kind, progress, reduce_motion),
            color: theme.phase_color(kind),
            position,
        }
    }
}

/// Opacity with a half-sine pulse over the phase; pause is dimmer and
/// reduced motion keeps the pulse small.
pub fn phase_opacity(kind: PhaseKind, progress: f32, reduce_motion: bool) -> f32 {
    let base = if kind == PhaseKind::Pause {
        OPACITY_PAUSE
    } else {
        OPACITY_BASE
    };
    let pulse = if reduce_motion {
        OPACITY_PULSE_REDUCED
    } else {
        OPACITY_PULSE
    };
    base + (progress * std::f32::consts::PI).sin() * pulse
}

/// Progress-bar state for the phase label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseIndicator {
    pub label: &'static str,
    /// Bar fill in [0, 1]: fills on inhale, stays full on hold, drains on
    /// exhale, stays empty on pause.
    pub fill: f32,
}

impl PhaseIndicator {
    pub fn new(kind: PhaseKind, progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let fill = match kind {
            PhaseKind::Inhale => progress,
            PhaseKind::Hold => 1.0,
            PhaseKind::Exhale => 1.0 - progress,
            PhaseKind::Pause => 0.0,
        };
        Self {
            label: kind.label(),
            fill,
        }
    }
}
