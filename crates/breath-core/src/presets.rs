//! Built-in shapes, patterns, sequences and themes, plus the `Catalog` that
//! indexes them by id.

use crate::error::BreathError;
use crate::pattern::{Pattern, PatternKind, Phase, PhaseKind};
use crate::sequence::{Sequence, SequenceStep};
use crate::state::{rgba, BreathingShape, ShapeKind, Theme, ThemeColors, ThemeEffects};
use fnv::FnvHashMap;
use std::sync::Arc;

pub fn builtin_shapes() -> Vec<BreathingShape> {
    vec![
        BreathingShape {
            id: "circle",
            name: "Circle",
            kind: ShapeKind::Circle,
            svg_path: None,
            description: "Classic circular breathing - smooth and continuous",
        },
        BreathingShape {
            id: "triangle",
            name: "Triangle",
            kind: ShapeKind::Triangle,
            svg_path: Some("M100,20 L180,160 L20,160 Z"),
            description: "Sharp focus breathing - three-point concentration",
        },
        BreathingShape {
            id: "square",
            name: "Square",
            kind: ShapeKind::Square,
            svg_path: Some("M40,40 L160,40 L160,160 L40,160 Z"),
            description: "Box breathing visualization - structured and balanced",
        },
        BreathingShape {
            id: "star",
            name: "Star",
            kind: ShapeKind::Star,
            svg_path: Some(
                "M100,20 L112,68 L160,68 L122,100 L135,148 L100,120 L65,148 L78,100 L40,68 L88,68 Z",
            ),
            description: "Energy breathing - radiating vitality",
        },
        BreathingShape {
            id: "heart",
            name: "Heart",
            kind: ShapeKind::Heart,
            svg_path: Some(
                "M100,160 C100,160 60,120 60,90 C60,70 80,50 100,60 C120,50 140,70 140,90 C140,120 100,160 100,160 Z",
            ),
            description: "Loving-kindness breathing - heart-centered meditation",
        },
        BreathingShape {
            id: "lotus",
            name: "Lotus",
            kind: ShapeKind::Lotus,
            svg_path: Some(
                "M100,50 C80,50 70,70 80,90 L90,100 L100,80 L110,100 L120,90 C130,70 120,50 100,50 Z M70,90 C50,90 40,110 50,130 L100,110 L50,130 C40,110 50,90 70,90 Z M130,90 C150,90 160,110 150,130 L100,110 L150,130 C160,110 150,90 130,90 Z",
            ),
            description: "Lotus breathing - spiritual awakening and growth",
        },
    ]
}

fn pattern(
    id: &str,
    name: &str,
    kind: PatternKind,
    description: &str,
    phases: &[(PhaseKind, f32, f32)],
) -> Result<Pattern, BreathError> {
    let phases = phases
        .iter()
        .map(|&(kind, duration, intensity)| Phase::new(kind, duration, intensity))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Pattern::new(id, name, kind, phases)?.with_description(description))
}

pub fn builtin_patterns() -> Result<Vec<Pattern>, BreathError> {
    use PhaseKind::*;
    Ok(vec![
        pattern(
            "zen-simple",
            "Zen",
            PatternKind::Relaxing,
            "Minimal zen practice - just breathe",
            &[(Inhale, 4.0, 0.5), (Exhale, 4.0, 0.2)],
        )?,
        pattern(
            "box-breathing",
            "Box",
            PatternKind::Active,
            "Equal timing pattern for focus and clarity",
            &[
                (Inhale, 4.0, 0.7),
                (Hold, 4.0, 1.0),
                (Exhale, 4.0, 0.3),
                (Pause, 4.0, 0.0),
            ],
        )?,
        pattern(
            "relaxing-478",
            "4-7-8",
            PatternKind::Relaxing,
            "Calming pattern for stress relief and sleep preparation",
            &[(Inhale, 4.0, 0.8), (Hold, 7.0, 1.0), (Exhale, 8.0, 0.4)],
        )?,
        pattern(
            "rest-breath",
            "Rest",
            PatternKind::Relaxing,
            "Short inhale, long exhale and a resting pause",
            &[(Inhale, 3.0, 0.3), (Exhale, 5.0, 0.2), (Pause, 4.0, 0.0)],
        )?,
        pattern(
            "hold-release",
            "Hold & Release",
            PatternKind::Active,
            "Long retention followed by a quick release",
            &[(Inhale, 6.0, 0.9), (Hold, 10.0, 1.0), (Exhale, 4.0, 0.1)],
        )?,
        pattern(
            "normal-breath",
            "Natural",
            PatternKind::Flow,
            "Even, unforced breathing",
            &[(Inhale, 3.0, 0.6), (Exhale, 3.0, 0.3)],
        )?,
        pattern(
            "energizing-321",
            "3-2-1 Energizing",
            PatternKind::Active,
            "Quick energizing pattern for alertness",
            &[(Inhale, 3.0, 0.9), (Hold, 2.0, 1.0), (Exhale, 1.0, 0.2)],
        )?,
        pattern(
            "flow-natural",
            "Natural Flow",
            PatternKind::Flow,
            "Organic breathing rhythm following natural patterns",
            &[(Inhale, 5.0, 0.6), (Pause, 1.0, 0.9), (Exhale, 6.0, 0.3)],
        )?,
    ])
}

/// Built-in sequences; every step refers to a pattern in `patterns`.
pub fn builtin_sequences(patterns: &[Arc<Pattern>]) -> Result<Vec<Sequence>, BreathError> {
    let find = |id: &str| {
        patterns
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| BreathError::UnknownPreset {
                kind: "pattern",
                id: id.to_string(),
            })
    };

    Ok(vec![
        Sequence::new(
            "training-sequence",
            "Training Session",
            "25 box breaths, rest, hold & release, natural breathing, repeat",
            vec![
                SequenceStep::new(find("box-breathing")?, 25, "25 Box Breathing rounds (4-4-4-4)"),
                SequenceStep::new(find("rest-breath")?, 5, "5 Rest breaths"),
                SequenceStep::new(find("hold-release")?, 10, "10 Hold & Release rounds"),
                SequenceStep::new(find("normal-breath")?, 15, "15 Natural breathing rounds"),
            ],
            true,
        )?,
        Sequence::new(
            "relaxation-sequence",
            "Deep Relaxation",
            "4-7-8 breathing with rest periods",
            vec![
                SequenceStep::new(find("relaxing-478")?, 20, "20 rounds of 4-7-8 breathing"),
                SequenceStep::new(find("rest-breath")?, 8, "8 Rest breaths"),
            ],
            true,
        )?,
        Sequence::new(
            "focus-sequence",
            "Focus Training",
            "Box breathing for concentration",
            vec![
                SequenceStep::new(find("box-breathing")?, 50, "50 Box Breathing rounds for focus"),
                SequenceStep::new(find("normal-breath")?, 10, "10 Natural recovery breaths"),
            ],
            true,
        )?,
    ])
}

pub fn builtin_themes() -> Vec<Theme> {
    vec![
        Theme {
            id: "ocean",
            name: "Ocean",
            colors: ThemeColors {
                primary: rgba(74, 144, 226, 0.8),
                secondary: rgba(100, 200, 255, 0.6),
                background: rgba(0, 50, 100, 0.1),
                accent: rgba(150, 220, 255, 1.0),
            },
            effects: ThemeEffects {
                glow: true,
                pulse: true,
                gradient: true,
            },
        },
        Theme {
            id: "forest",
            name: "Forest",
            colors: ThemeColors {
                primary: rgba(76, 175, 80, 0.8),
                secondary: rgba(139, 195, 74, 0.6),
                background: rgba(27, 94, 32, 0.1),
                accent: rgba(200, 230, 201, 1.0),
            },
            effects: ThemeEffects {
                glow: true,
                pulse: false,
                gradient: true,
            },
        },
        Theme {
            id: "sunset",
            name: "Sunset",
            colors: ThemeColors {
                primary: rgba(255, 112, 67, 0.8),
                secondary: rgba(255, 183, 77, 0.6),
                background: rgba(191, 54, 12, 0.1),
                accent: rgba(255, 224, 178, 1.0),
            },
            effects: ThemeEffects {
                glow: true,
                pulse: true,
                gradient: true,
            },
        },
        Theme {
            id: "moonlight",
            name: "Moonlight",
            colors: ThemeColors {
                primary: rgba(187, 134, 252, 0.8),
                secondary: rgba(224, 176, 255, 0.6),
                background: rgba(74, 20, 140, 0.1),
                accent: rgba(243, 229, 245, 1.0),
            },
            effects: ThemeEffects {
                glow: true,
                pulse: true,
                gradient: false,
            },
        },
        Theme::default(),
    ]
}

fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> FnvHashMap<String, usize> {
    ids.enumerate().map(|(i, id)| (id.to_string(), i)).collect()
}

/// Indexed preset tables. Lists are non-empty for the built-in catalog.
#[derive(Clone, Debug)]
pub struct Catalog {
    shapes: Vec<BreathingShape>,
    patterns: Vec<Arc<Pattern>>,
    sequences: Vec<Arc<Sequence>>,
    themes: Vec<Theme>,
    shape_ids: FnvHashMap<String, usize>,
    pattern_ids: FnvHashMap<String, usize>,
    sequence_ids: FnvHashMap<String, usize>,
    theme_ids: FnvHashMap<String, usize>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, BreathError> {
        let patterns: Vec<Arc<Pattern>> = builtin_patterns()?.into_iter().map(Arc::new).collect();
        let sequences = builtin_sequences(&patterns)?
            .into_iter()
            .map(Arc::new)
            .collect();
        Ok(Self::new(builtin_shapes(), patterns, sequences, builtin_themes()))
    }

    pub fn new(
        shapes: Vec<BreathingShape>,
        patterns: Vec<Arc<Pattern>>,
        sequences: Vec<Arc<Sequence>>,
        themes: Vec<Theme>,
    ) -> Self {
        Self {
            shape_ids: index_by_id(shapes.iter().map(|s| s.id)),
            pattern_ids: index_by_id(patterns.iter().map(|p| p.id())),
            sequence_ids: index_by_id(sequences.iter().map(|s| s.id())),
            theme_ids: index_by_id(themes.iter().map(|t| t.id)),
            shapes,
            patterns,
            sequences,
            themes,
        }
    }

    /// Add a pattern (typically a custom one) and return its index.
    /// A pattern with the same id is replaced in place.
    pub fn insert_pattern(&mut self, pattern: Arc<Pattern>) -> usize {
        if let Some(&index) = self.pattern_ids.get(pattern.id()) {
            self.patterns[index] = pattern;
            return index;
        }
        let index = self.patterns.len();
        self.pattern_ids.insert(pattern.id().to_string(), index);
        self.patterns.push(pattern);
        index
    }

    pub fn shapes(&self) -> &[BreathingShape] {
        &self.shapes
    }

    pub fn patterns(&self) -> &[Arc<Pattern>] {
        &self.patterns
    }

    pub fn sequences(&self) -> &[Arc<Sequence>] {
        &self.sequences
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn shape_index(&self, id: &str) -> Option<usize> {
        self.shape_ids.get(id).copied()
    }

    pub fn pattern_index(&self, id: &str) -> Option<usize> {
        self.pattern_ids.get(id).copied()
    }

    pub fn sequence_index(&self, id: &str) -> Option<usize> {
        self.sequence_ids.get(id).copied()
    }

    pub fn theme_index(&self, id: &str) -> Option<usize> {
        self.theme_ids.get(id).copied()
    }

    pub fn pattern(&self, id: &str) -> Result<&Arc<Pattern>, BreathError> {
        self.pattern_index(id)
            .map(|i| &self.patterns[i])
            .ok_or_else(|| BreathError::UnknownPreset {
                kind: "pattern",
                id: id.to_string(),
            })
    }

    pub fn sequence(&self, id: &str) -> Result<&Arc<Sequence>, BreathError> {
        self.sequence_index(id)
            .map(|i| &self.sequences[i])
            .ok_or_else(|| BreathError::UnknownPreset {
                kind: "sequence",
                id: id.to_string(),
            })
    }
}
