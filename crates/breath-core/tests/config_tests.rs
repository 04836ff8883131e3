// Configuration clamping and the persisted settings layout.

use breath_core::*;
use glam::Vec2;

#[test]
fn scale_and_intensity_are_clamped() {
    let mut c = EngineConfig::default();
    c.set_scale(5.0);
    assert_eq!(c.scale(), SCALE_MAX);
    c.set_scale(f32::NEG_INFINITY);
    assert_eq!(c.scale(), SCALE_MIN);
    c.set_scale(f32::NAN);
    assert_eq!(c.scale(), DEFAULT_SCALE);

    c.set_intensity(0.0);
    assert_eq!(c.intensity(), INTENSITY_MIN);
    c.set_intensity(f32::INFINITY);
    assert_eq!(c.intensity(), INTENSITY_MAX);
    c.set_intensity(f32::NAN);
    assert_eq!(c.intensity(), DEFAULT_INTENSITY);
}

#[test]
fn extents_stay_mutually_consistent() {
    let e = BreathingExtents::new(0.6, 0.3, 0.9);
    assert_eq!(e.base(), 0.6);
    assert_eq!(e.inhale_max(), 0.6);
    assert_eq!(e.exhale_min(), 0.6);

    let e = BreathingExtents::new(3.0, 5.0, -1.0);
    assert_eq!(e.base(), BASE_SIZE_MAX);
    assert_eq!(e.inhale_max(), INHALE_MAX_LIMIT);
    assert_eq!(e.exhale_min(), EXHALE_MIN_LIMIT);

    let e = BreathingExtents::new(f32::NAN, f32::NAN, f32::NAN);
    assert_eq!(e, BreathingExtents::default());

    for i in 0..40 {
        let v = i as f32 * 0.05;
        let e = BreathingExtents::new(v, 2.0 - v, v * 0.5);
        assert!(
            e.exhale_min() <= e.base() && e.base() <= e.inhale_max(),
            "inconsistent extents {e:?}"
        );
    }
}

#[test]
fn extent_builders_reclamp() {
    let e = BreathingExtents::default().with_base(1.2);
    assert_eq!(e.base(), 1.2);
    assert_eq!(e.inhale_max(), 1.2);
    assert_eq!(e.exhale_min(), DEFAULT_EXHALE_MIN);
    let e = e.with_exhale_min(1.4).with_inhale_max(1.8);
    assert_eq!(e.exhale_min(), 1.2);
    assert_eq!(e.inhale_max(), 1.8);
}

#[test]
fn shape_position_is_clamped_per_axis() {
    let mut c = EngineConfig::default();
    c.set_shape_position(Vec2::new(120.0, -30.0));
    assert_eq!(c.shape_position(), Vec2::new(SHAPE_POSITION_LIMIT, -30.0));
    c.move_shape(Vec2::new(-500.0, f32::NAN));
    assert_eq!(c.shape_position(), Vec2::new(-SHAPE_POSITION_LIMIT, 0.0));
}

#[test]
fn settings_use_camel_case_keys() {
    let json = serde_json::to_value(Settings::default()).unwrap();
    assert_eq!(json["shapeId"], "circle");
    assert_eq!(json["patternId"], "zen-simple");
    assert_eq!(json["themeId"], "ocean");
    assert_eq!(json["sequenceId"], "training-sequence");
    assert_eq!(json["reduceMotion"], false);
    assert!(json["breathingParams"]["baseSize"].is_number());
    assert!(json["breathingParams"]["inhaleMax"].is_number());
    assert!(json["breathingParams"]["exhaleMin"].is_number());
}

#[test]
fn settings_round_trip_and_fill_missing_fields() {
    let mut s = Settings::default();
    s.pattern_id = "box-breathing".into();
    s.scale = 1.3;
    s.shape_position = [12.0, -4.0];
    let text = serde_json::to_string(&s).unwrap();
    let back: Settings = serde_json::from_str(&text).unwrap();
    assert_eq!(back, s);

    let partial: Settings = serde_json::from_str(r#"{"themeId":"forest"}"#).unwrap();
    assert_eq!(partial.theme_id, "forest");
    assert_eq!(partial.pattern_id, "zen-simple");
    assert_eq!(partial.breathing_params, BreathingExtents::default());
}

#[test]
fn engine_config_from_settings_clamps_stored_values() {
    let s = Settings {
        scale: 9.0,
        intensity: -1.0,
        shape_position: [500.0, 0.0],
        ..Settings::default()
    };
    let c = s.engine_config();
    assert_eq!(c.scale(), SCALE_MAX);
    assert_eq!(c.intensity(), INTENSITY_MIN);
    assert_eq!(c.shape_position().x, SHAPE_POSITION_LIMIT);
}
