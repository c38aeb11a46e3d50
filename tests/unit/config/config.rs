use super::*;

#[test]
fn defaults_are_valid() {
    let c = RaceConfig::default();
    c.validate().unwrap();
    assert_eq!(c.top_n, 20);
    assert_eq!(c.label_field, "id");
}

#[test]
fn json_accepts_camel_case_and_ignores_renderer_keys() {
    let c = RaceConfig::from_json_str(
        r#"{
            "idField": "player_name",
            "stepField": "date",
            "valueField": "rating",
            "topN": 12,
            "maxRetentionTimeSec": 18,
            "totalDurationSec": 180,
            "canvasWidth": 1920,
            "barInfoStyle": "reverse"
        }"#,
    )
    .unwrap();
    assert_eq!(c.id_field, "player_name");
    assert_eq!(c.top_n, 12);
    assert_eq!(c.max_retention_time_sec, 18.0);
    assert_eq!(c.fps, 60.0);
    assert_eq!(c.label_field, "id");
}

#[test]
fn json_accepts_snake_case() {
    let c = RaceConfig::from_json_str(r#"{ "top_n": 3, "swap_duration_sec": 1.0 }"#).unwrap();
    assert_eq!(c.top_n, 3);
    assert_eq!(c.swap_duration_sec, 1.0);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = RaceConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, RaceError::Serde(_)));
}

#[test]
fn missing_file_is_an_io_error_naming_the_path() {
    let err = RaceConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
    assert!(matches!(err, RaceError::Other(_)));
}

#[test]
fn validate_rejects_bad_numbers() {
    let bad = [
        RaceConfig {
            top_n: 0,
            ..RaceConfig::default()
        },
        RaceConfig {
            fps: 0.0,
            ..RaceConfig::default()
        },
        RaceConfig {
            total_duration_sec: f64::NAN,
            ..RaceConfig::default()
        },
        RaceConfig {
            swap_duration_sec: -1.0,
            ..RaceConfig::default()
        },
        RaceConfig {
            decay_rate: 1.5,
            ..RaceConfig::default()
        },
    ];
    for c in bad {
        assert!(matches!(c.validate(), Err(RaceError::Validation(_))), "{c:?}");
    }
}

#[test]
fn transition_is_clamped_to_half_retention() {
    let mut c = RaceConfig {
        max_retention_time_sec: 1.0,
        transition_duration_sec: 0.8,
        ..RaceConfig::default()
    };
    let warning = c.clamp_transition();
    assert!(warning.is_some());
    assert_eq!(c.transition_duration_sec, 0.5);
    assert!(c.clamp_transition().is_none());
}

#[test]
fn field_accessors_follow_config() {
    let c = RaceConfig {
        id_field: "who".to_string(),
        ..RaceConfig::default()
    };
    let a = c.field_accessors();
    assert_eq!(a.id_field, "who");
    assert_eq!(a.step_field, "step");
}
