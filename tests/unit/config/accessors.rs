use super::*;

fn fields() -> FieldAccessors {
    FieldAccessors {
        id_field: "player".to_string(),
        label_field: "name".to_string(),
        step_field: "date".to_string(),
        value_field: "rating".to_string(),
    }
}

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn numeric_steps_pass_through() {
    assert_eq!(parse_step("1500"), Some(1500.0));
    assert_eq!(parse_step(" -2.5 "), Some(-2.5));
}

#[test]
fn dates_become_epoch_millis() {
    assert_eq!(parse_step("1970-01-02"), Some(86_400_000.0));
    assert_eq!(parse_step("2020/01/01"), Some(1_577_836_800_000.0));
    assert_eq!(parse_step("2020-01"), Some(1_577_836_800_000.0));
    assert_eq!(parse_step("1970-01-01 00:00:01"), Some(1_000.0));
    assert_eq!(parse_step("1970-01-01T00:01"), Some(60_000.0));
    assert_eq!(parse_step("1970-01-01T01:00:00+01:00"), Some(0.0));
}

#[test]
fn garbage_steps_are_rejected() {
    assert_eq!(parse_step(""), None);
    assert_eq!(parse_step("yesterday"), None);
    assert_eq!(parse_step("2020-13-45"), None);
}

#[test]
fn field_accessors_read_named_fields() {
    let a = fields();
    let r = row(&[
        ("player", "p1"),
        ("name", "Lee Sedol"),
        ("date", "1970-01-02"),
        ("rating", "3500"),
    ]);
    assert_eq!(a.id(&r, 0), "p1");
    assert_eq!(a.label(&r, 0), "Lee Sedol");
    assert_eq!(a.step(&r, 0).unwrap(), 86_400_000.0);
    assert_eq!(a.value(&r, 0), 3500.0);
}

#[test]
fn missing_or_blank_value_is_nan() {
    let a = fields();
    assert!(a.value(&row(&[("rating", "")]), 0).is_nan());
    assert!(a.value(&row(&[]), 0).is_nan());
    assert!(a.value(&row(&[("rating", "n/a")]), 0).is_nan());
}

#[test]
fn bad_step_is_a_config_error_naming_the_row() {
    let a = fields();
    let err = a.step(&row(&[("date", "soon")]), 7).unwrap_err();
    assert!(matches!(err, RaceError::Config(_)));
    assert!(err.to_string().contains("row 7"));

    let err = a.step(&row(&[]), 3).unwrap_err();
    assert!(matches!(err, RaceError::Config(_)));
}
