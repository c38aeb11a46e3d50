use super::*;

#[test]
fn scalars_are_stringified_and_nulls_dropped() {
    let rows = rows_from_json_str(
        r#"[{"id": "go", "step": 2001, "value": 12.5, "hot": true, "note": null}]"#,
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["id"], "go");
    assert_eq!(row["step"], "2001");
    assert_eq!(row["value"], "12.5");
    assert_eq!(row["hot"], "true");
    assert!(!row.contains_key("note"));
}

#[test]
fn non_array_input_is_rejected() {
    let err = rows_from_json_str(r#"{"id": "go"}"#).unwrap_err();
    assert!(matches!(err, RaceError::Serde(_)));
}

#[test]
fn nested_field_is_rejected_with_row_index() {
    let err = rows_from_json_str(r#"[{"id": "a"}, {"id": ["b"]}]"#).unwrap_err();
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn missing_file_is_an_io_error_naming_the_path() {
    let err = rows_from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
    assert!(matches!(err, RaceError::Other(_)));
}
