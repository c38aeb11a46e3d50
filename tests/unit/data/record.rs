use super::*;

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn parse_number_accepts_trimmed_finite_values() {
    assert_eq!(parse_number(" 12.5 "), Some(12.5));
    assert_eq!(parse_number("1e3"), Some(1000.0));
    assert_eq!(parse_number("-3"), Some(-3.0));
}

#[test]
fn parse_number_rejects_empty_and_non_finite() {
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("   "), None);
    assert_eq!(parse_number("NaN"), None);
    assert_eq!(parse_number("inf"), None);
    assert_eq!(parse_number("abc"), None);
}

#[test]
fn record_classifies_fields() {
    let r = Record::from_row(&row(&[("name", "Ke Jie"), ("rating", "3650")]));
    assert_eq!(r.len(), 2);
    assert_eq!(r.get("rating").and_then(FieldValue::as_f64), Some(3650.0));
    assert_eq!(r.get("name").and_then(FieldValue::as_str), Some("Ke Jie"));
    assert!(r.get("missing").is_none());
}

#[test]
fn record_clones_share_the_snapshot() {
    let r = Record::from_row(&row(&[("a", "1")]));
    let c = r.clone();
    assert!(Record::ptr_eq(&r, &c));
    assert!(!Record::ptr_eq(&r, &Record::from_row(&row(&[("a", "1")]))));
}

#[test]
fn record_serializes_as_plain_object() {
    let r = Record::from_row(&row(&[("id", "x"), ("v", "2")]));
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json, serde_json::json!({ "id": "x", "v": 2.0 }));
}
