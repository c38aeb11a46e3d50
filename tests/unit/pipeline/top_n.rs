use super::*;
use crate::data::record::Record;

fn obs(id: &str, step: f64, value: f64) -> Observation {
    Observation {
        id: id.into(),
        label: id.into(),
        value,
        step,
        alpha: if value.is_nan() { 0.0 } else { 1.0 },
        up: false,
        raw: Record::default(),
        extras: Default::default(),
    }
}

fn ids(v: &[Observation]) -> Vec<&str> {
    v.iter().map(|o| &*o.id).collect()
}

#[test]
fn keeps_top_n_plus_one_per_bucket() {
    let data = vec![
        obs("a", 0.0, 40.0),
        obs("b", 0.0, 30.0),
        obs("c", 0.0, 20.0),
        obs("d", 0.0, 10.0),
    ];
    let out = filter_top_n(data, 2);
    assert_eq!(ids(&out), vec!["a", "b", "c"]);
}

#[test]
fn an_entity_competitive_in_any_bucket_keeps_all_its_points() {
    let data = vec![
        obs("a", 0.0, 40.0),
        obs("b", 0.0, 30.0),
        obs("c", 0.0, 1.0),
        obs("a", 1.0, 1.0),
        obs("b", 1.0, 2.0),
        obs("c", 1.0, 50.0),
    ];
    let out = filter_top_n(data, 1);
    assert_eq!(ids(&out), vec!["a", "b", "c", "a", "b", "c"]);

    let data = vec![
        obs("a", 0.0, 40.0),
        obs("b", 0.0, 30.0),
        obs("c", 0.0, 1.0),
        obs("a", 1.0, 10.0),
        obs("b", 1.0, 20.0),
        obs("c", 1.0, 5.0),
    ];
    let out = filter_top_n(data, 1);
    assert_eq!(ids(&out), vec!["a", "b", "a", "b"]);
}

#[test]
fn buckets_use_floored_steps() {
    let data = vec![
        obs("a", 5.2, 10.0),
        obs("b", 5.9, 9.0),
        obs("c", 5.5, 8.0),
    ];
    let out = filter_top_n(data, 1);
    assert_eq!(ids(&out), vec!["a", "b"]);
}

#[test]
fn nan_values_lose_the_extra_slot() {
    let data = vec![
        obs("a", 0.0, f64::NAN),
        obs("b", 0.0, 1.0),
        obs("c", 0.0, 2.0),
    ];
    let keep = competitive_ids(&data, 1);
    assert!(keep.contains("b"));
    assert!(keep.contains("c"));
    assert!(!keep.contains("a"));
}
