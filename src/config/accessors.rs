use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{
    data::record::{RawRow, parse_number},
    foundation::error::{RaceError, RaceResult},
};

/// Reads the core fields of an input row.
///
/// Implement this to derive ids, labels, steps or values from anything other than a single
/// named column. [`FieldAccessors`] covers the common case.
pub trait RowAccessors: Sync {
    /// Entity identity.
    fn id(&self, row: &RawRow, index: usize) -> String;

    /// Display label.
    fn label(&self, row: &RawRow, index: usize) -> String;

    /// Timeline coordinate. Failing here aborts the whole pipeline.
    fn step(&self, row: &RawRow, index: usize) -> RaceResult<f64>;

    /// Ranked value; NaN marks the entity as not visible.
    fn value(&self, row: &RawRow, index: usize) -> f64;
}

/// [`RowAccessors`] reading one named field per concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAccessors {
    /// Field holding the entity id.
    pub id_field: String,
    /// Field holding the display label.
    pub label_field: String,
    /// Field holding the step (number or date).
    pub step_field: String,
    /// Field holding the ranked value.
    pub value_field: String,
}

impl RowAccessors for FieldAccessors {
    fn id(&self, row: &RawRow, _index: usize) -> String {
        row.get(&self.id_field).cloned().unwrap_or_default()
    }

    fn label(&self, row: &RawRow, _index: usize) -> String {
        row.get(&self.label_field).cloned().unwrap_or_default()
    }

    fn step(&self, row: &RawRow, index: usize) -> RaceResult<f64> {
        let text = row.get(&self.step_field).ok_or_else(|| {
            RaceError::config(format!(
                "row {index}: step field '{}' is missing",
                self.step_field
            ))
        })?;
        parse_step(text).ok_or_else(|| {
            RaceError::config(format!(
                "row {index}: step is not a valid date or number: got '{text}'"
            ))
        })
    }

    fn value(&self, row: &RawRow, _index: usize) -> f64 {
        row.get(&self.value_field)
            .and_then(|v| parse_number(v))
            .unwrap_or(f64::NAN)
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a step cell: a plain number, or a date converted to Unix epoch milliseconds.
///
/// Dates without an offset are read as UTC.
pub fn parse_step(text: &str) -> Option<f64> {
    if let Some(n) = parse_number(text) {
        return Some(n);
    }
    let t = text.trim();
    if t.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.timestamp_millis() as f64);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(ndt.and_utc().timestamp_millis() as f64);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return date_millis(d);
        }
    }
    // Year-month only.
    NaiveDate::parse_from_str(&format!("{t}-01"), "%Y-%m-%d")
        .ok()
        .and_then(date_millis)
}

fn date_millis(d: NaiveDate) -> Option<f64> {
    d.and_hms_opt(0, 0, 0)
        .map(|ndt| ndt.and_utc().timestamp_millis() as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/config/accessors.rs"]
mod tests;
