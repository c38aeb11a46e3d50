use std::{collections::BTreeMap, sync::Arc};

/// One parsed input row: field name to textual value.
pub type RawRow = BTreeMap<String, String>;

/// A typed field value captured from a [`RawRow`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The field text parsed as a finite number.
    Number(f64),
    /// Any other text.
    Text(String),
}

impl FieldValue {
    /// Classify a field's text.
    pub fn parse(text: &str) -> Self {
        match parse_number(text) {
            Some(n) => Self::Number(n),
            None => Self::Text(text.to_owned()),
        }
    }

    /// Numeric view, if the field was numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Textual view, if the field was not numeric.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

/// Immutable snapshot of a source row.
///
/// Built once at normalization time and shared read-only by every observation, synthetic
/// transition point and frame entry derived from that row. Cloning is a reference-count bump.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Record(Arc<BTreeMap<String, FieldValue>>);

impl Record {
    /// Capture `row` with each field classified as number or text.
    pub fn from_row(row: &RawRow) -> Self {
        let fields = row
            .iter()
            .map(|(k, v)| (k.clone(), FieldValue::parse(v)))
            .collect::<BTreeMap<_, _>>();
        Self(Arc::new(fields))
    }

    /// Look up a field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of captured fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the source row had no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` when both handles point at the same snapshot.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Default for Record {
    fn default() -> Self {
        Self(Arc::new(BTreeMap::new()))
    }
}

/// Parse trimmed text as a finite number. Empty text is not a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/data/record.rs"]
mod tests;
