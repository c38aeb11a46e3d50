use std::{collections::BTreeMap, sync::Arc};

use crate::data::record::Record;

/// One real or synthesized sample of an entity.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Observation {
    /// Stable entity key.
    pub id: Arc<str>,
    /// Display label.
    pub label: Arc<str>,
    /// Sampled value. NaN means "not visible".
    pub value: f64,
    /// Timeline coordinate.
    pub step: f64,
    /// Opacity: 0 or 1 at synthesis time, fractional once sampled.
    pub alpha: f64,
    /// `true` when this point begins an entry (rising) transition.
    pub up: bool,
    /// Snapshot of the source row. Never interpolated.
    pub raw: Record,
    /// Numeric fields of the source row other than the id; interpolated alongside `value`.
    pub extras: BTreeMap<String, f64>,
}

impl Observation {
    /// `true` when the value is defined (not NaN).
    pub fn is_defined(&self) -> bool {
        !self.value.is_nan()
    }

    /// Derive an invisible transition point from this observation.
    ///
    /// The value is shrunk by `decay_rate`; identity, raw snapshot and extras are carried over.
    pub fn fade_point(&self, step: f64, decay_rate: f64, up: bool) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            value: self.value * decay_rate,
            step,
            alpha: 0.0,
            up,
            raw: self.raw.clone(),
            extras: self.extras.clone(),
        }
    }

    /// Derive the terminal "gone" point placed at the end of the timeline.
    pub fn vanish_point(&self, step: f64) -> Self {
        Self {
            value: f64::NAN,
            step,
            alpha: 0.0,
            up: false,
            ..self.clone()
        }
    }
}
