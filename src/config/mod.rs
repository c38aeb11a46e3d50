pub(crate) mod accessors;

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    config::accessors::FieldAccessors,
    foundation::error::{RaceError, RaceResult},
};

/// Pipeline parameters.
///
/// Deserializes from JSON with every field optional; both `snake_case` and the `camelCase`
/// spellings used by chart configs are accepted. Unknown (renderer-side) keys are ignored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Field holding the entity id.
    #[serde(alias = "idField")]
    pub id_field: String,
    /// Field holding the display label.
    #[serde(alias = "labelField")]
    pub label_field: String,
    /// Field holding the step (number or date).
    #[serde(alias = "stepField")]
    pub step_field: String,
    /// Field holding the ranked value.
    #[serde(alias = "valueField")]
    pub value_field: String,
    /// Number of visible bars. One extra slot is kept for boundary smoothing.
    #[serde(alias = "topN")]
    pub top_n: usize,
    /// Longest stretch of video an entity may go without data before it fades out.
    #[serde(alias = "maxRetentionTimeSec")]
    pub max_retention_time_sec: f64,
    /// Value multiplier applied at synthesized fade points, in `[0, 1]`.
    #[serde(alias = "decayRate")]
    pub decay_rate: f64,
    /// Fade-in/out duration bracketing a gap.
    #[serde(alias = "transitionDurationSec")]
    pub transition_duration_sec: f64,
    /// Length of the main (unpadded) animation.
    #[serde(alias = "totalDurationSec")]
    pub total_duration_sec: f64,
    /// Output frame rate.
    pub fps: f64,
    /// Duration of one rank swap; drives tail padding and the smoothing radius.
    #[serde(alias = "swapDurationSec")]
    pub swap_duration_sec: f64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
            label_field: "id".to_string(),
            step_field: "step".to_string(),
            value_field: "value".to_string(),
            top_n: 20,
            max_retention_time_sec: 5.0,
            decay_rate: 0.6,
            transition_duration_sec: 0.5,
            total_duration_sec: 10.0,
            fps: 60.0,
            swap_duration_sec: 0.5,
        }
    }
}

impl RaceConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RaceResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RaceError::serde(format!("parse race config JSON: {e}")))
    }

    /// Parse a config from a JSON string.
    pub fn from_json_str(s: &str) -> RaceResult<Self> {
        serde_json::from_str(s).map_err(|e| RaceError::serde(format!("parse race config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RaceResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open race config JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check numeric parameters.
    pub fn validate(&self) -> RaceResult<()> {
        if self.top_n == 0 {
            return Err(RaceError::validation("top_n must be >= 1"));
        }
        let positive = [
            ("max_retention_time_sec", self.max_retention_time_sec),
            ("total_duration_sec", self.total_duration_sec),
            ("fps", self.fps),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(RaceError::validation(format!(
                    "{name} must be a finite number > 0, got {v}"
                )));
            }
        }
        let non_negative = [
            ("transition_duration_sec", self.transition_duration_sec),
            ("swap_duration_sec", self.swap_duration_sec),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(RaceError::validation(format!(
                    "{name} must be a finite number >= 0, got {v}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.decay_rate) {
            return Err(RaceError::validation(format!(
                "decay_rate must be within [0, 1], got {}",
                self.decay_rate
            )));
        }
        Ok(())
    }

    /// Enforce `transition_duration_sec * 2 <= max_retention_time_sec`.
    ///
    /// Returns the warning text when the transition had to be shortened.
    pub fn clamp_transition(&mut self) -> Option<String> {
        if self.transition_duration_sec * 2.0 <= self.max_retention_time_sec {
            return None;
        }
        let clamped = self.max_retention_time_sec / 2.0;
        let msg = format!(
            "transition_duration_sec * 2 > max_retention_time_sec, set transition_duration_sec from {} to {clamped}",
            self.transition_duration_sec
        );
        tracing::warn!(
            transition_duration_sec = self.transition_duration_sec,
            max_retention_time_sec = self.max_retention_time_sec,
            "{msg}"
        );
        self.transition_duration_sec = clamped;
        Some(msg)
    }

    /// Accessors reading the configured field names.
    pub fn field_accessors(&self) -> FieldAccessors {
        FieldAccessors {
            id_field: self.id_field.clone(),
            label_field: self.label_field.clone(),
            step_field: self.step_field.clone(),
            value_field: self.value_field.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/config.rs"]
mod tests;
