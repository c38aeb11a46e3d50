use crate::foundation::error::{RaceError, RaceResult};

/// Zero-based index of an output animation frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(
    /// Frame number.
    pub u64,
);

/// Number of whole frames covering `secs` at `fps`, rounded to nearest.
pub fn secs_to_frames_round(secs: f64, fps: f64) -> usize {
    (secs * fps).round().max(0.0) as usize
}

/// Mapping between the data timeline (`step`) and seconds of output video.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StepScale {
    /// Smallest observed step.
    pub start_step: f64,
    /// Largest observed step.
    pub end_step: f64,
    /// Seconds of video per unit step. Zero when the dataset has a single step value.
    pub step_sec: f64,
}

impl StepScale {
    /// Build the scale for a `[start_step, end_step]` extent mapped onto `total_duration_sec`.
    pub fn new(start_step: f64, end_step: f64, total_duration_sec: f64) -> RaceResult<Self> {
        if !start_step.is_finite() || !end_step.is_finite() {
            return Err(RaceError::validation(
                "dataset step extent must be finite numbers",
            ));
        }
        if start_step > end_step {
            return Err(RaceError::validation("StepScale start must be <= end"));
        }
        let total_step = end_step - start_step;
        let step_sec = if total_step > 0.0 {
            total_duration_sec / total_step
        } else {
            0.0
        };
        Ok(Self {
            start_step,
            end_step,
            step_sec,
        })
    }

    /// Extent of the data timeline in steps.
    pub fn total_steps(self) -> f64 {
        self.end_step - self.start_step
    }

    /// Convert a duration in seconds of video into steps.
    pub fn secs_to_steps(self, secs: f64) -> f64 {
        if self.step_sec > 0.0 {
            secs / self.step_sec
        } else {
            0.0
        }
    }

    /// Convert a step delta into seconds of video.
    pub fn steps_to_secs(self, steps: f64) -> f64 {
        steps * self.step_sec
    }

    /// Evenly spaced sample step for output frame `i` of `frame_count`.
    pub fn sample_step(self, i: usize, frame_count: usize) -> f64 {
        if frame_count == 0 {
            return self.start_step;
        }
        self.start_step + (i as f64) * self.total_steps() / (frame_count as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
