use std::{collections::BTreeMap, ops::Index, sync::Arc};

use crate::{data::observation::Observation, data::record::Record, foundation::core::FrameIndex};

/// One entity's state in one output frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameEntry {
    /// Stable entity key.
    pub id: Arc<str>,
    /// Display label.
    pub label: Arc<str>,
    /// Interpolated value; NaN when the entity is not visible.
    pub value: f64,
    /// Step the frame was sampled at.
    pub step: f64,
    /// Snapshot of the source row of the active segment.
    pub raw: Record,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Position in the frame by descending value, NaN last.
    pub rank: usize,
    /// Time-smoothed rank. `None` until the whole series has been smoothed.
    pub blur_rank: Option<f64>,
    /// `true` while the entity is rising through the ranks.
    pub up: bool,
    /// Interpolated numeric side fields of the source row.
    pub extras: BTreeMap<String, f64>,
}

impl FrameEntry {
    /// Unranked entry from a sampled observation.
    pub fn from_sample(obs: Observation) -> Self {
        Self {
            id: obs.id,
            label: obs.label,
            value: obs.value,
            step: obs.step,
            raw: obs.raw,
            alpha: obs.alpha,
            rank: 0,
            blur_rank: None,
            up: obs.up,
            extras: obs.extras,
        }
    }
}

/// One animation instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    /// Output frame number.
    pub index: FrameIndex,
    /// Timeline step the frame was sampled at (padding frames repeat the last step).
    pub step: f64,
    /// Ranked entries, at most `top_n + 1`, ordered by rank.
    pub entries: Vec<FrameEntry>,
}

impl Frame {
    /// Look up an entity in this frame.
    pub fn entry(&self, id: &str) -> Option<&FrameEntry> {
        self.entries.iter().find(|e| &*e.id == id)
    }
}

/// The pipeline's output: every frame a renderer needs, in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Series {
    /// All frames, main animation first, then the tail padding.
    pub frames: Vec<Frame>,
    /// Frames sampled from the data (`round(total_duration_sec * fps)`).
    pub frame_count: usize,
    /// Padding frames appended after the sampled ones.
    pub tail_frames: usize,
    /// Smallest retained step.
    pub start_step: f64,
    /// Largest retained step.
    pub end_step: f64,
    /// Non-fatal adjustments made while building the series.
    pub warnings: Vec<String>,
}

impl Series {
    /// Total number of frames, padding included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame by number.
    pub fn frame(&self, index: FrameIndex) -> Option<&Frame> {
        usize::try_from(index.0)
            .ok()
            .and_then(|i| self.frames.get(i))
    }

    /// Iterate frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl Index<usize> for Series {
    type Output = Frame;

    fn index(&self, index: usize) -> &Self::Output {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
