use rayon::prelude::*;

use crate::{
    foundation::core::{FrameIndex, StepScale},
    foundation::math::desc_nan_last,
    pipeline::interp::Interpolant,
    series::{Frame, FrameEntry},
};

/// Sort entries by value (descending, NaN last), keep the first `top_n + 1`, and number them.
pub fn rank_entries(mut entries: Vec<FrameEntry>, top_n: usize) -> Vec<FrameEntry> {
    entries.sort_by(|a, b| desc_nan_last(a.value, b.value));
    entries.truncate(top_n + 1);
    for (i, e) in entries.iter_mut().enumerate() {
        e.rank = i;
    }
    entries
}

/// Sample every interpolant at one step and rank the result.
pub fn sample_frame(
    interpolants: &[Interpolant],
    index: FrameIndex,
    step: f64,
    top_n: usize,
) -> Frame {
    let entries = interpolants
        .iter()
        .map(|f| FrameEntry::from_sample(f.sample(step)))
        .collect();
    Frame {
        index,
        step,
        entries: rank_entries(entries, top_n),
    }
}

/// Sample `frame_count` evenly spaced steps across the scale's extent.
pub fn sample_frames(
    interpolants: &[Interpolant],
    scale: StepScale,
    frame_count: usize,
    top_n: usize,
) -> Vec<Frame> {
    (0..frame_count)
        .map(|i| {
            sample_frame(
                interpolants,
                FrameIndex(i as u64),
                scale.sample_step(i, frame_count),
                top_n,
            )
        })
        .collect()
}

/// Same as [`sample_frames`], with frames sampled concurrently on the current rayon pool.
pub fn sample_frames_par(
    interpolants: &[Interpolant],
    scale: StepScale,
    frame_count: usize,
    top_n: usize,
) -> Vec<Frame> {
    (0..frame_count)
        .into_par_iter()
        .map(|i| {
            sample_frame(
                interpolants,
                FrameIndex(i as u64),
                scale.sample_step(i, frame_count),
                top_n,
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/sample.rs"]
mod tests;
