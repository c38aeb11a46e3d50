use std::{collections::HashMap, sync::Arc};

use rayon::prelude::*;

use crate::{foundation::error::RaceResult, pipeline::blur::blur_1d, series::Frame};

/// Position of one entry: (frame, entry within frame).
type Slot = (usize, usize);

/// Collect every entity's entries across the series, in frame order.
///
/// Frames are produced in ascending step order (padding repeats the last step), so frame order
/// is the step order each group is smoothed in. Groups are listed by first appearance.
fn group_slots(frames: &[Frame]) -> Vec<Vec<Slot>> {
    let mut index: HashMap<Arc<str>, usize> = HashMap::new();
    let mut groups: Vec<Vec<Slot>> = Vec::new();
    for (fi, frame) in frames.iter().enumerate() {
        for (ei, entry) in frame.entries.iter().enumerate() {
            let g = *index.entry(entry.id.clone()).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[g].push((fi, ei));
        }
    }
    groups
}

fn blur_group(frames: &[Frame], slots: &[Slot], radius: f64) -> RaceResult<Vec<f64>> {
    let ranks: Vec<f64> = slots
        .iter()
        .map(|&(fi, ei)| frames[fi].entries[ei].rank as f64)
        .collect();
    blur_1d(&ranks, radius)
}

fn apply_group(frames: &mut [Frame], slots: &[Slot], blurred: &[f64], top_n: usize) {
    let boundary = top_n as f64 - 1.0;
    for (i, (&(fi, ei), &blur_rank)) in slots.iter().zip(blurred).enumerate() {
        let entry = &mut frames[fi].entries[ei];
        entry.blur_rank = Some(blur_rank);
        // A NaN value has nothing to show, whatever slot it holds.
        if entry.value.is_nan() {
            entry.alpha = 0.0;
        } else if blur_rank >= boundary {
            // Fade the marginal bar out as it slides past the last visible slot.
            entry.alpha = (1.0 - (blur_rank - boundary)).clamp(0.0, 1.0);
        }
        if i > 0 {
            entry.up = blur_rank < blurred[i - 1];
        }
    }
}

/// Fill `blur_rank` for every entry and derive the boundary fade and rising flag from it.
///
/// Entries whose value is NaN end up with `alpha = 0` regardless of their slot.
///
/// The smoothing radius is `swap_frames / 6`.
pub fn smooth_ranks(frames: &mut [Frame], top_n: usize, swap_frames: usize) -> RaceResult<()> {
    let radius = swap_frames as f64 / 6.0;
    let groups = group_slots(frames);
    for slots in &groups {
        let blurred = blur_group(frames, slots, radius)?;
        apply_group(frames, slots, &blurred, top_n);
    }
    Ok(())
}

/// Same as [`smooth_ranks`], blurring groups concurrently on the current rayon pool.
pub fn smooth_ranks_par(frames: &mut [Frame], top_n: usize, swap_frames: usize) -> RaceResult<()> {
    let radius = swap_frames as f64 / 6.0;
    let groups = group_slots(frames);
    let shared: &[Frame] = frames;
    let blurred = groups
        .par_iter()
        .map(|slots| blur_group(shared, slots, radius))
        .collect::<RaceResult<Vec<_>>>()?;
    for (slots, blurred) in groups.iter().zip(&blurred) {
        apply_group(frames, slots, blurred, top_n);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/smooth.rs"]
mod tests;
