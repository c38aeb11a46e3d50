use crate::{foundation::core::FrameIndex, series::Frame};

/// Append `swap_frames` copies of the last frame so the final rank swap can settle.
///
/// Copies are independent entries (only the shared `raw` snapshots are reused) and get
/// consecutive frame indices. Nothing is appended to an empty sequence.
pub fn pad_tail(frames: &mut Vec<Frame>, swap_frames: usize) {
    let Some(last) = frames.last().cloned() else {
        return;
    };
    frames.reserve(swap_frames);
    for _ in 0..swap_frames {
        let mut copy = last.clone();
        copy.index = FrameIndex(frames.len() as u64);
        frames.push(copy);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/tail.rs"]
mod tests;
