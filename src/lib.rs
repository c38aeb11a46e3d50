//! barrace turns a sparse, irregularly sampled multi-entity time series into dense, ranked
//! per-frame data for "bar chart race" animations.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: raw rows → typed [`Observation`]s via [`RowAccessors`]
//! 2. **Filter**: keep entities that ever reach the top `top_n + 1` of a step bucket
//! 3. **Synthesize gaps**: fade-out / hold / fade-in points around missing data
//! 4. **Interpolate**: one clamped piecewise-linear [`Interpolant`] per entity
//! 5. **Sample**: one ranked [`Frame`] per output frame
//! 6. **Pad**: repeat the last frame so the final rank swap can settle
//! 7. **Smooth**: time-blurred ranks, boundary fades and rising flags
//!
//! The renderer reads the resulting [`Series`] as-is: no further interpolation, gap handling
//! or ranking is needed.
//!
//! The transform is pure and deterministic: the same rows and config always produce the same
//! series, whether or not [`PipelineOpts::parallel`] is set.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod data;
mod foundation;
mod pipeline;
mod series;

pub use config::RaceConfig;
pub use config::accessors::{FieldAccessors, RowAccessors, parse_step};
pub use data::observation::Observation;
pub use data::record::{FieldValue, RawRow, Record, parse_number};
pub use data::rows::{rows_from_json_str, rows_from_path, rows_from_reader};
pub use foundation::core::{FrameIndex, StepScale, secs_to_frames_round};
pub use foundation::error::{RaceError, RaceResult};
pub use pipeline::blur::blur_1d;
pub use pipeline::gaps::{GapParams, sort_timeline, synthesize_gaps};
pub use pipeline::interp::{Interpolant, Lerp};
pub use pipeline::normalize::{normalize_row, normalize_rows};
pub use pipeline::sample::{rank_entries, sample_frame, sample_frames, sample_frames_par};
pub use pipeline::smooth::{smooth_ranks, smooth_ranks_par};
pub use pipeline::tail::pad_tail;
pub use pipeline::top_n::{competitive_ids, filter_top_n};
pub use pipeline::{PipelineOpts, build_series, build_series_with};
pub use series::{Frame, FrameEntry, Series};
