//! Row → frame transformation stages and the driver that chains them.

pub(crate) mod blur;
pub(crate) mod gaps;
pub(crate) mod interp;
pub(crate) mod normalize;
pub(crate) mod sample;
pub(crate) mod smooth;
pub(crate) mod tail;
pub(crate) mod top_n;

use std::{collections::HashMap, sync::Arc, time::Instant};

use rayon::prelude::*;

use crate::{
    config::RaceConfig,
    config::accessors::RowAccessors,
    data::observation::Observation,
    data::record::RawRow,
    foundation::core::{StepScale, secs_to_frames_round},
    foundation::error::{RaceError, RaceResult},
    pipeline::gaps::{GapParams, synthesize_gaps},
    pipeline::interp::Interpolant,
    pipeline::normalize::normalize_rows,
    pipeline::sample::{sample_frames, sample_frames_par},
    pipeline::smooth::{smooth_ranks, smooth_ranks_par},
    pipeline::tail::pad_tail,
    pipeline::top_n::filter_top_n,
    series::Series,
};

#[derive(Clone, Debug, Default)]
/// Threading controls for [`build_series_with`].
pub struct PipelineOpts {
    /// Run per-entity and per-frame work on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// Run the full pipeline single-threaded, reading fields named in `config`.
pub fn build_series(rows: &[RawRow], config: &RaceConfig) -> RaceResult<Series> {
    let accessors = config.field_accessors();
    build_series_with(rows, &accessors, config, &PipelineOpts::default())
}

/// Run the full pipeline with custom accessors and threading.
///
/// Stages: normalize → top-N filter → gap synthesis and interpolants per entity → frame
/// sampling → tail padding → rank smoothing. Any error aborts the run; there are no partial
/// results.
#[tracing::instrument(skip_all, fields(rows = rows.len(), parallel = opts.parallel))]
pub fn build_series_with(
    rows: &[RawRow],
    accessors: &dyn RowAccessors,
    config: &RaceConfig,
    opts: &PipelineOpts,
) -> RaceResult<Series> {
    config.validate()?;
    let mut config = config.clone();
    let warnings: Vec<String> = config.clamp_transition().into_iter().collect();

    let frame_count = secs_to_frames_round(config.total_duration_sec, config.fps);
    if frame_count == 0 {
        return Err(RaceError::validation(
            "total_duration_sec * fps must yield at least one frame",
        ));
    }
    let swap_frames = secs_to_frames_round(config.swap_duration_sec, config.fps);

    let t = Instant::now();
    let observations = normalize_rows(rows, accessors)?;
    let observations = filter_top_n(observations, config.top_n);
    tracing::debug!(
        observations = observations.len(),
        elapsed_ms = t.elapsed().as_millis() as u64,
        "preprocess"
    );

    let scale = step_extent(&observations, config.total_duration_sec)?;
    let params = GapParams {
        scale,
        max_retention_time_sec: config.max_retention_time_sec,
        transition_duration_sec: config.transition_duration_sec,
        decay_rate: config.decay_rate,
    };
    let timelines = group_by_id(observations);

    let run = || -> RaceResult<Series> {
        let t = Instant::now();
        let interpolants = build_interpolants(timelines, &params, opts.parallel);
        tracing::debug!(
            entities = interpolants.len(),
            elapsed_ms = t.elapsed().as_millis() as u64,
            "interpolants"
        );

        let t = Instant::now();
        let mut frames = if opts.parallel {
            sample_frames_par(&interpolants, scale, frame_count, config.top_n)
        } else {
            sample_frames(&interpolants, scale, frame_count, config.top_n)
        };
        tracing::debug!(
            frames = frames.len(),
            elapsed_ms = t.elapsed().as_millis() as u64,
            "sample"
        );

        let t = Instant::now();
        pad_tail(&mut frames, swap_frames);
        if opts.parallel {
            smooth_ranks_par(&mut frames, config.top_n, swap_frames)?;
        } else {
            smooth_ranks(&mut frames, config.top_n, swap_frames)?;
        }
        tracing::debug!(
            tail_frames = swap_frames,
            elapsed_ms = t.elapsed().as_millis() as u64,
            "smooth"
        );

        Ok(Series {
            frames,
            frame_count,
            tail_frames: swap_frames,
            start_step: scale.start_step,
            end_step: scale.end_step,
            warnings,
        })
    };

    if opts.parallel {
        build_thread_pool(opts.threads)?.install(run)
    } else {
        run()
    }
}

/// Step extent of the retained observations mapped onto the main animation length.
fn step_extent(observations: &[Observation], total_duration_sec: f64) -> RaceResult<StepScale> {
    let mut steps = observations.iter().map(|o| o.step);
    let Some(first) = steps.next() else {
        return Err(RaceError::validation(
            "dataset has no step values: at least one row is required",
        ));
    };
    let (start, end) = steps.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
    StepScale::new(start, end, total_duration_sec)
}

/// Split observations into per-entity timelines, ordered by first appearance.
fn group_by_id(observations: Vec<Observation>) -> Vec<Vec<Observation>> {
    let mut index: HashMap<Arc<str>, usize> = HashMap::new();
    let mut groups: Vec<Vec<Observation>> = Vec::new();
    for o in observations {
        match index.get(&o.id) {
            Some(&g) => groups[g].push(o),
            None => {
                index.insert(o.id.clone(), groups.len());
                groups.push(vec![o]);
            }
        }
    }
    groups
}

fn build_interpolants(
    timelines: Vec<Vec<Observation>>,
    params: &GapParams,
    parallel: bool,
) -> Vec<Interpolant> {
    if parallel {
        timelines
            .into_par_iter()
            .filter_map(|t| Interpolant::new(synthesize_gaps(t, params)))
            .collect()
    } else {
        timelines
            .into_iter()
            .filter_map(|t| Interpolant::new(synthesize_gaps(t, params)))
            .collect()
    }
}

fn build_thread_pool(threads: Option<usize>) -> RaceResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RaceError::validation(
            "pipeline threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RaceError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/driver.rs"]
mod tests;
