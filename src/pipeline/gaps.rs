use crate::{data::observation::Observation, foundation::core::StepScale};

/// Parameters controlling transition synthesis for one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GapParams {
    /// Step extent and step/second conversion.
    pub scale: StepScale,
    /// Longest gap (seconds of video) an entity may stay implicitly visible.
    pub max_retention_time_sec: f64,
    /// Fade duration in seconds of video.
    pub transition_duration_sec: f64,
    /// Value multiplier applied at synthetic fade points.
    pub decay_rate: f64,
}

impl GapParams {
    /// Fade duration in steps.
    pub fn transition_steps(&self) -> f64 {
        self.scale.secs_to_steps(self.transition_duration_sec)
    }

    /// Retention window in steps.
    pub fn retention_steps(&self) -> f64 {
        self.scale.secs_to_steps(self.max_retention_time_sec)
    }

    /// `true` when the stretch `from..to` is longer than the retention window.
    pub fn exceeds_retention(&self, from: f64, to: f64) -> bool {
        self.scale.steps_to_secs(to - from) > self.max_retention_time_sec
    }
}

/// Output sequence that only accepts points strictly after its current tail.
struct Builder {
    points: Vec<Observation>,
}

impl Builder {
    fn last_step(&self) -> Option<f64> {
        self.points.last().map(|p| p.step)
    }

    fn push(&mut self, point: Observation) {
        if self.last_step().is_some_and(|last| point.step <= last) {
            return;
        }
        self.points.push(point);
    }

    /// Exit fade, hold and entry fade for a gap running from `from` to `next.step`.
    ///
    /// All three points carry the decayed value and snapshot of `next`, the observation that
    /// ends the gap.
    fn push_gap(
        &mut self,
        from: f64,
        next: &Observation,
        transition: f64,
        retention: f64,
        decay: f64,
    ) {
        let entry_step = next.step - transition;
        self.push_before(next.fade_point(from + transition, decay, false), entry_step);
        self.push_before(next.fade_point(from + retention, decay, false), entry_step);
        self.push_before(next.fade_point(entry_step, decay, true), next.step);
    }

    /// Push a synthetic point only if it also lands strictly before `limit`.
    fn push_before(&mut self, point: Observation, limit: f64) {
        if point.step < limit {
            self.push(point);
        }
    }
}

/// Sort a timeline by step, keeping the later row when steps collide.
pub fn sort_timeline(mut timeline: Vec<Observation>) -> Vec<Observation> {
    timeline.sort_by(|a, b| a.step.total_cmp(&b.step));
    let mut out: Vec<Observation> = Vec::with_capacity(timeline.len());
    for o in timeline {
        match out.last_mut() {
            Some(last) if last.step == o.step => *last = o,
            _ => out.push(o),
        }
    }
    out
}

/// Insert fade-out, hold and fade-in points so an entity disappears and reappears smoothly
/// across data gaps, explicit NaN values and the end of the series.
///
/// The result is strictly increasing in step.
pub fn synthesize_gaps(timeline: Vec<Observation>, params: &GapParams) -> Vec<Observation> {
    let points = sort_timeline(timeline);
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return points;
    };

    let transition = params.transition_steps();
    let retention = params.retention_steps();
    let decay = params.decay_rate;
    let mut out = Builder {
        points: Vec::with_capacity(points.len() + 4),
    };

    // A late arrival is treated as a gap opening at the start of the timeline.
    if params.exceeds_retention(params.scale.start_step, first.step) {
        out.push_gap(params.scale.start_step, first, transition, retention, decay);
    }

    for (i, cur) in points.iter().enumerate() {
        if i > 0 {
            let prev = &points[i - 1];
            if params.exceeds_retention(prev.step, cur.step) {
                out.push_gap(prev.step, cur, transition, retention, decay);
            }
            if !cur.is_defined() && prev.is_defined() {
                out.push_before(prev.fade_point(prev.step + transition, decay, false), cur.step);
            }
            if cur.is_defined() && !prev.is_defined() {
                out.push_before(cur.fade_point(cur.step - transition, decay, true), cur.step);
            }
        }
        out.push(cur.clone());
    }

    let end_step = params.scale.end_step;
    if params.exceeds_retention(last.step, end_step) {
        out.push_before(last.fade_point(last.step + transition, decay, false), end_step);
        out.push(last.vanish_point(end_step));
    }

    out.points
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/gaps.rs"]
mod tests;
