use crate::{data::observation::Observation, foundation::math::lerp};

/// Interpolation contract for sampled point types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for Observation {
    /// `value`, `alpha` and shared `extras` blend; identity, `raw` and `up` stay with `a`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let mut extras = a.extras.clone();
        for (k, av) in extras.iter_mut() {
            if let Some(bv) = b.extras.get(k) {
                *av = lerp(*av, *bv, t);
            }
        }
        Self {
            id: a.id.clone(),
            label: a.label.clone(),
            value: lerp(a.value, b.value, t),
            step: lerp(a.step, b.step, t),
            alpha: lerp(a.alpha, b.alpha, t),
            up: a.up,
            raw: a.raw.clone(),
            extras,
        }
    }
}

/// Clamped piecewise-linear function over an entity timeline.
#[derive(Clone, Debug)]
pub struct Interpolant {
    points: Vec<Observation>, // strictly increasing in step
}

impl Interpolant {
    /// Build from a gap-synthesized timeline. Returns `None` for an empty timeline.
    pub fn new(points: Vec<Observation>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self { points })
    }

    /// First and last step of the domain.
    pub fn domain(&self) -> (f64, f64) {
        let first = &self.points[0];
        let last = &self.points[self.points.len() - 1];
        (first.step, last.step)
    }

    /// Knots of the function.
    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    /// Sample at `step`.
    ///
    /// Outside the domain the nearest boundary point is returned (no extrapolation). A
    /// single-point timeline is constant everywhere. The returned observation carries the
    /// requested `step`.
    pub fn sample(&self, step: f64) -> Observation {
        let idx = self.points.partition_point(|p| p.step <= step);

        let mut out = if idx == 0 {
            self.points[0].clone()
        } else if idx >= self.points.len() {
            self.points[self.points.len() - 1].clone()
        } else {
            let a = &self.points[idx - 1];
            let b = &self.points[idx];
            let denom = b.step - a.step;
            let t = if denom > 0.0 {
                (step - a.step) / denom
            } else {
                0.0
            };
            if t <= 0.0 {
                a.clone()
            } else {
                Observation::lerp(a, b, t)
            }
        };
        out.step = step;
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/interp.rs"]
mod tests;
