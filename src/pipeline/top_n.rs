use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{data::observation::Observation, foundation::math::desc_nan_last};

/// Keep only entities that reach the extended top set (`top_n + 1`) in at least one step bucket.
///
/// Buckets are `floor(step)`. Surviving observations keep their input order.
pub fn filter_top_n(observations: Vec<Observation>, top_n: usize) -> Vec<Observation> {
    let keep = competitive_ids(&observations, top_n);
    observations
        .into_iter()
        .filter(|o| keep.contains(&o.id))
        .collect()
}

/// Ids appearing in the first `top_n + 1` of any `floor(step)` bucket.
pub fn competitive_ids(observations: &[Observation], top_n: usize) -> HashSet<Arc<str>> {
    let mut buckets: HashMap<i64, Vec<&Observation>> = HashMap::new();
    for o in observations {
        buckets.entry(o.step.floor() as i64).or_default().push(o);
    }

    let mut keep = HashSet::new();
    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| desc_nan_last(a.value, b.value));
        keep.extend(bucket.iter().take(top_n + 1).map(|o| o.id.clone()));
    }
    keep
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/top_n.rs"]
mod tests;
