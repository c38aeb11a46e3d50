use crate::foundation::error::{RaceError, RaceResult};

/// Blur a 1-D sequence with three moving-average passes (an approximate Gaussian).
///
/// Each pass averages a `2 * radius + 1` window with edge samples replicated. A fractional
/// radius gives the two outermost samples weight `radius - floor(radius)`. A zero radius or an
/// empty sequence is returned unchanged.
pub fn blur_1d(values: &[f64], radius: f64) -> RaceResult<Vec<f64>> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(RaceError::validation(format!(
            "blur radius must be a finite number >= 0, got {radius}"
        )));
    }
    let mut out = values.to_vec();
    if out.is_empty() || radius == 0.0 {
        return Ok(out);
    }

    let mut tmp = out.clone();
    box_pass(&mut out, &tmp, radius);
    box_pass(&mut tmp, &out, radius);
    box_pass(&mut out, &tmp, radius);
    Ok(out)
}

fn box_pass(dst: &mut [f64], src: &[f64], radius: f64) {
    let last = src.len() as isize - 1;
    let at = |i: isize| src[i.clamp(0, last) as usize];

    let r0 = radius.floor();
    let frac = radius - r0;
    let r = r0 as isize;
    let width = 2.0 * radius + 1.0;

    let mut sum = r0 * src[0];
    for i in 0..r {
        sum += at(i);
    }
    for (i, slot) in dst.iter_mut().enumerate() {
        let i = i as isize;
        sum += at(i + r);
        *slot = (sum + frac * (at(i - r - 1) + at(i + r + 1))) / width;
        sum -= at(i - r);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/blur.rs"]
mod tests;
