// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point thinning
//!
//! Systematic sampling: keep every k-th point starting with the first one,
//! where `k = ceil(1 / fraction)`. Scanline-ordered input is thinned evenly
//! across its whole extent, and the result is reproducible.

use lidar_lite_core::{Progress, Stage};
use nalgebra::Point3;

use crate::error::{Error, Result};

/// Slack for fractions like 0.1 whose reciprocal is not exact in f64
const STEP_TOLERANCE: f64 = 1e-9;

/// Sampling step for a retention fraction
pub fn sampling_step(fraction: f64) -> Result<usize> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(Error::InvalidThinFraction(fraction));
    }
    let step = (1.0 / fraction - STEP_TOLERANCE).ceil();
    Ok((step as usize).max(1))
}

/// Number of points kept from `len` points at the given step
#[inline]
pub fn thinned_len(len: usize, step: usize) -> usize {
    if step == 0 {
        return len;
    }
    len.div_ceil(step)
}

/// Reduce `points` to roughly `len * fraction` points, in place.
/// `None` leaves the points untouched.
pub fn thin_points(
    mut points: Vec<Point3<f64>>,
    fraction: Option<f64>,
    progress: &mut dyn Progress,
) -> Result<Vec<Point3<f64>>> {
    let Some(fraction) = fraction else {
        return Ok(points);
    };

    let step = sampling_step(fraction)?;
    let before = points.len();
    progress.set_stage(Stage::Thinning, &format!("Thinning to {:.1}%", fraction * 100.0));
    progress.set_sub_progress(0.0, &format!("Thinning Points, Remaining points: {}", before));

    let mut position = 0usize;
    points.retain(|_| {
        let keep = position % step == 0;
        position += 1;
        keep
    });
    points.shrink_to_fit();

    progress.set_sub_progress(100.0, &format!("Thinned to {} points", points.len()));
    tracing::debug!(before, after = points.len(), step, "Thinned point set");

    Ok(points)
}
