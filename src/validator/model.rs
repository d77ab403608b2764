//! Closed-form brightness model for EV compensation sweeps.
//!
//! Brightness should theoretically double every `1/ev_per_step` compensation
//! steps. The model is anchored at the midpoint sample so absolute scene
//! brightness drops out of the comparison.

use crate::errors::SuiteError;

/// Enumerate the EV compensation values to sweep: `range_min` upward in
/// strides of `steps_per_ev = floor(1 / ev_per_step)`, never past `range_max`.
pub fn enumerate_ev_steps(
    range_min: i32,
    range_max: i32,
    ev_per_step: f64,
) -> Result<Vec<i32>, SuiteError> {
    if !(ev_per_step.is_finite() && ev_per_step > 0.0) {
        return Err(SuiteError::PropertyError(format!(
            "aeCompensationStep must be a positive EV amount, got {ev_per_step}"
        )));
    }
    if range_min > range_max {
        return Err(SuiteError::PropertyError(format!(
            "aeCompensationRange is inverted: [{range_min}, {range_max}]"
        )));
    }

    // Steps larger than a full stop floor to 0; a stride of 1 still covers
    // the range one step at a time.
    let steps_per_ev = ((1.0 / ev_per_step).floor() as i32).max(1);
    Ok((range_min..=range_max)
        .step_by(steps_per_ev as usize)
        .collect())
}

/// Expected luma per sweep sample, anchored at the midpoint measurement.
///
/// `expected[i] = lumas[mid] / gain^(mid - i)` before the midpoint and
/// `lumas[mid] * gain^(i - mid)` at and after it, with `gain = 2^ev_per_step`.
pub fn expected_lumas(measured: &[f64], ev_per_step: f64) -> Vec<f64> {
    if measured.is_empty() {
        return Vec::new();
    }
    let gain = 2f64.powf(ev_per_step);
    let imid = measured.len() / 2;
    let anchor = measured[imid];

    (0..measured.len())
        .map(|i| {
            if i < imid {
                anchor / gain.powi((imid - i) as i32)
            } else {
                anchor * gain.powi((i - imid) as i32)
            }
        })
        .collect()
}

/// Signed per-sample deviations (expected - measured) plus the max and mean
/// absolute deviation.
#[derive(Debug, Clone)]
pub struct DeviationStats {
    pub diffs: Vec<f64>,
    pub max_abs: f64,
    pub avg_abs: f64,
}

pub fn deviation_stats(expected: &[f64], measured: &[f64]) -> DeviationStats {
    debug_assert_eq!(expected.len(), measured.len());
    let diffs: Vec<f64> = expected
        .iter()
        .zip(measured.iter())
        .map(|(e, m)| e - m)
        .collect();
    let max_abs = diffs.iter().fold(0.0f64, |acc, d| acc.max(d.abs()));
    let avg_abs = if diffs.is_empty() {
        0.0
    } else {
        diffs.iter().map(|d| d.abs()).sum::<f64>() / diffs.len() as f64
    };
    DeviationStats {
        diffs,
        max_abs,
        avg_abs,
    }
}
