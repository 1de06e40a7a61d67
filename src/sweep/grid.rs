//! Approximation quality across a grid of signal accuracies.
//!
//! Each grid accuracy is independent, so the grid is evaluated in parallel.
//! Results keep grid order regardless of scheduling.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{ApproxMethod, GridRow};
use crate::error::{AppError, ModelError};
use crate::models::{AffineApprox, correct_guess_probability};

/// Generate `steps` evenly spaced accuracies between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min >= 0.0 && max <= 1.0 && max > min) {
        return Err(AppError::new(
            2,
            format!("Invalid accuracy range: min={min}, max={max} (must be finite, within [0, 1], and max>min)."),
        ));
    }
    if steps < 2 {
        return Err(AppError::new(2, "Grid steps must be >= 2."));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(min + step * i as f64);
    }
    // Pin the last point so rounding never pushes it past `max`.
    out[steps - 1] = max;
    Ok(out)
}

/// Error statistics of `approx` against the exact curve over `1..=n_max`.
///
/// An `n_max` of 0 is scored as 1; callers that report the range reject 0 first.
pub fn score_approx(q: f64, approx: AffineApprox, n_max: u32) -> Result<GridRow, ModelError> {
    let mut max_abs_error = 0.0_f64;
    let mut worst_n = 1;
    let mut sse = 0.0;
    let count = n_max.max(1);

    for n in 1..=count {
        let err = approx.eval(n) - correct_guess_probability(n, q)?;
        sse += err * err;
        if err.abs() > max_abs_error {
            max_abs_error = err.abs();
            worst_n = n;
        }
    }

    Ok(GridRow {
        q,
        approx,
        max_abs_error,
        rmse: (sse / f64::from(count)).sqrt(),
        worst_n,
    })
}

/// Score the approximation at every accuracy in `q_min..=q_max` (`steps` points).
pub fn calibration_grid(
    q_min: f64,
    q_max: f64,
    steps: usize,
    n_max: u32,
    method: ApproxMethod,
) -> Result<Vec<GridRow>, AppError> {
    if n_max == 0 {
        return Err(AppError::new(2, "Calibration grid requires n_max >= 1."));
    }
    let qs = lin_space(q_min, q_max, steps)?;

    let rows = qs
        .par_iter()
        .map(|&q| {
            let approx = AffineApprox::calibrate(method, q, n_max)?;
            score_approx(q, approx, n_max)
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    debug!(steps, n_max, method = method.display_name(), "scored calibration grid");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lin_space_includes_endpoints() {
        let v = lin_space(0.5, 1.0, 6).unwrap();
        assert_eq!(v.len(), 6);
        assert!((v[0] - 0.5).abs() < 1e-12);
        assert!((v[1] - 0.6).abs() < 1e-12);
        assert_eq!(v[5], 1.0);
    }

    #[test]
    fn lin_space_rejects_bad_ranges() {
        assert_eq!(lin_space(0.2, 0.1, 5).unwrap_err().exit_code(), 2);
        assert!(lin_space(0.0, 1.5, 5).is_err());
        assert!(lin_space(0.1, 0.9, 1).is_err());
        assert!(lin_space(f64::NAN, 0.9, 3).is_err());
    }

    #[test]
    fn grid_keeps_order_and_is_exact_at_half() {
        let rows = calibration_grid(0.5, 0.9, 5, 11, ApproxMethod::Anchored).unwrap();
        assert_eq!(rows.len(), 5);
        for pair in rows.windows(2) {
            assert!(pair[0].q < pair[1].q);
        }
        // At q = 0.5 the exact curve is flat and the line reproduces it.
        assert!(rows[0].max_abs_error < 1e-12);
        assert!(rows[4].max_abs_error > rows[0].max_abs_error);
    }

    #[test]
    fn empty_panel_range_is_rejected() {
        let err = calibration_grid(0.5, 0.9, 5, 0, ApproxMethod::Anchored).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("n_max"));
        assert_eq!(calibration_grid(0.5, 0.9, 5, 1, ApproxMethod::Anchored).unwrap()[0].worst_n, 1);
    }

    #[test]
    fn anchored_error_vanishes_at_three() {
        let approx = AffineApprox::anchored(0.8).unwrap();
        let row = score_approx(0.8, approx, 3).unwrap();
        let e3 = approx.eval(3) - correct_guess_probability(3, 0.8).unwrap();
        assert!(e3.abs() < 1e-12);
        assert!(row.worst_n == 1 || row.worst_n == 2);
    }
}
