//! Weighted least squares for straight-line fits.
//!
//! The least-squares calibration of the affine approximation solves
//!
//! ```text
//! minimize Σ w_i (y_i - a - b·x_i)^2
//! ```
//!
//! Rows are scaled by `sqrt(w_i)` and the resulting tall system is solved with
//! SVD, which stays well-behaved when all `x_i` are nearly equal.

use nalgebra::{DMatrix, DVector};

/// Intercept and slope of a fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

/// Fit `y = intercept + slope·x` through `(x, y)` points.
///
/// `weights`, when given, must match `points` in length; non-positive weights drop
/// the row. Returns `None` if fewer than two usable rows remain or the system is
/// too ill-conditioned to solve.
pub fn fit_line(points: &[(f64, f64)], weights: Option<&[f64]>) -> Option<LineFit> {
    if let Some(w) = weights {
        if w.len() != points.len() {
            return None;
        }
    }

    let rows: Vec<(f64, f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| (x, y, weights.map_or(1.0, |w| w[i])))
        .filter(|&(x, y, w)| x.is_finite() && y.is_finite() && w.is_finite() && w > 0.0)
        .collect();
    if rows.len() < 2 {
        return None;
    }

    let mut design = DMatrix::<f64>::zeros(rows.len(), 2);
    let mut target = DVector::<f64>::zeros(rows.len());
    for (i, &(x, y, w)) in rows.iter().enumerate() {
        let sw = w.sqrt();
        design[(i, 0)] = sw;
        design[(i, 1)] = sw * x;
        target[i] = sw * y;
    }

    let beta = solve_svd(design, &target)?;
    Some(LineFit {
        intercept: beta[0],
        slope: beta[1],
    })
}

fn solve_svd(x: DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.svd(true, true);

    // A rank-deficient design (every x identical) has a singular value of ~0; we
    // refuse it instead of returning a minimum-norm slope of zero.
    let smallest = svd.singular_values.iter().copied().fold(f64::INFINITY, f64::min);
    if !(smallest.is_finite() && smallest > 1e-12) {
        return None;
    }

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
