//! Affine stand-ins for the exact correct-guess curve.
//!
//! Over the small panels of interest the exact curve `P(n, q)` is close to a
//! straight line in `n`. Two calibrations are offered:
//!
//! - **anchored**: slope is the average rise between `n = 1` and `n = 5`,
//!   `b = (P(5) - P(1)) / 4`, and the line passes exactly through `P(3)`,
//!   `a = P(3) - 3b`.
//! - **least squares**: ordinary least squares over every integer `n` in a range.
//!
//! Neither is clamped; for large `n` the line leaves `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::domain::ApproxMethod;
use crate::error::ModelError;
use crate::math::fit_line;
use crate::models::majority::{correct_guess_probability, validate_accuracy};

/// Signal counts the anchored calibration is built on.
pub const ANCHOR_LOW: u32 = 1;
pub const ANCHOR_MID: u32 = 3;
pub const ANCHOR_HIGH: u32 = 5;

/// `intercept + slope · n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineApprox {
    pub intercept: f64,
    pub slope: f64,
}

impl AffineApprox {
    /// Anchored calibration through `P(3, q)` with the `1 → 5` slope.
    pub fn anchored(q: f64) -> Result<Self, ModelError> {
        let low = correct_guess_probability(ANCHOR_LOW, q)?;
        let mid = correct_guess_probability(ANCHOR_MID, q)?;
        let high = correct_guess_probability(ANCHOR_HIGH, q)?;

        let slope = (high - low) / f64::from(ANCHOR_HIGH - ANCHOR_LOW);
        let intercept = mid - slope * f64::from(ANCHOR_MID);
        Ok(Self { intercept, slope })
    }

    /// Least-squares fit to the exact curve over `n_min..=n_max`.
    pub fn least_squares(q: f64, n_min: u32, n_max: u32) -> Result<Self, ModelError> {
        validate_accuracy(q)?;
        if n_max <= n_min {
            return Err(ModelError::Fit(format!(
                "need at least two signal counts, got range {n_min}..={n_max}"
            )));
        }

        let points = (n_min..=n_max)
            .map(|n| correct_guess_probability(n, q).map(|p| (f64::from(n), p)))
            .collect::<Result<Vec<_>, _>>()?;

        let fit = fit_line(&points, None)
            .ok_or_else(|| ModelError::Fit("least-squares system is ill-conditioned".to_string()))?;
        Ok(Self {
            intercept: fit.intercept,
            slope: fit.slope,
        })
    }

    /// Calibrate with `method`. `n_max` bounds the least-squares range (`1..=n_max`)
    /// and is ignored by the anchored method.
    pub fn calibrate(method: ApproxMethod, q: f64, n_max: u32) -> Result<Self, ModelError> {
        match method {
            ApproxMethod::Anchored => Self::anchored(q),
            ApproxMethod::LeastSquares => Self::least_squares(q, 1, n_max),
        }
    }

    pub fn eval(&self, n: u32) -> f64 {
        self.intercept + self.slope * f64::from(n)
    }
}

/// Anchored affine approximation of `P(n, q)`.
///
/// Recalibrates on every call; use [`AffineApprox::anchored`] directly to reuse
/// the coefficients across many `n`.
pub fn linear_approx_probability(n: u32, q: f64) -> Result<f64, ModelError> {
    Ok(AffineApprox::anchored(q)?.eval(n))
}
