//! Exact vs approximate probability over a range of panel sizes.

use tracing::debug;

use crate::domain::{ApproxMethod, SignalCurve, SignalRow};
use crate::error::ModelError;
use crate::models::{AffineApprox, correct_guess_probability};

/// Evaluate both curves for every `n` in `0..=n_max`.
pub fn sweep_signals(q: f64, n_max: u32, method: ApproxMethod) -> Result<SignalCurve, ModelError> {
    let approx = AffineApprox::calibrate(method, q, n_max)?;

    let mut rows = Vec::with_capacity(n_max as usize + 1);
    for n in 0..=n_max {
        rows.push(SignalRow {
            n,
            exact: correct_guess_probability(n, q)?,
            approx: approx.eval(n),
        });
    }

    debug!(
        q,
        n_max,
        method = method.display_name(),
        intercept = approx.intercept,
        slope = approx.slope,
        "swept signal curve"
    );

    Ok(SignalCurve {
        q,
        method,
        approx,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_cover_zero_through_n_max() {
        let curve = sweep_signals(0.7, 9, ApproxMethod::Anchored).unwrap();
        assert_eq!(curve.rows.len(), 10);
        assert_eq!(curve.rows[0].n, 0);
        assert_eq!(curve.rows[9].n, 9);
        assert!((curve.rows[0].exact - 0.5).abs() < 1e-12);
        assert!((curve.rows[3].exact - 0.784).abs() < 1e-12);
        assert!(curve.rows[3].error().abs() < 1e-12);
    }

    #[test]
    fn least_squares_sweep_needs_two_points() {
        assert!(sweep_signals(0.7, 1, ApproxMethod::LeastSquares).is_err());
        assert!(sweep_signals(0.7, 2, ApproxMethod::LeastSquares).is_ok());
    }

    #[test]
    fn propagates_accuracy_errors() {
        assert_eq!(
            sweep_signals(1.5, 5, ApproxMethod::Anchored),
            Err(ModelError::Probability(1.5))
        );
    }
}
