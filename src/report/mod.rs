//! Reporting utilities: curve diagnostics and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::SignalCurve;

/// Headline diagnostics for a signal sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSummary {
    /// Largest `|approx - exact|` over `n >= 1`.
    pub max_abs_error: f64,
    pub worst_n: u32,
    /// First panel size where the approximation leaves `[0, 1]`, if any.
    pub leaves_unit_interval_at: Option<u32>,
}

/// Summarize how well the approximation tracks the exact curve.
///
/// `n = 0` is skipped: the affine line is never calibrated against the empty panel.
pub fn summarize_curve(curve: &SignalCurve) -> CurveSummary {
    let mut max_abs_error = 0.0_f64;
    let mut worst_n = 0;
    let mut leaves_unit_interval_at = None;

    for r in curve.rows.iter().filter(|r| r.n >= 1) {
        let err = r.error().abs();
        if err > max_abs_error {
            max_abs_error = err;
            worst_n = r.n;
        }
        if leaves_unit_interval_at.is_none() && !(0.0..=1.0).contains(&r.approx) {
            leaves_unit_interval_at = Some(r.n);
        }
    }

    CurveSummary {
        max_abs_error,
        worst_n,
        leaves_unit_interval_at,
    }
}
