//! Formatted terminal output for sweeps, grids and simulations.
//!
//! We keep formatting code in one place so:
//! - the model code stays clean and testable
//! - output changes are localized (snapshot tests below)

use crate::domain::{ApproxMethod, GridRow, SignalCurve, SimulationResult};
use crate::models::AffineApprox;
use crate::report::summarize_curve;

/// Header block for a signal sweep: accuracy, coefficients and diagnostics.
pub fn format_curve_summary(curve: &SignalCurve) -> String {
    let summary = summarize_curve(curve);
    let mut out = String::new();

    out.push_str("=== sg - majority-vote correct-guess curve ===\n");
    out.push_str(&format!("q: {:.4} | n: 0..={}\n", curve.q, curve.rows.len().saturating_sub(1)));
    out.push_str(&format!(
        "approx ({}): {}\n",
        curve.method.display_name(),
        fmt_affine(&curve.approx)
    ));
    out.push_str(&format!(
        "max |approx - exact| = {:.6} at n={}\n",
        summary.max_abs_error, summary.worst_n
    ));
    match summary.leaves_unit_interval_at {
        Some(n) => out.push_str(&format!("approx leaves [0, 1] at n={n}\n")),
        None => out.push_str("approx stays within [0, 1]\n"),
    }
    out.push('\n');

    out
}

/// One row per panel size.
pub fn format_curve_table(curve: &SignalCurve) -> String {
    let mut out = String::new();
    push_row(&mut out, format!("{:>5} {:>10} {:>10} {:>10}", "n", "exact", "approx", "error"));
    push_row(&mut out, format!("{:->5} {:->10} {:->10} {:->10}", "", "", "", ""));
    for r in &curve.rows {
        push_row(
            &mut out,
            format!("{:>5} {:>10.6} {:>10.6} {:>+10.6}", r.n, r.exact, r.approx, r.error()),
        );
    }
    out
}

/// Approximation quality per grid accuracy.
pub fn format_grid(rows: &[GridRow], method: ApproxMethod, n_max: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Calibration grid ({}, n=1..={}):\n",
        method.display_name(),
        n_max.max(1)
    ));
    push_row(
        &mut out,
        format!(
            "{:>7} {:>10} {:>10} {:>10} {:>10} {:>7}",
            "q", "intercept", "slope", "max_err", "rmse", "worst_n"
        ),
    );
    push_row(
        &mut out,
        format!("{:->7} {:->10} {:->10} {:->10} {:->10} {:->7}", "", "", "", "", "", ""),
    );
    for r in rows {
        push_row(
            &mut out,
            format!(
                "{:>7.4} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>7}",
                r.q, r.approx.intercept, r.approx.slope, r.max_abs_error, r.rmse, r.worst_n
            ),
        );
    }
    out
}

/// Empirical vs exact rate per simulated panel.
pub fn format_simulation(results: &[SimulationResult]) -> String {
    let mut out = String::new();
    if let Some(first) = results.first() {
        out.push_str(&format!(
            "Simulation: q={:.4} | trials per n={}\n",
            first.q, first.trials
        ));
    }
    push_row(
        &mut out,
        format!("{:>5} {:>10} {:>10} {:>10} {:>7}", "n", "empirical", "exact", "std_err", "z"),
    );
    push_row(&mut out, format!("{:->5} {:->10} {:->10} {:->10} {:->7}", "", "", "", "", ""));
    for r in results {
        push_row(
            &mut out,
            format!(
                "{:>5} {:>10.6} {:>10.6} {:>10.6} {:>+7.2}",
                r.n,
                r.rate,
                r.exact,
                r.std_error,
                r.z_score()
            ),
        );
    }
    out
}

pub fn fmt_affine(approx: &AffineApprox) -> String {
    format!("{:.6} + {:.6}·n", approx.intercept, approx.slope)
}

fn push_row(out: &mut String, row: String) {
    out.push_str(row.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignalRow;

    fn tiny_curve() -> SignalCurve {
        SignalCurve {
            q: 0.7,
            method: ApproxMethod::Anchored,
            approx: AffineApprox {
                intercept: 0.68131,
                slope: 0.03423,
            },
            rows: vec![
                SignalRow { n: 1, exact: 0.7, approx: 0.71554 },
                SignalRow { n: 3, exact: 0.784, approx: 0.784 },
            ],
        }
    }

    #[test]
    fn curve_table_snapshot() {
        let expected = concat!(
            "    n      exact     approx      error\n",
            "----- ---------- ---------- ----------\n",
            "    1   0.700000   0.715540  +0.015540\n",
            "    3   0.784000   0.784000  +0.000000\n",
        );
        assert_eq!(format_curve_table(&tiny_curve()), expected);
    }

    #[test]
    fn summary_mentions_coefficients() {
        let txt = format_curve_summary(&tiny_curve());
        assert!(txt.contains("approx (anchored): 0.681310 + 0.034230·n"));
        assert!(txt.contains("at n=1"));
        assert!(txt.contains("stays within [0, 1]"));
    }

    #[test]
    fn simulation_table_has_row_per_panel() {
        let results = vec![SimulationResult {
            n: 3,
            q: 0.7,
            trials: 100,
            correct: 80,
            rate: 0.8,
            std_error: 0.04,
            exact: 0.784,
        }];
        let txt = format_simulation(&results);
        assert!(txt.starts_with("Simulation: q=0.7000 | trials per n=100\n"));
        assert!(txt.lines().last().unwrap().ends_with("+0.40"));
    }

    #[test]
    fn grid_header_names_method() {
        let txt = format_grid(&[], ApproxMethod::LeastSquares, 9);
        assert!(txt.starts_with("Calibration grid (least-squares, n=1..=9):"));
        assert_eq!(txt.lines().count(), 3);
    }
}
