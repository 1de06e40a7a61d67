//! Debug bundle writer for inspecting curves across several accuracies.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::domain::{ApproxMethod, RunConfig};
use crate::error::AppError;
use crate::report::summarize_curve;
use crate::simulate::simulate_curve;
use crate::sweep::{score_approx, sweep_signals};

/// Accuracies every bundle covers, in addition to the configured one.
pub const BUNDLE_ACCURACIES: [f64; 5] = [0.55, 0.6, 0.7, 0.8, 0.9];

/// Write a markdown bundle under `dir` and return its path.
pub fn write_debug_bundle(dir: &Path, config: &RunConfig) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("sg_debug_q{:.3}_seed{}_{ts}.md", config.q, config.seed));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    write_bundle(&mut file, config)?;

    info!(path = %path.display(), "wrote debug bundle");
    Ok(path)
}

fn write_bundle<W: Write>(out: &mut W, config: &RunConfig) -> Result<(), AppError> {
    let err = |e: std::io::Error| AppError::new(4, format!("Failed to write debug: {e}"));
    // Least squares needs two panel sizes; every table below uses this range.
    let n_max = config.n_max.max(2);

    writeln!(out, "# sg debug bundle").map_err(err)?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339()).map_err(err)?;
    writeln!(out, "- q: {}", config.q).map_err(err)?;
    writeln!(out, "- n_max: {n_max}").map_err(err)?;
    writeln!(out, "- method: {}", config.method.display_name()).map_err(err)?;
    writeln!(out, "- trials: {} | seed: {}", config.trials, config.seed).map_err(err)?;

    let mut accuracies = BUNDLE_ACCURACIES.to_vec();
    if !accuracies.iter().any(|&q| (q - config.q).abs() < 1e-12) {
        accuracies.push(config.q);
        accuracies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    }

    writeln!(out, "\n## Calibrations").map_err(err)?;
    writeln!(out, "| q | method | intercept | slope | max_err | rmse | worst_n |").map_err(err)?;
    writeln!(out, "| - | - | - | - | - | - | - |").map_err(err)?;
    for &q in &accuracies {
        for method in [ApproxMethod::Anchored, ApproxMethod::LeastSquares] {
            let curve = sweep_signals(q, n_max, method)?;
            let row = score_approx(q, curve.approx, n_max)?;
            writeln!(
                out,
                "| {:.3} | {} | {:.6} | {:.6} | {:.6} | {:.6} | {} |",
                q,
                method.display_name(),
                row.approx.intercept,
                row.approx.slope,
                row.max_abs_error,
                row.rmse,
                row.worst_n
            )
            .map_err(err)?;
        }
    }

    for &q in &accuracies {
        let curve = sweep_signals(q, n_max, config.method)?;
        let summary = summarize_curve(&curve);
        let sim = simulate_curve(q, n_max, config.trials, config.seed)?;

        writeln!(out, "\n## q = {q:.3}").map_err(err)?;
        if let Some(n) = summary.leaves_unit_interval_at {
            writeln!(out, "approx leaves [0, 1] at n={n}").map_err(err)?;
        }
        writeln!(out, "| n | exact | approx | error | simulated | z |").map_err(err)?;
        writeln!(out, "| - | - | - | - | - | - |").map_err(err)?;
        for r in &curve.rows {
            let s = sim.iter().find(|s| s.n == r.n);
            writeln!(
                out,
                "| {} | {:.6} | {:.6} | {:+.6} | {} | {} |",
                r.n,
                r.exact,
                r.approx,
                r.error(),
                fmt_opt(s.map(|s| s.rate)),
                fmt_opt(s.map(|s| s.z_score()))
            )
            .map_err(err)?;
        }
    }

    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.3}"),
        _ => "-".to_string(),
    }
}
