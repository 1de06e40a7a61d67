//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by sweeps and simulations
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::AffineApprox;

/// How the affine approximation is calibrated against the exact curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ApproxMethod {
    /// Through `P(3)` with the average `1 → 5` slope.
    #[default]
    Anchored,
    /// Least squares over `n = 1..=n_max`.
    LeastSquares,
}

impl ApproxMethod {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Anchored => "anchored",
            Self::LeastSquares => "least-squares",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Anchored => Self::LeastSquares,
            Self::LeastSquares => Self::Anchored,
        }
    }
}

/// Exact and approximate probability for one panel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    pub n: u32,
    pub exact: f64,
    pub approx: f64,
}

impl SignalRow {
    /// `approx - exact`.
    pub fn error(&self) -> f64 {
        self.approx - self.exact
    }
}

/// A sweep over `n = 0..=n_max` at fixed accuracy.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalCurve {
    pub q: f64,
    pub method: ApproxMethod,
    pub approx: AffineApprox,
    pub rows: Vec<SignalRow>,
}

/// Approximation quality at one grid accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub q: f64,
    pub approx: AffineApprox,
    pub max_abs_error: f64,
    pub rmse: f64,
    /// Panel size where `max_abs_error` is attained.
    pub worst_n: u32,
}

/// Outcome of a Monte-Carlo run of the majority-vote observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub n: u32,
    pub q: f64,
    pub trials: u64,
    pub correct: u64,
    pub rate: f64,
    pub std_error: f64,
    pub exact: f64,
}

impl SimulationResult {
    /// `(rate - exact) / std_error`, or `0` when the standard error vanishes.
    pub fn z_score(&self) -> f64 {
        if self.std_error > 0.0 {
            (self.rate - self.exact) / self.std_error
        } else {
            0.0
        }
    }
}

/// Portable JSON form of a [`SignalCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub q: f64,
    pub method: ApproxMethod,
    pub approx: AffineApprox,
    pub rows: Vec<SignalRow>,
}

impl CurveFile {
    pub fn from_curve(curve: &SignalCurve, generated_at: DateTime<Utc>) -> Self {
        Self {
            tool: "sg".to_string(),
            generated_at,
            q: curve.q,
            method: curve.method,
            approx: curve.approx,
            rows: curve.rows.clone(),
        }
    }

    pub fn into_curve(self) -> SignalCurve {
        SignalCurve {
            q: self.q,
            method: self.method,
            approx: self.approx,
            rows: self.rows,
        }
    }
}

/// Resolved settings for a curve/simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub q: f64,
    pub n_max: u32,
    pub method: ApproxMethod,
    pub trials: u64,
    pub seed: u64,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}
