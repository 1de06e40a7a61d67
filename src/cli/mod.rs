//! Command-line parsing for the correct-guess probability tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.
//!
//! Numeric settings that also have an environment default (`q`, `n_max`,
//! `trials`, `seed`) are optional here and resolved in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ApproxMethod;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sg", version, about = "Majority-vote correct-guess probabilities for social learning")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `SG_LOG` overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exact probability of a correct majority-vote guess.
    Prob(PointArgs),
    /// Affine approximation of the correct-guess probability.
    Linear(LinearArgs),
    /// Binomial coefficient C(n, r).
    Binom(BinomArgs),
    /// Sweep n = 0..=n_max, print exact vs approximate, and optionally plot/export.
    Curve(CurveArgs),
    /// Score the approximation over a grid of accuracies.
    Grid(GridArgs),
    /// Monte-Carlo check of the exact probability.
    Simulate(SimulateArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `sg curve`, but renders results
    /// in a terminal UI using Ratatui.
    Tui(CurveArgs),
}

/// A single `(n, q)` evaluation.
#[derive(Debug, Args, Clone)]
pub struct PointArgs {
    /// Number of signals observed.
    #[arg(short = 'n', long)]
    pub signals: u32,

    /// Per-signal accuracy in [0, 1] (default: SG_Q or 0.7).
    #[arg(short = 'q', long)]
    pub q: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct LinearArgs {
    #[command(flatten)]
    pub point: PointArgs,

    /// Calibration of the affine approximation.
    #[arg(long, value_enum, default_value_t = ApproxMethod::Anchored)]
    pub method: ApproxMethod,

    /// Upper end of the least-squares range (default: SG_N_MAX or 15).
    #[arg(long)]
    pub n_max: Option<u32>,
}

#[derive(Debug, Args, Clone)]
pub struct BinomArgs {
    pub n: u32,
    pub r: u32,
}

/// Options shared by `curve` and `tui`.
#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    /// Per-signal accuracy in [0, 1] (default: SG_Q or 0.7).
    #[arg(short = 'q', long)]
    pub q: Option<f64>,

    /// Largest panel size (default: SG_N_MAX or 15).
    #[arg(short = 'n', long)]
    pub n_max: Option<u32>,

    /// Calibration of the affine approximation.
    #[arg(long, value_enum, default_value_t = ApproxMethod::Anchored)]
    pub method: ApproxMethod,

    /// Also run the Monte-Carlo simulation for every panel size.
    #[arg(long)]
    pub simulate: bool,

    /// Monte-Carlo trials per panel size (default: SG_TRIALS or 10000).
    #[arg(long)]
    pub trials: Option<u64>,

    /// Monte-Carlo seed (default: SG_SEED or 42).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Export the curve to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the curve (coefficients + rows) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct GridArgs {
    /// Lowest accuracy on the grid.
    #[arg(long, default_value_t = 0.5)]
    pub q_min: f64,

    /// Highest accuracy on the grid.
    #[arg(long, default_value_t = 1.0)]
    pub q_max: f64,

    /// Number of grid points (inclusive endpoints).
    #[arg(long, default_value_t = 11)]
    pub steps: usize,

    /// Largest panel size scored (default: SG_N_MAX or 15).
    #[arg(short = 'n', long)]
    pub n_max: Option<u32>,

    /// Calibration of the affine approximation.
    #[arg(long, value_enum, default_value_t = ApproxMethod::Anchored)]
    pub method: ApproxMethod,
}

#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    /// Per-signal accuracy in [0, 1] (default: SG_Q or 0.7).
    #[arg(short = 'q', long)]
    pub q: Option<f64>,

    /// Simulate a single panel size instead of 1..=n_max.
    #[arg(long)]
    pub signals: Option<u32>,

    /// Largest panel size (default: SG_N_MAX or 15).
    #[arg(short = 'n', long)]
    pub n_max: Option<u32>,

    /// Trials per panel size (default: SG_TRIALS or 10000).
    #[arg(long)]
    pub trials: Option<u64>,

    /// Seed (default: SG_SEED or 42).
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Curve JSON file produced by `sg curve --export-json`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_curve_flags() {
        let cli = Cli::try_parse_from([
            "sg", "-vv", "curve", "-q", "0.6", "-n", "9", "--method", "least-squares", "--simulate",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Curve(args) = cli.command else {
            panic!("expected curve");
        };
        assert_eq!(args.q, Some(0.6));
        assert_eq!(args.n_max, Some(9));
        assert_eq!(args.method, ApproxMethod::LeastSquares);
        assert!(args.simulate);
        assert!(args.trials.is_none());
    }

    #[test]
    fn negative_signal_count_is_rejected() {
        assert!(Cli::try_parse_from(["sg", "prob", "-n", "-3"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
