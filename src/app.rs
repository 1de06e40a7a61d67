//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves settings (flags > environment > defaults)
//! - evaluates the model, sweeps, grids and simulations
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{BinomArgs, Command, CurveArgs, GridArgs, LinearArgs, PlotArgs, PointArgs, SimulateArgs};
use crate::config::Settings;
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::models::{AffineApprox, MAX_SIGNALS, correct_guess_probability};

pub mod pipeline;

/// Entry point for the `sg` binary.
pub fn run() -> Result<(), AppError> {
    // We want `sg` and `sg -q 0.8` to behave like `sg tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    if matches!(cli.command, Command::Tui(_)) {
        crate::logging::init_quiet();
    } else {
        crate::logging::init(cli.verbose);
    }

    let settings = Settings::from_env()?;

    match cli.command {
        Command::Prob(args) => handle_prob(&args, &settings),
        Command::Linear(args) => handle_linear(&args, &settings),
        Command::Binom(args) => handle_binom(&args),
        Command::Curve(args) => handle_curve(&args, &settings),
        Command::Grid(args) => handle_grid(&args, &settings),
        Command::Simulate(args) => handle_simulate(&args, &settings),
        Command::Plot(args) => handle_plot(&args),
        Command::Tui(args) => crate::tui::run(run_config_from_args(&args, &settings)),
    }
}

fn handle_prob(args: &PointArgs, settings: &Settings) -> Result<(), AppError> {
    let q = args.q.unwrap_or(settings.q);
    let p = correct_guess_probability(args.signals, q)?;
    println!("{p:.10}");
    Ok(())
}

fn handle_linear(args: &LinearArgs, settings: &Settings) -> Result<(), AppError> {
    let value = linear_value(args, settings)?;
    println!("{value:.10}");
    Ok(())
}

/// The affine line is defined for every `n`; the exact value is only logged
/// when it is computable.
fn linear_value(args: &LinearArgs, settings: &Settings) -> Result<f64, AppError> {
    let q = args.point.q.unwrap_or(settings.q);
    let n_max = args.n_max.unwrap_or(settings.n_max);
    let n = args.point.signals;
    let approx = AffineApprox::calibrate(args.method, q, n_max)?;
    let value = approx.eval(n);

    let exact = (n <= MAX_SIGNALS)
        .then(|| correct_guess_probability(n, q).ok())
        .flatten();
    info!(
        method = args.method.display_name(),
        intercept = approx.intercept,
        slope = approx.slope,
        exact = ?exact,
        "affine approximation"
    );
    Ok(value)
}

fn handle_binom(args: &BinomArgs) -> Result<(), AppError> {
    let c = crate::math::combination(args.n, args.r)?;
    println!("{c}");
    Ok(())
}

fn handle_curve(args: &CurveArgs, settings: &Settings) -> Result<(), AppError> {
    let config = run_config_from_args(args, settings);
    let run = pipeline::run_curve(&config, args.simulate)?;

    println!("{}", crate::report::format_curve_summary(&run.curve));
    println!("{}", crate::report::format_curve_table(&run.curve));
    if let Some(sim) = &run.simulation {
        println!("{}", crate::report::format_simulation(sim));
    }

    if config.plot {
        let plot = crate::plot::render_curve_plot(
            &run.curve,
            run.simulation.as_deref(),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_curve_csv(path, &run.curve)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::curve::write_curve_json(path, &run.curve)?;
    }

    Ok(())
}

fn handle_grid(args: &GridArgs, settings: &Settings) -> Result<(), AppError> {
    let n_max = args.n_max.unwrap_or(settings.n_max);
    let rows = crate::sweep::calibration_grid(args.q_min, args.q_max, args.steps, n_max, args.method)?;
    println!("{}", crate::report::format_grid(&rows, args.method, n_max));
    Ok(())
}

fn handle_simulate(args: &SimulateArgs, settings: &Settings) -> Result<(), AppError> {
    let q = args.q.unwrap_or(settings.q);
    let trials = args.trials.unwrap_or(settings.trials);
    let seed = args.seed.unwrap_or(settings.seed);

    let results = match args.signals {
        Some(n) => vec![crate::simulate::simulate_majority(n, q, trials, seed)?],
        None => {
            let n_max = args.n_max.unwrap_or(settings.n_max);
            crate::simulate::simulate_curve(q, n_max, trials, seed)?
        }
    };

    println!("{}", crate::report::format_simulation(&results));
    Ok(())
}

fn handle_plot(args: &PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?.into_curve();
    let plot = crate::plot::render_curve_plot(&curve, None, args.width, args.height);

    println!("{plot}");
    Ok(())
}

pub fn run_config_from_args(args: &CurveArgs, settings: &Settings) -> RunConfig {
    RunConfig {
        q: args.q.unwrap_or(settings.q),
        n_max: args.n_max.unwrap_or(settings.n_max),
        method: args.method,
        trials: args.trials.unwrap_or(settings.trials),
        seed: args.seed.unwrap_or(settings.seed),
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

const SUBCOMMANDS: [&str; 8] = ["prob", "linear", "binom", "curve", "grid", "simulate", "plot", "tui"];

/// Rewrite argv so `sg` defaults to `sg tui`.
///
/// Rules:
/// - `sg`                      -> `sg tui`
/// - `sg -q 0.8 ...`           -> `sg tui -q 0.8 ...`
/// - `sg -v curve ...`         -> unchanged (a subcommand is present)
/// - `sg --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // Only `-v`/`--verbose` may precede the subcommand; anything after the first
    // other token is a subcommand argument, not a subcommand name.
    let has_subcommand = argv[1..]
        .iter()
        .find(|a| !is_verbosity_flag(a.as_str()))
        .is_some_and(|a| SUBCOMMANDS.contains(&a.as_str()));
    if has_subcommand {
        return argv;
    }

    // Only flags: treat them as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose"
        || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}
