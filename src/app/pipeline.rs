//! Shared "curve pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! calibrate -> sweep -> summarize -> (optional) simulate
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::debug;

use crate::domain::{RunConfig, SignalCurve, SimulationResult};
use crate::error::AppError;
use crate::report::{CurveSummary, summarize_curve};

/// All computed outputs of a single curve run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub curve: SignalCurve,
    pub summary: CurveSummary,
    pub simulation: Option<Vec<SimulationResult>>,
}

/// Sweep the curve for `config`, simulating each panel when `simulate` is set.
pub fn run_curve(config: &RunConfig, simulate: bool) -> Result<RunOutput, AppError> {
    let curve = crate::sweep::sweep_signals(config.q, config.n_max, config.method)?;
    let summary = summarize_curve(&curve);

    let simulation = if simulate {
        Some(crate::simulate::simulate_curve(
            config.q,
            config.n_max,
            config.trials,
            config.seed,
        )?)
    } else {
        None
    };

    debug!(
        q = config.q,
        n_max = config.n_max,
        max_abs_error = summary.max_abs_error,
        simulated = simulate,
        "curve run complete"
    );

    Ok(RunOutput {
        curve,
        summary,
        simulation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApproxMethod;

    fn config() -> RunConfig {
        RunConfig {
            q: 0.7,
            n_max: 6,
            method: ApproxMethod::Anchored,
            trials: 500,
            seed: 3,
            plot: false,
            plot_width: 60,
            plot_height: 15,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn runs_with_and_without_simulation() {
        let plain = run_curve(&config(), false).unwrap();
        assert_eq!(plain.curve.rows.len(), 7);
        assert!(plain.simulation.is_none());

        let sim = run_curve(&config(), true).unwrap();
        assert_eq!(sim.simulation.as_ref().map(Vec::len), Some(6));
        assert_eq!(sim.curve, plain.curve);
    }

    #[test]
    fn invalid_accuracy_is_an_input_error() {
        let mut cfg = config();
        cfg.q = 1.01;
        assert_eq!(run_curve(&cfg, false).unwrap_err().exit_code(), 2);
    }
}
