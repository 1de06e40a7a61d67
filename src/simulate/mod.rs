//! Monte-Carlo simulation of the majority-vote observer.
//!
//! Each trial draws the number of correct signals from `Binomial(n, q)`, takes the
//! majority and breaks exact ties with a fair coin. The empirical correct rate is
//! reported next to the exact probability so the closed form can be checked
//! against the process it models.
//!
//! Runs are reproducible: the RNG seed is derived from `(seed, n, q)` with a
//! fixed SplitMix64 mix, so the per-panel results of [`simulate_curve`] depend
//! on neither thread scheduling nor the toolchain.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Binomial;
use rayon::prelude::*;
use tracing::debug;

use crate::domain::SimulationResult;
use crate::error::AppError;
use crate::models::{MAX_SIGNALS, correct_guess_probability, validate_accuracy};

/// Simulate `trials` guesses from panels of `n` signals with accuracy `q`.
pub fn simulate_majority(n: u32, q: f64, trials: u64, seed: u64) -> Result<SimulationResult, AppError> {
    validate_accuracy(q)?;
    if trials == 0 {
        return Err(AppError::new(2, "Simulation trials must be > 0."));
    }
    if n > MAX_SIGNALS {
        return Err(AppError::new(
            2,
            format!("Simulation panel n={n} exceeds the supported maximum of {MAX_SIGNALS}."),
        ));
    }

    let exact = correct_guess_probability(n, q)?;
    let binomial = Binomial::new(u64::from(n), q)
        .map_err(|e| AppError::new(4, format!("Signal distribution error: {e}")))?;
    let mut rng = StdRng::seed_from_u64(panel_seed(seed, n, q));

    let n = u64::from(n);
    let mut correct = 0u64;
    for _ in 0..trials {
        let right = binomial.sample(&mut rng);
        let wrong = n - right;
        let guessed_right = match right.cmp(&wrong) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => rng.gen_bool(0.5),
        };
        if guessed_right {
            correct += 1;
        }
    }

    let rate = correct as f64 / trials as f64;
    let std_error = (rate * (1.0 - rate) / trials as f64).sqrt();

    Ok(SimulationResult {
        n: n as u32,
        q,
        trials,
        correct,
        rate,
        std_error,
        exact,
    })
}

/// Simulate every panel size in `1..=n_max` (parallel, ordered by `n`).
pub fn simulate_curve(q: f64, n_max: u32, trials: u64, seed: u64) -> Result<Vec<SimulationResult>, AppError> {
    if n_max == 0 {
        return Err(AppError::new(2, "Simulation requires n_max >= 1."));
    }

    let results = (1..=n_max)
        .into_par_iter()
        .map(|n| simulate_majority(n, q, trials, seed))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(q, n_max, trials, seed, "simulated majority-vote curve");
    Ok(results)
}

fn panel_seed(seed: u64, n: u32, q: f64) -> u64 {
    splitmix64(splitmix64(splitmix64(seed) ^ u64::from(n)) ^ q.to_bits())
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_seeds_are_fixed_and_distinct() {
        assert_eq!(splitmix64(0), 0xE220_A839_7B1D_CDAF);
        assert_eq!(panel_seed(42, 3, 0.7), panel_seed(42, 3, 0.7));
        assert_eq!(
            panel_seed(42, 3, 0.7),
            splitmix64(splitmix64(splitmix64(42) ^ 3) ^ 0.7f64.to_bits())
        );
        assert_ne!(panel_seed(42, 3, 0.7), panel_seed(42, 4, 0.7));
        assert_ne!(panel_seed(42, 3, 0.7), panel_seed(43, 3, 0.7));
        assert_ne!(panel_seed(42, 3, 0.7), panel_seed(42, 3, 0.71));
    }

    #[test]
    fn same_seed_same_result() {
        let a = simulate_majority(5, 0.7, 2_000, 7).unwrap();
        let b = simulate_majority(5, 0.7, 2_000, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_accuracies_are_deterministic() {
        let sure = simulate_majority(4, 1.0, 500, 1).unwrap();
        assert_eq!(sure.correct, 500);
        let never = simulate_majority(3, 0.0, 500, 1).unwrap();
        assert_eq!(never.correct, 0);
        assert_eq!(never.std_error, 0.0);
    }

    #[test]
    fn empirical_rate_tracks_exact_probability() {
        for n in [1u32, 2, 3, 6, 9] {
            let r = simulate_majority(n, 0.7, 40_000, 42).unwrap();
            // 40k trials: standard error is ~0.0023, so 0.015 is over six sigma.
            assert!(
                (r.rate - r.exact).abs() < 0.015,
                "n={n}: rate {} vs exact {}",
                r.rate,
                r.exact
            );
        }
    }

    #[test]
    fn zero_signals_fall_back_to_coin_flips() {
        let r = simulate_majority(0, 0.9, 40_000, 3).unwrap();
        assert!((r.exact - 0.5).abs() < 1e-12);
        assert!((r.rate - 0.5).abs() < 0.015);
    }

    #[test]
    fn curve_is_ordered_by_panel_size() {
        let curve = simulate_curve(0.6, 6, 200, 11).unwrap();
        let ns: Vec<u32> = curve.iter().map(|r| r.n).collect();
        assert_eq!(ns, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(curve[2], simulate_majority(3, 0.6, 200, 11).unwrap());
    }

    #[test]
    fn rejects_invalid_settings() {
        assert_eq!(simulate_majority(3, 0.7, 0, 1).unwrap_err().exit_code(), 2);
        assert_eq!(simulate_majority(3, 1.7, 10, 1).unwrap_err().exit_code(), 2);
        assert!(simulate_curve(0.7, 0, 10, 1).is_err());
    }
}
