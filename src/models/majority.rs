//! Exact probability that a majority-vote observer guesses correctly.
//!
//! The observer sees `n` independent binary signals, each correct with
//! probability `q`, and guesses whatever the majority says. An exact tie (only
//! possible for even `n`) is broken by a fair coin. With `k` incorrect signals
//! the outcome class has probability `C(n, n-k) q^(n-k) (1-q)^k`, so
//!
//! ```text
//! P(n, q) = Σ_{k < n/2} C(n, n-k) q^(n-k) (1-q)^k  +  ½ · [n even] · C(n, n/2) (q(1-q))^(n/2)
//! ```
//!
//! Useful identities (checked in tests):
//! - `P(0, q) = ½` (no signals: pure coin flip)
//! - `P(1, q) = q`
//! - `P(2m, q) = P(2m - 1, q)` (adding one signal to an odd panel never helps)
//! - `P(n, ½) = ½`

use crate::error::ModelError;
use crate::math::combination;

/// Largest signal count whose binomial coefficients stay finite in `f64`.
pub const MAX_SIGNALS: u32 = 1000;

/// Reject accuracies that are not finite or lie outside `[0, 1]`.
pub fn validate_accuracy(q: f64) -> Result<(), ModelError> {
    if q.is_finite() && (0.0..=1.0).contains(&q) {
        Ok(())
    } else {
        Err(ModelError::Probability(q))
    }
}

/// Exact probability of a correct majority-vote guess from `n` signals of accuracy `q`.
pub fn correct_guess_probability(n: u32, q: f64) -> Result<f64, ModelError> {
    validate_accuracy(q)?;
    if n > MAX_SIGNALS {
        return Err(ModelError::TooManySignals { n, max: MAX_SIGNALS });
    }

    let half = n / 2;
    let has_tie = n % 2 == 0;
    let miss = 1.0 - q;

    let mut prob = 0.0;
    for wrong in 0..=half {
        let right = n - wrong;
        let mass = combination(n, right)? * q.powi(right as i32) * miss.powi(wrong as i32);
        if has_tie && wrong == half {
            prob += 0.5 * mass;
        } else {
            prob += mass;
        }
    }
    Ok(prob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn single_signal_is_its_own_accuracy() {
        assert!((correct_guess_probability(1, 0.7).unwrap() - 0.7).abs() < TOL);
    }

    #[test]
    fn three_signals_at_seventy_percent() {
        // 0.7^3 + 3 · 0.7^2 · 0.3
        let p = correct_guess_probability(3, 0.7).unwrap();
        assert!((p - 0.784).abs() < TOL, "got {p}");
    }

    #[test]
    fn five_signals_at_seventy_percent() {
        let p = correct_guess_probability(5, 0.7).unwrap();
        assert!((p - 0.83692).abs() < TOL, "got {p}");
    }

    #[test]
    fn zero_signals_is_a_coin_flip() {
        for &q in &[0.0, 0.3, 1.0] {
            assert!((correct_guess_probability(0, q).unwrap() - 0.5).abs() < TOL);
        }
    }

    #[test]
    fn even_panel_matches_preceding_odd_panel() {
        for m in 1..20u32 {
            for &q in &[0.1, 0.55, 0.7, 0.95] {
                let even = correct_guess_probability(2 * m, q).unwrap();
                let odd = correct_guess_probability(2 * m - 1, q).unwrap();
                assert!((even - odd).abs() < 1e-10, "m={m} q={q}: {even} vs {odd}");
            }
        }
    }

    #[test]
    fn certain_signals_give_certain_guesses() {
        for n in 1..30u32 {
            assert!((correct_guess_probability(n, 1.0).unwrap() - 1.0).abs() < TOL);
            assert!(correct_guess_probability(n, 0.0).unwrap().abs() < TOL);
        }
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(correct_guess_probability(3, 1.2), Err(ModelError::Probability(1.2)));
        assert_eq!(correct_guess_probability(3, -0.1), Err(ModelError::Probability(-0.1)));
        assert!(matches!(
            correct_guess_probability(3, f64::NAN),
            Err(ModelError::Probability(_))
        ));
        assert_eq!(
            correct_guess_probability(MAX_SIGNALS + 1, 0.5),
            Err(ModelError::TooManySignals { n: MAX_SIGNALS + 1, max: MAX_SIGNALS })
        );
    }

    #[test]
    fn large_panels_stay_in_unit_interval() {
        let p = correct_guess_probability(MAX_SIGNALS, 0.51).unwrap();
        assert!(p.is_finite() && (0.0..=1.0 + 1e-9).contains(&p), "got {p}");
    }

    proptest! {
        #[test]
        fn fair_signals_give_fair_guesses(n in 1u32..200) {
            let p = correct_guess_probability(n, 0.5).unwrap();
            prop_assert!((p - 0.5).abs() < 1e-9, "n={} p={}", n, p);
        }

        #[test]
        fn single_signal_identity(q in 0.0f64..=1.0) {
            prop_assert!((correct_guess_probability(1, q).unwrap() - q).abs() < TOL);
        }

        #[test]
        fn non_decreasing_in_accuracy(n in 0u32..60, a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = correct_guess_probability(n, lo).unwrap();
            let p_hi = correct_guess_probability(n, hi).unwrap();
            prop_assert!(p_lo <= p_hi + 1e-12, "n={} P({})={} > P({})={}", n, lo, p_lo, hi, p_hi);
        }

        #[test]
        fn lies_in_unit_interval(n in 0u32..200, q in 0.0f64..=1.0) {
            let p = correct_guess_probability(n, q).unwrap();
            prop_assert!((-1e-12..=1.0 + 1e-12).contains(&p));
        }
    }
}
