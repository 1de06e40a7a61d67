//! Binomial coefficients.
//!
//! `C(n, r)` is evaluated with the multiplicative formula over `min(r, n - r)`
//! factors rather than three factorials:
//!
//! ```text
//! C(n, k) = Π_{i=1..k} (n - k + i) / i
//! ```
//!
//! Every partial product is itself a binomial coefficient, so the running value
//! stays integral and is exact as long as it fits the 53-bit mantissa of `f64`.
//! Folding `r` onto `min(r, n - r)` makes `C(n, r) == C(n, n - r)` hold
//! bit-for-bit.

use crate::error::ModelError;

/// Compute `C(n, r)` as a real number.
///
/// Returns [`ModelError::Domain`] when `r > n` and [`ModelError::Overflow`]
/// when the result is not representable (e.g. `C(1030, 515)`).
pub fn combination(n: u32, r: u32) -> Result<f64, ModelError> {
    if r > n {
        return Err(ModelError::Domain { n, r });
    }

    let k = r.min(n - r);
    let mut acc = 1.0_f64;
    for i in 1..=k {
        acc = acc * f64::from(n - k + i) / f64::from(i);
    }
    if !acc.is_finite() {
        return Err(ModelError::Overflow { n, r });
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_values() {
        assert_eq!(combination(5, 2).unwrap(), 10.0);
        assert_eq!(combination(10, 3).unwrap(), 120.0);
        assert_eq!(combination(0, 0).unwrap(), 1.0);
        assert_eq!(combination(52, 5).unwrap(), 2_598_960.0);
    }

    #[test]
    fn r_greater_than_n_is_a_domain_error() {
        assert_eq!(combination(3, 4), Err(ModelError::Domain { n: 3, r: 4 }));
    }

    #[test]
    fn large_n_stays_finite() {
        let v = combination(1000, 500).unwrap();
        assert!(v.is_finite() && v > 1e299);
    }

    #[test]
    fn overflow_is_an_error_not_infinity() {
        assert_eq!(combination(2000, 1000), Err(ModelError::Overflow { n: 2000, r: 1000 }));
        assert_eq!(combination(2000, 1), Ok(2000.0));
    }

    proptest! {
        #[test]
        fn edges_are_one(n in 0u32..200) {
            prop_assert_eq!(combination(n, 0).unwrap(), 1.0);
            prop_assert_eq!(combination(n, n).unwrap(), 1.0);
        }

        #[test]
        fn symmetric(n in 0u32..200, frac in 0.0f64..=1.0) {
            let r = (f64::from(n) * frac).floor() as u32;
            prop_assert_eq!(combination(n, r).unwrap(), combination(n, n - r).unwrap());
        }

        #[test]
        fn pascal_rule(n in 2u32..50, frac in 0.0f64..=1.0) {
            let r = 1 + (f64::from(n - 2) * frac).floor() as u32;
            let lhs = combination(n, r).unwrap();
            let rhs = combination(n - 1, r - 1).unwrap() + combination(n - 1, r).unwrap();
            prop_assert_eq!(lhs, rhs);
        }
    }
}
