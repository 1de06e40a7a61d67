//! Environment-backed defaults.
//!
//! Resolution order for every setting: CLI flag, then environment (`.env` is
//! loaded first), then the built-in default.
//!
//! | variable    | setting                  | default  |
//! |-------------|--------------------------|----------|
//! | `SG_Q`      | signal accuracy          | `0.7`    |
//! | `SG_N_MAX`  | largest panel size       | `15`     |
//! | `SG_TRIALS` | Monte-Carlo trials per n | `10000`  |
//! | `SG_SEED`   | Monte-Carlo seed         | `42`     |

use std::str::FromStr;

use crate::error::AppError;
use crate::models::validate_accuracy;

pub const DEFAULT_Q: f64 = 0.7;
pub const DEFAULT_N_MAX: u32 = 15;
pub const DEFAULT_TRIALS: u64 = 10_000;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub q: f64,
    pub n_max: u32,
    pub trials: u64,
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            q: DEFAULT_Q,
            n_max: DEFAULT_N_MAX,
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Load `.env` (if present) and read `SG_*` overrides from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let settings = Self {
            q: parse_var(&lookup, "SG_Q")?.unwrap_or(defaults.q),
            n_max: parse_var(&lookup, "SG_N_MAX")?.unwrap_or(defaults.n_max),
            trials: parse_var(&lookup, "SG_TRIALS")?.unwrap_or(defaults.trials),
            seed: parse_var(&lookup, "SG_SEED")?.unwrap_or(defaults.seed),
        };

        validate_accuracy(settings.q)
            .map_err(|e| AppError::new(2, format!("Invalid SG_Q in environment: {e}")))?;
        Ok(settings)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| AppError::new(2, format!("Invalid {key}='{raw}' in environment: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Settings::from_lookup(lookup(&[])).unwrap(), Settings::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let s = Settings::from_lookup(lookup(&[("SG_Q", "0.6"), ("SG_N_MAX", "21"), ("SG_SEED", " 9 ")]))
            .unwrap();
        assert_eq!(s.q, 0.6);
        assert_eq!(s.n_max, 21);
        assert_eq!(s.seed, 9);
        assert_eq!(s.trials, DEFAULT_TRIALS);
    }

    #[test]
    fn blank_values_are_ignored() {
        let s = Settings::from_lookup(lookup(&[("SG_TRIALS", "  ")])).unwrap();
        assert_eq!(s.trials, DEFAULT_TRIALS);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = Settings::from_lookup(lookup(&[("SG_N_MAX", "-3")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("SG_N_MAX"));

        let err = Settings::from_lookup(lookup(&[("SG_Q", "1.5")])).unwrap_err();
        assert!(err.to_string().contains("SG_Q"));
    }
}
