//! Tracing subscriber setup.
//!
//! `SG_LOG` takes an `EnvFilter` directive (e.g. `social_guess=debug`). Without it
//! the level comes from the number of `-v` flags. Output goes to stderr so that
//! tables and plots on stdout stay pipeable.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SG_LOG";

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));
    install(filter);
}

/// Like [`init`], but stays silent unless `SG_LOG` is set. Used by the TUI, where
/// stderr output would corrupt the screen.
pub fn init_quiet() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    install(filter);
}

fn install(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(7), "trace");
    }
}
