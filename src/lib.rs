//! `social-guess` library crate.
//!
//! Computes the probability that a majority-vote observer of `n` independent
//! signals, each correct with probability `q`, guesses correctly, along with an
//! affine approximation of that curve.
//!
//! The binary (`sg`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the model can be reused from simulations and notebooks

pub mod app;
pub mod cli;
pub mod config;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod simulate;
pub mod sweep;
pub mod tui;

pub use error::{AppError, ModelError};
pub use math::combination;
pub use models::{AffineApprox, correct_guess_probability, linear_approx_probability};
