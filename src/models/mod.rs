//! The correct-guess probability model.
//!
//! Everything here is a pure function of `(n, q)` so sweeps, simulations and the
//! TUI can call into it from any thread.

pub mod linear;
pub mod majority;

pub use linear::*;
pub use majority::*;
