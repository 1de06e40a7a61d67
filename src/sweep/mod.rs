//! Curve sweeps.
//!
//! Responsibilities:
//!
//! - evaluate exact vs approximate probability across panel sizes
//! - score the approximation across a grid of accuracies (parallel)

pub mod grid;
pub mod signals;

pub use grid::*;
pub use signals::*;
