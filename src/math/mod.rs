//! Mathematical utilities: binomial coefficients and straight-line least squares.

pub mod combinatorics;
pub mod ols;

pub use combinatorics::*;
pub use ols::*;
