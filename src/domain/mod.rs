//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the calibration choice (`ApproxMethod`)
//! - sweep, grid and simulation outputs (`SignalCurve`, `GridRow`, `SimulationResult`)
//! - the exported curve schema (`CurveFile`) and run settings (`RunConfig`)

pub mod types;

pub use types::*;
