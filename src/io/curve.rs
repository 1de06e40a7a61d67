//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a signal sweep:
//! - accuracy `q` and calibration method
//! - the affine coefficients
//! - exact and approximate probability per panel size
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::domain::{CurveFile, SignalCurve};
use crate::error::AppError;

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &SignalCurve) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    let doc = CurveFile::from_curve(curve, Utc::now());
    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(4, format!("Failed to write curve JSON: {e}")))?;

    info!(path = %path.display(), rows = doc.rows.len(), "wrote curve JSON");
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    if curve.rows.is_empty() {
        return Err(AppError::new(2, "Curve JSON contains no rows."));
    }
    Ok(curve)
}
