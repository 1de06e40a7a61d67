//! Export signal curves to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::domain::SignalCurve;
use crate::error::AppError;

pub const CSV_HEADER: &str = "n,q,method,exact,approx,error";

/// Write one row per panel size.
pub fn write_curve_csv(path: &Path, curve: &SignalCurve) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_curve_rows(&mut file, curve)?;
    info!(path = %path.display(), rows = curve.rows.len(), "wrote curve CSV");
    Ok(())
}

fn write_curve_rows<W: Write>(out: &mut W, curve: &SignalCurve) -> Result<(), AppError> {
    writeln!(out, "{CSV_HEADER}")
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for r in &curve.rows {
        writeln!(
            out,
            "{},{},{},{:.10},{:.10},{:.10}",
            r.n,
            curve.q,
            curve.method.display_name(),
            r.exact,
            r.approx,
            r.error(),
        )
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApproxMethod;
    use crate::sweep::sweep_signals;

    #[test]
    fn csv_rows() {
        let curve = sweep_signals(0.7, 3, ApproxMethod::Anchored).unwrap();
        let mut buf = Vec::new();
        write_curve_rows(&mut buf, &curve).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[2].starts_with("1,0.7,anchored,0.7000000000,0.7155400000,"));
        assert!(lines[4].starts_with("3,0.7,anchored,0.7840000000,0.7840000000,"));
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let curve = sweep_signals(0.6, 4, ApproxMethod::Anchored).unwrap();
        write_curve_csv(&path, &curve).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 6);
    }
}
