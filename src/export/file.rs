//! Writing exported text to disk (CLI only).

use std::fs;
use std::path::Path;

use crate::error::{RcSimError, Result};
use crate::solver::TimeSeries;

use super::{csv_text, ExportSettings};

/// Write `series` to `path` as UTF-8 text with a trailing newline.
///
/// Returns the number of data rows written. Nothing is written if the
/// settings are invalid.
pub fn write_csv(path: &Path, series: &TimeSeries, settings: &ExportSettings) -> Result<usize> {
    let mut text = csv_text(series, settings)?;
    text.push('\n');
    let rows = text.lines().count().saturating_sub(1);

    fs::write(path, text).map_err(|e| RcSimError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), rows, "exported series");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitConfig;
    use crate::export::DecimalSeparator;
    use crate::solver::generate_series;

    #[test]
    fn test_write_csv() {
        let series = generate_series(&CircuitConfig::default(), 50).unwrap();
        let path = std::env::temp_dir().join(format!("rc_sim_export_{}.csv", std::process::id()));
        let settings = ExportSettings::new(3, DecimalSeparator::Comma);

        let rows = write_csv(&path, &series, &settings).unwrap();
        assert_eq!(rows, 50);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Time (s);Voltage (V);Current (A)\n0,000;0,000;"));
        assert!(written.ends_with('\n'));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_reports_io_errors() {
        let series = generate_series(&CircuitConfig::default(), 5).unwrap();
        let path = Path::new("/nonexistent-dir/definitely/missing.csv");
        let err = write_csv(path, &series, &ExportSettings::default()).unwrap_err();
        assert!(matches!(err, RcSimError::FileWriteError { .. }));
    }
}
