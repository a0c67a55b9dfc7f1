//! Text rendering and parsing of time series.

use crate::error::{RcSimError, Result};
use crate::solver::{Sample, TimeSeries};

use super::{
    DecimalSeparator, ExportSettings, CSV_MAX_POINTS, FIELD_DELIMITER, HEADER,
};

/// Print `value` in fixed-point notation with `precision` decimals.
///
/// Rounding is the standard library's correctly rounded conversion (exact
/// ties go to even). A value that rounds to zero is printed unsigned.
pub fn format_number(value: f64, precision: usize, separator: DecimalSeparator) -> String {
    let mut text = format!("{:.*}", precision, value);

    if text.starts_with('-') && text[1..].bytes().all(|b| b == b'0' || b == b'.') {
        text.remove(0);
    }

    match separator {
        DecimalSeparator::Point => text,
        DecimalSeparator::Comma => text.replace('.', ","),
    }
}

fn format_row(sample: &Sample, settings: &ExportSettings) -> String {
    let field = |v: f64| format_number(v, settings.precision, settings.decimal_separator);
    format!(
        "{}{d}{}{d}{}",
        field(sample.time),
        field(sample.voltage),
        field(sample.current),
        d = FIELD_DELIMITER
    )
}

fn render(samples: &[Sample], settings: &ExportSettings) -> Result<String> {
    settings.check_precision()?;

    let mut lines = Vec::with_capacity(samples.len() + 1);
    lines.push(HEADER.to_string());
    lines.extend(samples.iter().map(|s| format_row(s, settings)));
    Ok(lines.join("\n"))
}

/// Render every sample of `series`, header first, one line per sample.
///
/// Lines are separated by `\n` with no trailing newline.
pub fn format_series(series: &TimeSeries, settings: &ExportSettings) -> Result<String> {
    render(series.samples(), settings)
}

/// Like [`format_series`] but limited to the first `max_rows` data rows.
pub fn preview(series: &TimeSeries, settings: &ExportSettings, max_rows: usize) -> Result<String> {
    let rows = max_rows.min(series.len());
    render(&series.samples()[..rows], settings)
}

/// Pick at most `max_points` samples at evenly spaced indices, always
/// keeping the first and last sample.
pub fn downsample(series: &TimeSeries, max_points: usize) -> TimeSeries {
    let len = series.len();
    if len <= max_points {
        return series.clone();
    }

    let samples = series.samples();
    let picked: Vec<Sample> = match max_points {
        0 => Vec::new(),
        1 => vec![samples[0]],
        n => (0..n).map(|i| samples[i * (len - 1) / (n - 1)]).collect(),
    };

    TimeSeries::new(picked, series.reference_voltage())
}

/// Text written to an export file: the series reduced to at most
/// [`CSV_MAX_POINTS`] rows, then formatted.
pub fn csv_text(series: &TimeSeries, settings: &ExportSettings) -> Result<String> {
    settings.check_precision()?;

    if series.len() > CSV_MAX_POINTS {
        tracing::warn!(
            points = series.len(),
            max = CSV_MAX_POINTS,
            "series downsampled for export"
        );
    }
    let reduced = downsample(series, CSV_MAX_POINTS);
    tracing::debug!(rows = reduced.len(), "export text rendered");
    format_series(&reduced, settings)
}

/// Parse text produced by [`format_series`] back into samples.
///
/// The header line is optional; blank lines are ignored.
pub fn parse_series(text: &str, separator: DecimalSeparator) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || (idx == 0 && line == HEADER) {
            continue;
        }

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() != 3 {
            return Err(RcSimError::parse(
                line_no,
                format!("expected 3 fields, got {}", fields.len()),
            ));
        }

        let mut values = [0.0; 3];
        for (slot, field) in values.iter_mut().zip(&fields) {
            let normalized = match separator {
                DecimalSeparator::Point => field.to_string(),
                DecimalSeparator::Comma => {
                    if field.contains('.') {
                        return Err(RcSimError::parse(
                            line_no,
                            format!("unexpected '.' in comma-separated field '{}'", field),
                        ));
                    }
                    field.replace(',', ".")
                }
            };
            *slot = normalized.parse::<f64>().map_err(|_| {
                RcSimError::parse(line_no, format!("invalid number: {}", field))
            })?;
        }

        samples.push(Sample::new(values[0], values[1], values[2]));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{CircuitConfig, Mode, SourceType};
    use crate::solver::generate_series;

    fn reference_config() -> CircuitConfig {
        CircuitConfig::new()
            .with_capacitance(1e-6)
            .with_resistance(1000.0)
            .with_internal_resistance(0.0)
            .with_emf(10.0)
            .with_temp_coefficient(0.0)
    }

    fn comma(precision: usize) -> ExportSettings {
        ExportSettings::new(precision, DecimalSeparator::Comma)
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(6.321205588, 4, DecimalSeparator::Point), "6.3212");
        assert_eq!(format_number(-0.01, 4, DecimalSeparator::Comma), "-0,0100");
        assert_eq!(format_number(0.0, 1, DecimalSeparator::Point), "0.0");
        assert_eq!(format_number(1e-7, 12, DecimalSeparator::Point), "0.000000100000");
        // No scientific notation for large values
        assert_eq!(format_number(12345.5, 2, DecimalSeparator::Point), "12345.50");
    }

    #[test]
    fn test_negative_zero_is_unsigned() {
        assert_eq!(format_number(-0.0, 3, DecimalSeparator::Point), "0.000");
        assert_eq!(format_number(-0.00004, 4, DecimalSeparator::Comma), "0,0000");
    }

    #[test]
    fn test_discharging_export_first_row() {
        let config = reference_config().with_mode(Mode::Discharging);
        let series = generate_series(&config, 1000).unwrap();
        let text = format_series(&series, &comma(4)).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Time (s);Voltage (V);Current (A)"));
        assert_eq!(lines.next(), Some("0,0000;10,0000;-0,0100"));
        assert_eq!(text.lines().count(), 1001);
    }

    #[test]
    fn test_comma_fields_have_no_point() {
        let config = reference_config().with_source_type(SourceType::Ac);
        let series = generate_series(&config, 200).unwrap();
        let text = format_series(&series, &comma(6)).unwrap();

        for line in text.lines().skip(1) {
            let fields: Vec<&str> = line.split(';').collect();
            assert_eq!(fields.len(), 3);
            for field in fields {
                assert!(!field.contains('.'), "field {} contains '.'", field);
                let (_, decimals) = field.split_once(',').unwrap();
                assert_eq!(decimals.len(), 6);
            }
        }
    }

    #[test]
    fn test_round_trip_within_precision() {
        for separator in [DecimalSeparator::Point, DecimalSeparator::Comma] {
            for precision in [1, 4, 9, 12] {
                let series = generate_series(&reference_config(), 300).unwrap();
                let settings = ExportSettings::new(precision, separator);
                let text = format_series(&series, &settings).unwrap();
                let parsed = parse_series(&text, separator).unwrap();

                assert_eq!(parsed.len(), series.len());
                // Half a unit in the last printed digit, plus parse rounding
                let tolerance = |v: f64| {
                    0.5 * 10f64.powi(-(precision as i32)) + 4.0 * f64::EPSILON * v.abs().max(1.0)
                };
                for (orig, back) in series.iter().zip(&parsed) {
                    assert!((orig.time - back.time).abs() <= tolerance(orig.time));
                    assert!((orig.voltage - back.voltage).abs() <= tolerance(orig.voltage));
                    assert!((orig.current - back.current).abs() <= tolerance(orig.current));
                }
            }
        }
    }

    #[test]
    fn test_preview_truncates() {
        let series = generate_series(&reference_config(), 100).unwrap();
        let settings = ExportSettings::default();
        let text = preview(&series, &settings, 10).unwrap();
        assert_eq!(text.lines().count(), 11);

        let full = format_series(&series, &settings).unwrap();
        assert!(full.starts_with(&text));

        let everything = preview(&series, &settings, 10_000).unwrap();
        assert_eq!(everything, full);
    }

    #[test]
    fn test_formatter_rejects_bad_precision() {
        let series = generate_series(&reference_config(), 10).unwrap();
        for precision in [0, 13] {
            let settings = ExportSettings::new(precision, DecimalSeparator::Point);
            assert!(matches!(
                format_series(&series, &settings),
                Err(RcSimError::OutOfRange { .. })
            ));
            assert!(matches!(
                preview(&series, &settings, 5),
                Err(RcSimError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_downsample_keeps_endpoints() {
        let series = generate_series(&reference_config(), 2500).unwrap();
        let reduced = downsample(&series, 1000);
        assert_eq!(reduced.len(), 1000);
        assert_eq!(reduced.first(), series.first());
        assert_eq!(reduced.last(), series.last());
        for pair in reduced.samples().windows(2) {
            assert!(pair[1].time > pair[0].time);
        }

        let small = generate_series(&reference_config(), 10).unwrap();
        assert_eq!(downsample(&small, 1000), small);
    }

    #[test]
    fn test_csv_text_is_bounded() {
        let series = generate_series(&reference_config(), 4000).unwrap();
        let text = csv_text(&series, &ExportSettings::default()).unwrap();
        assert_eq!(text.lines().count(), CSV_MAX_POINTS + 1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_series("1.0;2.0", DecimalSeparator::Point).is_err());
        assert!(parse_series("1.0;abc;3.0", DecimalSeparator::Point).is_err());
        assert!(parse_series("1.0;2,0;3,0", DecimalSeparator::Comma).is_err());
    }
}
