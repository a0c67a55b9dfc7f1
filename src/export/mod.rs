//! Delimited-text export of simulation results.
//!
//! Output format:
//!
//! ```text
//! Time (s);Voltage (V);Current (A)
//! 0,0000;10,0000;-0,0100
//! 0,0000;9,9500;-0,0099
//! ```
//!
//! Fields are always separated by `;` so that a comma radix point never
//! collides with the delimiter. Every number is printed in fixed-point
//! notation with exactly `precision` decimals. The radix point is an explicit
//! setting; the process locale is never consulted.

mod format;

#[cfg(feature = "cli")]
mod file;

pub use format::{csv_text, downsample, format_number, format_series, parse_series, preview};

#[cfg(feature = "cli")]
pub use file::write_csv;

use std::fmt;
use std::str::FromStr;

use crate::error::RcSimError;

/// Column header row.
pub const HEADER: &str = "Time (s);Voltage (V);Current (A)";

/// Field delimiter.
pub const FIELD_DELIMITER: char = ';';

/// Smallest accepted number of decimals.
pub const PRECISION_MIN: usize = 1;

/// Largest accepted number of decimals.
pub const PRECISION_MAX: usize = 12;

/// Default number of decimals.
pub const DEFAULT_PRECISION: usize = 6;

/// Maximum number of data rows in an exported file.
pub const CSV_MAX_POINTS: usize = 1000;

/// Radix point used when printing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecimalSeparator {
    /// `.`
    #[default]
    Point,
    /// `,`
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(&self) -> char {
        match self {
            DecimalSeparator::Point => '.',
            DecimalSeparator::Comma => ',',
        }
    }

    /// Parse a separator keyword, case-insensitively.
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "point" | "dot" | "." => Some(Self::Point),
            "comma" | "," => Some(Self::Comma),
            _ => None,
        }
    }
}

impl fmt::Display for DecimalSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalSeparator::Point => write!(f, "point (.)"),
            DecimalSeparator::Comma => write!(f, "comma (,)"),
        }
    }
}

impl FromStr for DecimalSeparator {
    type Err = RcSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| {
            RcSimError::invalid_parameter(
                "separator",
                format!("expected 'point' or 'comma', got '{}'", s),
            )
        })
    }
}

/// How numbers are printed on export. Has no effect on computed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    /// Decimal digits per number, in [`PRECISION_MIN`]..=[`PRECISION_MAX`]
    pub precision: usize,
    pub decimal_separator: DecimalSeparator,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            decimal_separator: DecimalSeparator::Point,
        }
    }
}

impl ExportSettings {
    pub fn new(precision: usize, decimal_separator: DecimalSeparator) -> Self {
        Self {
            precision,
            decimal_separator,
        }
    }

    /// Check the precision bounds, reporting [`RcSimError::OutOfRange`].
    pub fn check_precision(&self) -> crate::error::Result<()> {
        if !(PRECISION_MIN..=PRECISION_MAX).contains(&self.precision) {
            return Err(RcSimError::out_of_range(
                "precision",
                i64::try_from(self.precision).unwrap_or(i64::MAX),
                PRECISION_MIN as i64,
                PRECISION_MAX as i64,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_keywords() {
        assert_eq!(DecimalSeparator::from_keyword("Comma"), Some(DecimalSeparator::Comma));
        assert_eq!(DecimalSeparator::from_keyword("."), Some(DecimalSeparator::Point));
        assert!("semicolon".parse::<DecimalSeparator>().is_err());
        assert_eq!(DecimalSeparator::Comma.as_char(), ',');
    }

    #[test]
    fn test_check_precision() {
        assert!(ExportSettings::default().check_precision().is_ok());
        let err = ExportSettings::new(13, DecimalSeparator::Point)
            .check_precision()
            .unwrap_err();
        assert!(matches!(err, RcSimError::OutOfRange { value: 13, .. }));
        assert!(ExportSettings::new(0, DecimalSeparator::Point)
            .check_precision()
            .is_err());
    }
}
