//! Core enums describing how the circuit is driven.

use std::fmt;
use std::str::FromStr;

use crate::error::RcSimError;

/// Kind of excitation applied by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceType {
    /// Constant EMF
    #[default]
    Dc,
    /// Sinusoidal EMF at the fixed mains frequency
    Ac,
}

impl SourceType {
    /// Parse a source type keyword, case-insensitively.
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dc" => Some(Self::Dc),
            "ac" => Some(Self::Ac),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Dc => write!(f, "DC"),
            SourceType::Ac => write!(f, "AC"),
        }
    }
}

impl FromStr for SourceType {
    type Err = RcSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| {
            RcSimError::invalid_parameter("source", format!("expected 'dc' or 'ac', got '{}'", s))
        })
    }
}

/// Whether the capacitor is being charged by the source or discharged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Capacitor starts empty and charges towards the source voltage
    #[default]
    Charging,
    /// Capacitor starts charged and releases its energy
    Discharging,
}

impl Mode {
    /// Parse a mode keyword, case-insensitively.
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "charge" | "charging" => Some(Self::Charging),
            "discharge" | "discharging" => Some(Self::Discharging),
            _ => None,
        }
    }

    /// Check if this is the discharging mode.
    pub fn is_discharging(&self) -> bool {
        matches!(self, Mode::Discharging)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Charging => write!(f, "charging"),
            Mode::Discharging => write!(f, "discharging"),
        }
    }
}

impl FromStr for Mode {
    type Err = RcSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| {
            RcSimError::invalid_parameter(
                "mode",
                format!("expected 'charge' or 'discharge', got '{}'", s),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(SourceType::from_keyword("AC"), Some(SourceType::Ac));
        assert_eq!(SourceType::from_keyword("dc"), Some(SourceType::Dc));
        assert_eq!(SourceType::from_keyword("rf"), None);
        assert_eq!(Mode::from_keyword("Discharge"), Some(Mode::Discharging));
        assert_eq!(Mode::from_keyword("charging"), Some(Mode::Charging));
        assert!("sideways".parse::<Mode>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceType::Ac.to_string(), "AC");
        assert_eq!(Mode::Discharging.to_string(), "discharging");
    }
}
