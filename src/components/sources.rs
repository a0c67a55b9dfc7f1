//! The EMF source driving the RC network.

use std::f64::consts::PI;

use crate::circuit::SourceType;
use crate::AC_FREQUENCY;

/// A non-ideal voltage source: an EMF in series with an internal resistance.
///
/// DC sources hold a constant EMF; AC sources produce
///   e(t) = EMF * sin(2π f t)
/// with f fixed at [`AC_FREQUENCY`].
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub name: String,
    pub source_type: SourceType,
    /// EMF (DC value or AC amplitude, volts)
    pub emf: f64,
    /// Series internal resistance (ohms)
    pub internal_resistance: f64,
}

impl Source {
    /// Create a new source.
    pub fn new(name: String, source_type: SourceType, emf: f64, internal_resistance: f64) -> Self {
        Self {
            name,
            source_type,
            emf,
            internal_resistance,
        }
    }

    /// Angular frequency ω in rad/s (0 for DC).
    pub fn angular_frequency(&self) -> f64 {
        match self.source_type {
            SourceType::Dc => 0.0,
            SourceType::Ac => 2.0 * PI * AC_FREQUENCY,
        }
    }

    /// Period of the waveform in seconds, if periodic.
    pub fn period(&self) -> Option<f64> {
        match self.source_type {
            SourceType::Dc => None,
            SourceType::Ac => Some(1.0 / AC_FREQUENCY),
        }
    }

    /// Instantaneous EMF at time `t`.
    pub fn emf_at(&self, t: f64) -> f64 {
        match self.source_type {
            SourceType::Dc => self.emf,
            SourceType::Ac => self.emf * (self.angular_frequency() * t).sin(),
        }
    }

    /// Voltage the source delivers across a `load` resistance (voltage divider
    /// with the internal resistance).
    pub fn delivered_voltage(&self, load: f64) -> f64 {
        self.emf * load / (load + self.internal_resistance)
    }
}
