//! Linear passive components: Resistor, Capacitor.

use crate::REFERENCE_TEMPERATURE;

/// A resistor whose resistance drifts linearly with temperature.
///
/// The nominal `resistance` is specified at [`REFERENCE_TEMPERATURE`]; at any
/// other temperature T the effective value is
///   R_eff = R * (1 + alpha * (T - T_ref))
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    pub name: String,
    /// Nominal resistance at the reference temperature (ohms)
    pub resistance: f64,
    /// Linear temperature coefficient (1/°C)
    pub temp_coefficient: f64,
}

impl Resistor {
    /// Create a new resistor with no temperature dependence.
    pub fn new(name: String, resistance: f64) -> Self {
        Self {
            name,
            resistance,
            temp_coefficient: 0.0,
        }
    }

    /// Set the temperature coefficient (1/°C).
    pub fn with_temp_coefficient(mut self, alpha: f64) -> Self {
        self.temp_coefficient = alpha;
        self
    }

    /// Effective resistance at `temperature` (°C).
    ///
    /// May be zero or negative for extreme coefficients; callers validate.
    pub fn resistance_at(&self, temperature: f64) -> f64 {
        self.resistance * (1.0 + self.temp_coefficient * (temperature - REFERENCE_TEMPERATURE))
    }

    /// Conductance (1/R) at `temperature` (°C).
    pub fn conductance_at(&self, temperature: f64) -> f64 {
        1.0 / self.resistance_at(temperature)
    }
}

/// An ideal capacitor.
#[derive(Debug, Clone, PartialEq)]
pub struct Capacitor {
    pub name: String,
    /// Capacitance (farads)
    pub capacitance: f64,
}

impl Capacitor {
    /// Create a new capacitor.
    pub fn new(name: String, capacitance: f64) -> Self {
        Self { name, capacitance }
    }

    /// Charge held at voltage `v` (coulombs).
    pub fn charge(&self, v: f64) -> f64 {
        self.capacitance * v
    }

    /// Energy stored at voltage `v` (joules): E = C * V^2 / 2
    pub fn stored_energy(&self, v: f64) -> f64 {
        0.5 * self.capacitance * v * v
    }

    /// Time constant when charged through `resistance` ohms.
    pub fn time_constant(&self, resistance: f64) -> f64 {
        resistance * self.capacitance
    }
}
