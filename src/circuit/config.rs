//! Circuit configuration: one immutable snapshot per simulation run.

use super::types::{Mode, SourceType};
use super::validate::validate_circuit;
use crate::components::{Capacitor, Resistor, Source};
use crate::dsl::{CircuitAst, ComponentType};
use crate::error::{RcSimError, Result};

/// Default capacitance (1 µF)
pub const DEFAULT_CAPACITANCE: f64 = 1e-6;
/// Default load resistance (ohms)
pub const DEFAULT_RESISTANCE: f64 = 1000.0;
/// Default source EMF (volts)
pub const DEFAULT_EMF: f64 = 10.0;
/// Default internal resistance (ohms)
pub const DEFAULT_INTERNAL_RESISTANCE: f64 = 0.0;
/// Default temperature coefficient (1/°C)
pub const DEFAULT_TEMP_COEFFICIENT: f64 = 0.0001;

/// Parameters of a single RC circuit run.
///
/// All quantities are in SI units. A config is built once per run and never
/// mutated; changing a parameter means building a new config.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitConfig {
    /// Capacitance (farads)
    pub capacitance: f64,
    /// Load resistance at the reference temperature (ohms)
    pub resistance: f64,
    /// Source internal resistance (ohms)
    pub internal_resistance: f64,
    /// Source EMF or AC amplitude (volts)
    pub emf: f64,
    pub source_type: SourceType,
    pub mode: Mode,
    /// Ambient temperature (°C)
    pub temperature: f64,
    /// Temperature coefficient of the load resistor (1/°C)
    pub temp_coefficient: f64,
    /// Capacitor voltage at t = 0. `None` picks the mode default.
    pub initial_voltage: Option<f64>,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            capacitance: DEFAULT_CAPACITANCE,
            resistance: DEFAULT_RESISTANCE,
            internal_resistance: DEFAULT_INTERNAL_RESISTANCE,
            emf: DEFAULT_EMF,
            source_type: SourceType::Dc,
            mode: Mode::Charging,
            temperature: crate::REFERENCE_TEMPERATURE,
            temp_coefficient: DEFAULT_TEMP_COEFFICIENT,
            initial_voltage: None,
        }
    }
}

impl CircuitConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacitance in farads.
    pub fn with_capacitance(mut self, farads: f64) -> Self {
        self.capacitance = farads;
        self
    }

    /// Set the capacitance in microfarads (the unit the front ends use).
    pub fn with_capacitance_uf(mut self, microfarads: f64) -> Self {
        self.capacitance = microfarads * 1e-6;
        self
    }

    /// Set the load resistance in ohms.
    pub fn with_resistance(mut self, ohms: f64) -> Self {
        self.resistance = ohms;
        self
    }

    /// Set the internal resistance of the source in ohms.
    pub fn with_internal_resistance(mut self, ohms: f64) -> Self {
        self.internal_resistance = ohms;
        self
    }

    /// Set the source EMF in volts.
    pub fn with_emf(mut self, volts: f64) -> Self {
        self.emf = volts;
        self
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the ambient temperature in °C.
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = celsius;
        self
    }

    /// Set the resistor temperature coefficient in 1/°C.
    pub fn with_temp_coefficient(mut self, alpha: f64) -> Self {
        self.temp_coefficient = alpha;
        self
    }

    /// Override the capacitor voltage at t = 0.
    pub fn with_initial_voltage(mut self, volts: f64) -> Self {
        self.initial_voltage = Some(volts);
        self
    }

    /// Validate and return the configuration.
    pub fn validated(self) -> Result<Self> {
        validate_circuit(&self)?;
        Ok(self)
    }

    /// The load resistor model.
    pub fn resistor(&self) -> Resistor {
        Resistor::new("R".to_string(), self.resistance).with_temp_coefficient(self.temp_coefficient)
    }

    /// The capacitor model.
    pub fn capacitor(&self) -> Capacitor {
        Capacitor::new("C".to_string(), self.capacitance)
    }

    /// The source model.
    pub fn source(&self) -> Source {
        Source::new(
            "E".to_string(),
            self.source_type,
            self.emf,
            self.internal_resistance,
        )
    }

    /// Load resistance adjusted to the configured temperature.
    pub fn effective_resistance(&self) -> f64 {
        self.resistor().resistance_at(self.temperature)
    }

    /// Series resistance seen by the capacitor: R_eff + R_int.
    pub fn total_resistance(&self) -> f64 {
        self.effective_resistance() + self.internal_resistance
    }

    /// Capacitor voltage at t = 0: the override if set, else 0 V when
    /// charging and the full EMF when discharging.
    pub fn initial_condition(&self) -> f64 {
        self.initial_voltage.unwrap_or(match self.mode {
            Mode::Charging => 0.0,
            Mode::Discharging => self.emf,
        })
    }

    /// Build a configuration from a parsed circuit description.
    ///
    /// R, C and E are required; the internal resistance and all directives
    /// fall back to the defaults.
    pub fn from_ast(ast: &CircuitAst) -> Result<Self> {
        let mut seen: Vec<ComponentType> = Vec::with_capacity(ast.components.len());
        for def in &ast.components {
            if seen.contains(&def.component_type) {
                return Err(RcSimError::DuplicateComponent {
                    name: def.name.clone(),
                    line: def.line,
                });
            }
            seen.push(def.component_type);
        }

        let required = |component_type: ComponentType, hint: &str| {
            ast.component(component_type)
                .map(|def| def.value)
                .ok_or_else(|| RcSimError::MissingComponent {
                    component: component_type.description().to_string(),
                    hint: hint.to_string(),
                })
        };

        let defaults = Self::default();
        let config = Self {
            capacitance: required(ComponentType::Capacitor, "C1 <farads>")?,
            resistance: required(ComponentType::Resistor, "R1 <ohms>")?,
            internal_resistance: ast
                .component(ComponentType::InternalResistance)
                .map_or(defaults.internal_resistance, |def| def.value),
            emf: required(ComponentType::Source, "E1 <volts>")?,
            source_type: ast.source_type.unwrap_or(defaults.source_type),
            mode: ast.mode.unwrap_or(defaults.mode),
            temperature: ast.temperature.unwrap_or(defaults.temperature),
            temp_coefficient: ast.temp_coefficient.unwrap_or(defaults.temp_coefficient),
            initial_voltage: ast.initial_voltage,
        };

        tracing::debug!(?config, "circuit configuration built from description");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = CircuitConfig::default();
        assert_eq!(config.capacitance, 1e-6);
        assert_eq!(config.resistance, 1000.0);
        assert_eq!(config.emf, 10.0);
        assert_eq!(config.temperature, 25.0);
        assert_eq!(config.temp_coefficient, 0.0001);
        assert!(config.clone().validated().is_ok());
    }

    #[test]
    fn test_effective_resistance_includes_temperature() {
        let config = CircuitConfig::new()
            .with_resistance(1000.0)
            .with_internal_resistance(50.0)
            .with_temp_coefficient(0.004)
            .with_temperature(75.0);
        assert_relative_eq!(config.effective_resistance(), 1200.0, max_relative = 1e-12);
        assert_relative_eq!(config.total_resistance(), 1250.0, max_relative = 1e-12);
    }

    #[test]
    fn test_initial_condition() {
        let charging = CircuitConfig::new().with_emf(12.0);
        assert_eq!(charging.initial_condition(), 0.0);

        let discharging = charging.clone().with_mode(Mode::Discharging);
        assert_eq!(discharging.initial_condition(), 12.0);

        let partial = discharging.with_initial_voltage(4.5);
        assert_eq!(partial.initial_condition(), 4.5);
    }

    #[test]
    fn test_capacitance_in_microfarads() {
        let config = CircuitConfig::new().with_capacitance_uf(4.7);
        assert_relative_eq!(config.capacitance, 4.7e-6);
    }

    #[test]
    fn test_from_ast() {
        let ast = dsl::parse(
            ".source ac\n.mode discharge\n.temp 40\n.tc 0\nE1 5\nR1 2k\nRINT 100\nC1 10u\n",
        )
        .unwrap();
        let config = CircuitConfig::from_ast(&ast).unwrap();
        assert_eq!(config.source_type, SourceType::Ac);
        assert_eq!(config.mode, Mode::Discharging);
        assert_eq!(config.emf, 5.0);
        assert_eq!(config.resistance, 2000.0);
        assert_eq!(config.internal_resistance, 100.0);
        assert_relative_eq!(config.capacitance, 10e-6);
        assert_eq!(config.temperature, 40.0);
        assert_eq!(config.temp_coefficient, 0.0);
    }

    #[test]
    fn test_from_ast_missing_capacitor() {
        let ast = dsl::parse("E1 5\nR1 1k\n").unwrap();
        let err = CircuitConfig::from_ast(&ast).unwrap_err();
        assert!(matches!(err, RcSimError::MissingComponent { .. }));
    }

    #[test]
    fn test_from_ast_duplicate_resistor() {
        let ast = dsl::parse("E1 5\nR1 1k\nR2 2k\nC1 1u\n").unwrap();
        let err = CircuitConfig::from_ast(&ast).unwrap_err();
        assert!(matches!(err, RcSimError::DuplicateComponent { line: 3, .. }));
    }
}
