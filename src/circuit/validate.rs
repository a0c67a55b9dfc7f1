//! Parameter validation.

use crate::error::{RcSimError, Result};
use crate::export::{ExportSettings, PRECISION_MAX, PRECISION_MIN};

use super::CircuitConfig;

/// Validate a circuit configuration for simulation.
///
/// Checks:
/// - All parameters are finite
/// - Capacitance and load resistance are positive
/// - Internal resistance is non-negative
/// - The temperature-adjusted total resistance is positive, so the time
///   constant is defined
pub fn validate_circuit(config: &CircuitConfig) -> Result<()> {
    let finite = [
        ("capacitance", config.capacitance),
        ("resistance", config.resistance),
        ("internal_resistance", config.internal_resistance),
        ("emf", config.emf),
        ("temperature", config.temperature),
        ("temp_coefficient", config.temp_coefficient),
    ];
    for (param, value) in finite {
        if !value.is_finite() {
            return Err(RcSimError::invalid_parameter(param, "must be a finite number"));
        }
    }

    if let Some(v0) = config.initial_voltage {
        if !v0.is_finite() {
            return Err(RcSimError::invalid_parameter(
                "initial_voltage",
                "must be a finite number",
            ));
        }
    }

    if config.capacitance <= 0.0 {
        return Err(RcSimError::invalid_parameter(
            "capacitance",
            format!("must be positive, got {}", config.capacitance),
        ));
    }

    if config.resistance <= 0.0 {
        return Err(RcSimError::invalid_parameter(
            "resistance",
            format!("must be positive, got {}", config.resistance),
        ));
    }

    if config.internal_resistance < 0.0 {
        return Err(RcSimError::invalid_parameter(
            "internal_resistance",
            format!("must not be negative, got {}", config.internal_resistance),
        ));
    }

    let effective = config.effective_resistance();
    if effective <= 0.0 {
        return Err(RcSimError::invalid_parameter(
            "temp_coefficient",
            format!(
                "effective resistance at {} °C is {} Ω (must be positive)",
                config.temperature, effective
            ),
        ));
    }

    let total = config.total_resistance();
    let tau = total * config.capacitance;
    if total <= 0.0 || !tau.is_finite() || tau <= 0.0 {
        return Err(RcSimError::invalid_parameter(
            "resistance",
            format!("time constant is undefined (tau = {})", tau),
        ));
    }

    Ok(())
}

/// Validate an export precision (number of decimal digits).
pub fn validate_precision(precision: usize) -> Result<()> {
    if !(PRECISION_MIN..=PRECISION_MAX).contains(&precision) {
        return Err(RcSimError::invalid_parameter(
            "precision",
            format!(
                "must be between {} and {}, got {}",
                PRECISION_MIN, PRECISION_MAX, precision
            ),
        ));
    }
    Ok(())
}

/// Validate everything a "run simulation" action needs before any work starts.
pub fn validate(config: &CircuitConfig, settings: &ExportSettings) -> Result<()> {
    validate_circuit(config)?;
    validate_precision(settings.precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DecimalSeparator;

    fn settings(precision: usize) -> ExportSettings {
        ExportSettings::new(precision, DecimalSeparator::Point)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&CircuitConfig::default(), &ExportSettings::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_capacitance() {
        let config = CircuitConfig::new().with_capacitance(0.0);
        let err = validate(&config, &settings(6)).unwrap_err();
        assert!(matches!(err, RcSimError::InvalidParameter { ref param, .. } if param == "capacitance"));
    }

    #[test]
    fn test_rejects_negative_resistance() {
        let config = CircuitConfig::new().with_resistance(-1.0);
        assert!(matches!(
            validate(&config, &settings(6)),
            Err(RcSimError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_internal_resistance() {
        let config = CircuitConfig::new().with_internal_resistance(-5.0);
        assert!(validate_circuit(&config).is_err());
    }

    #[test]
    fn test_rejects_precision_bounds() {
        let config = CircuitConfig::default();
        assert!(matches!(
            validate(&config, &settings(0)),
            Err(RcSimError::InvalidParameter { .. })
        ));
        assert!(matches!(
            validate(&config, &settings(13)),
            Err(RcSimError::InvalidParameter { .. })
        ));
        assert!(validate(&config, &settings(1)).is_ok());
        assert!(validate(&config, &settings(12)).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_effective_resistance() {
        // 1 + 0.01 * (-100 - 25) < 0
        let config = CircuitConfig::new()
            .with_temp_coefficient(0.01)
            .with_temperature(-100.0);
        let err = validate_circuit(&config).unwrap_err();
        assert!(matches!(err, RcSimError::InvalidParameter { ref param, .. } if param == "temp_coefficient"));
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = CircuitConfig::new().with_emf(f64::NAN);
        assert!(validate_circuit(&config).is_err());
        let config = CircuitConfig::new().with_initial_voltage(f64::INFINITY);
        assert!(validate_circuit(&config).is_err());
    }
}
