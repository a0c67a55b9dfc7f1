//! Closed-form solution of the first-order RC transient.
//!
//! The capacitor voltage obeys
//!
//! ```text
//!   dV/dt = (e(t) - V) / tau,    tau = (R_eff + R_int) * C
//! ```
//!
//! where e(t) is the voltage driving the loop. For a DC source e is constant
//! and the solution is a single exponential. For an AC source the solution is
//! the sinusoidal steady state of an RC low-pass filter plus a decaying
//! homogeneous term that pins V(0) to the initial condition.

use crate::circuit::{validate_circuit, CircuitConfig, Mode, SourceType};
use crate::components::Source;
use crate::error::Result;

/// Sinusoidal steady-state response of the capacitor voltage:
///   V_ss(t) = amplitude * sin(omega * t + phase)
///
/// From the low-pass transfer function H(jω) = 1 / (1 + jωτ):
///   |H| = 1 / sqrt(1 + (ωτ)^2),  arg H = -atan(ωτ)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcResponse {
    /// Angular frequency (rad/s)
    pub omega: f64,
    /// Capacitor voltage amplitude (V)
    pub amplitude: f64,
    /// Capacitor voltage phase relative to the source (rad, non-positive)
    pub phase: f64,
}

impl AcResponse {
    fn new(emf: f64, omega: f64, tau: f64) -> Self {
        let wt = omega * tau;
        Self {
            omega,
            amplitude: emf / (1.0 + wt * wt).sqrt(),
            phase: -wt.atan(),
        }
    }

    /// Steady-state capacitor voltage at time `t`.
    pub fn voltage_at(&self, t: f64) -> f64 {
        self.amplitude * (self.omega * t + self.phase).sin()
    }

    /// Phase by which the loop current leads the source: π/2 + phase = atan(1/(ωτ)).
    pub fn current_phase_lead(&self) -> f64 {
        std::f64::consts::FRAC_PI_2 + self.phase
    }
}

/// Analytic model of one configured RC circuit.
///
/// All derived quantities are computed once at construction; evaluating the
/// model is pure and allocation-free.
#[derive(Debug, Clone)]
pub struct RcModel {
    source: Source,
    mode: Mode,
    capacitance: f64,
    total_resistance: f64,
    tau: f64,
    /// V(0)
    initial_voltage: f64,
    /// DC asymptote: delivered source voltage when charging, 0 when discharging
    final_voltage: f64,
    ac: Option<AcResponse>,
}

impl RcModel {
    /// Build a model from a configuration, validating it first.
    pub fn new(config: &CircuitConfig) -> Result<Self> {
        validate_circuit(config)?;
        Ok(Self::from_config_unchecked(config))
    }

    /// Build a model without validating. A config with a non-positive time
    /// constant yields non-finite results.
    pub fn from_config_unchecked(config: &CircuitConfig) -> Self {
        let source = config.source();
        let effective = config.effective_resistance();
        let total_resistance = effective + config.internal_resistance;
        let tau = total_resistance * config.capacitance;

        let final_voltage = match config.mode {
            Mode::Charging => source.delivered_voltage(effective),
            Mode::Discharging => 0.0,
        };

        let ac = match config.source_type {
            SourceType::Dc => None,
            SourceType::Ac => Some(AcResponse::new(
                config.emf,
                source.angular_frequency(),
                tau,
            )),
        };

        Self {
            source,
            mode: config.mode,
            capacitance: config.capacitance,
            total_resistance,
            tau,
            initial_voltage: config.initial_condition(),
            final_voltage,
            ac,
        }
    }

    /// Time constant tau = (R_eff + R_int) * C in seconds.
    pub fn time_constant(&self) -> f64 {
        self.tau
    }

    /// Series resistance R_eff + R_int in ohms.
    pub fn total_resistance(&self) -> f64 {
        self.total_resistance
    }

    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Capacitor voltage at t = 0.
    pub fn initial_voltage(&self) -> f64 {
        self.initial_voltage
    }

    /// Steady-state response for AC sources.
    pub fn ac_response(&self) -> Option<&AcResponse> {
        self.ac.as_ref()
    }

    /// Voltage driving the RC loop at time `t`.
    ///
    /// A DC source is disconnected while discharging, so the loop is driven
    /// by 0 V. An AC source stays connected in both modes.
    pub fn drive_voltage_at(&self, t: f64) -> f64 {
        match self.ac {
            Some(_) => self.source.emf_at(t),
            None => self.final_voltage,
        }
    }

    /// Capacitor voltage at time `t` (seconds, clamped to t >= 0).
    ///
    /// Both branches are written so that t = 0 returns the initial voltage
    /// exactly: e^0 is exactly 1 and the steady-state terms cancel bit for bit.
    pub fn voltage_at(&self, t: f64) -> f64 {
        let t = t.max(0.0);
        let decay = (-t / self.tau).exp();
        match &self.ac {
            None => self.initial_voltage * decay + self.final_voltage * (1.0 - decay),
            Some(ac) => {
                self.initial_voltage * decay + (ac.voltage_at(t) - ac.voltage_at(0.0) * decay)
            }
        }
    }

    /// Loop current at time `t`, positive when flowing into the capacitor.
    ///
    /// I = (e(t) - V(t)) / (R_eff + R_int), which equals C * dV/dt.
    pub fn current_at(&self, t: f64) -> f64 {
        (self.drive_voltage_at(t) - self.voltage_at(t)) / self.total_resistance
    }
}

/// Time constant of a configuration: tau = (R_eff + R_int) * C.
pub fn time_constant(config: &CircuitConfig) -> f64 {
    config.total_resistance() * config.capacitance
}

/// Capacitor voltage of `config` at time `t`.
///
/// `config` is expected to have passed [`validate_circuit`]; use
/// [`RcModel::new`] to evaluate many points with validation.
pub fn voltage_at(config: &CircuitConfig, t: f64) -> f64 {
    RcModel::from_config_unchecked(config).voltage_at(t)
}

/// Loop current of `config` at time `t`. See [`voltage_at`].
pub fn current_at(config: &CircuitConfig, t: f64) -> f64 {
    RcModel::from_config_unchecked(config).current_at(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    fn reference_config() -> CircuitConfig {
        CircuitConfig::new()
            .with_capacitance(1e-6)
            .with_resistance(1000.0)
            .with_internal_resistance(0.0)
            .with_emf(10.0)
            .with_temperature(25.0)
            .with_temp_coefficient(0.0)
    }

    #[test]
    fn test_time_constant() {
        let config = reference_config();
        assert_relative_eq!(time_constant(&config), 1e-3, max_relative = 1e-12);

        let model = RcModel::new(&config.with_internal_resistance(1000.0)).unwrap();
        assert_relative_eq!(model.time_constant(), 2e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_dc_charging_reference_values() {
        let config = reference_config();
        assert_eq!(voltage_at(&config, 0.0), 0.0);
        assert_relative_eq!(
            voltage_at(&config, 0.001),
            10.0 * (1.0 - (-1.0f64).exp()),
            max_relative = 1e-9
        );
        assert_abs_diff_eq!(voltage_at(&config, 0.001), 6.321, epsilon = 1e-3);
        assert_abs_diff_eq!(voltage_at(&config, 0.005), 9.9326, epsilon = 1e-4);
    }

    #[test]
    fn test_dc_charging_monotonic_and_converges() {
        let model = RcModel::new(&reference_config()).unwrap();
        let tau = model.time_constant();
        let mut prev = model.voltage_at(0.0);
        for i in 1..=500 {
            let v = model.voltage_at(5.0 * tau * i as f64 / 500.0);
            assert!(v >= prev);
            prev = v;
        }
        assert!((10.0 - model.voltage_at(5.0 * tau)) / 10.0 < 0.01);
    }

    #[test]
    fn test_dc_charging_current() {
        let model = RcModel::new(&reference_config()).unwrap();
        assert_relative_eq!(model.current_at(0.0), 0.01, max_relative = 1e-12);
        assert_relative_eq!(
            model.current_at(0.001),
            0.01 * (-1.0f64).exp(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_dc_charging_with_internal_resistance() {
        let config = reference_config().with_internal_resistance(250.0);
        let model = RcModel::new(&config).unwrap();
        // Asymptote is the divided EMF: 10 * 1000 / 1250
        assert_relative_eq!(model.voltage_at(1.0), 8.0, max_relative = 1e-9);
        assert_relative_eq!(model.current_at(0.0), 8.0 / 1250.0, max_relative = 1e-12);
    }

    #[test]
    fn test_dc_discharging() {
        let config = reference_config().with_mode(Mode::Discharging);
        let model = RcModel::new(&config).unwrap();
        let tau = model.time_constant();

        assert_eq!(model.voltage_at(0.0), 10.0);
        assert_eq!(model.current_at(0.0), -0.01);

        let mut prev = model.voltage_at(0.0);
        for i in 1..=500 {
            let v = model.voltage_at(5.0 * tau * i as f64 / 500.0);
            assert!(v <= prev);
            prev = v;
        }
        assert!(model.voltage_at(5.0 * tau) < 0.1);
        assert!(model.current_at(tau) < 0.0);
    }

    #[test]
    fn test_initial_voltage_override() {
        let config = reference_config()
            .with_mode(Mode::Discharging)
            .with_initial_voltage(3.3);
        assert_eq!(voltage_at(&config, 0.0), 3.3);

        let config = reference_config().with_initial_voltage(2.0);
        assert_eq!(voltage_at(&config, 0.0), 2.0);
        assert_relative_eq!(voltage_at(&config, 1.0), 10.0, max_relative = 1e-9);
    }

    #[test]
    fn test_temperature_raises_tau() {
        let config = reference_config()
            .with_temp_coefficient(0.004)
            .with_temperature(75.0);
        // R_eff = 1000 * (1 + 0.004 * 50) = 1200
        assert_relative_eq!(time_constant(&config), 1.2e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_ac_initial_conditions_are_exact() {
        let charging = reference_config().with_source_type(SourceType::Ac);
        assert_eq!(voltage_at(&charging, 0.0), 0.0);

        let discharging = charging.with_mode(Mode::Discharging);
        assert_eq!(voltage_at(&discharging, 0.0), 10.0);
    }

    #[test]
    fn test_ac_steady_state_matches_low_pass() {
        // tau = 10 ms, so omega * tau = pi
        let config = reference_config()
            .with_source_type(SourceType::Ac)
            .with_capacitance(10e-6);
        let model = RcModel::new(&config).unwrap();
        let ac = *model.ac_response().unwrap();
        let wt = 2.0 * PI * 50.0 * 0.01;

        assert_relative_eq!(ac.amplitude, 10.0 / (1.0 + wt * wt).sqrt(), max_relative = 1e-12);
        assert_relative_eq!(ac.phase, -wt.atan(), max_relative = 1e-12);
        assert_relative_eq!(ac.current_phase_lead(), (1.0 / wt).atan(), max_relative = 1e-9);

        // After 20 tau the transient has vanished
        let t = 0.2;
        assert_abs_diff_eq!(model.voltage_at(t), ac.voltage_at(t), epsilon = 1e-6);
    }

    #[test]
    fn test_ac_satisfies_ode() {
        let config = reference_config()
            .with_source_type(SourceType::Ac)
            .with_capacitance(4.7e-6)
            .with_mode(Mode::Discharging);
        let model = RcModel::new(&config).unwrap();
        let tau = model.time_constant();
        let h = 1e-8;

        for &t in &[1e-4, 1e-3, 3e-3, 7.5e-3, 1.3e-2] {
            let dv_dt = (model.voltage_at(t + h) - model.voltage_at(t - h)) / (2.0 * h);
            let rhs = (model.drive_voltage_at(t) - model.voltage_at(t)) / tau;
            assert_relative_eq!(dv_dt, rhs, max_relative = 1e-4, epsilon = 1e-3);
            // Current is C dV/dt
            assert_relative_eq!(
                model.current_at(t),
                model.capacitance() * dv_dt,
                max_relative = 1e-4,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_new_rejects_invalid() {
        let config = reference_config().with_capacitance(0.0);
        assert!(RcModel::new(&config).is_err());
    }
}
