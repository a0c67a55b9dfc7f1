//! Time series generation.

use crate::circuit::CircuitConfig;
use crate::error::{RcSimError, Result};

use super::model::RcModel;
use super::{DEFAULT_NUM_POINTS, MIN_AC_PERIODS, MIN_NUM_POINTS, TAU_MULTIPLIER};

/// One sampled instant of the transient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time since the switch closed (s)
    pub time: f64,
    /// Capacitor voltage (V)
    pub voltage: f64,
    /// Loop current, positive into the capacitor (A)
    pub current: f64,
}

impl Sample {
    pub fn new(time: f64, voltage: f64, current: f64) -> Self {
        Self {
            time,
            voltage,
            current,
        }
    }
}

/// An ordered, immutable sequence of samples with strictly increasing time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    samples: Vec<Sample>,
    /// Voltage that counts as "fully charged" for the charge indicator
    reference_voltage: f64,
}

impl TimeSeries {
    /// Wrap pre-computed samples. `reference_voltage` scales [`charge_level_at`](Self::charge_level_at).
    pub fn new(samples: Vec<Sample>, reference_voltage: f64) -> Self {
        Self {
            samples,
            reference_voltage,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn reference_voltage(&self) -> f64 {
        self.reference_voltage
    }

    /// Time span covered by the series (s).
    pub fn duration(&self) -> f64 {
        self.last().map_or(0.0, |s| s.time)
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    pub fn voltages(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.voltage).collect()
    }

    pub fn currents(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.current).collect()
    }

    /// Fill level of the capacitor at sample `index`, in [0, 1].
    ///
    /// Returns 0 for an out-of-range index or a zero reference voltage.
    pub fn charge_level_at(&self, index: usize) -> f64 {
        self.samples
            .get(index)
            .map_or(0.0, |s| charge_level(s.voltage, self.reference_voltage))
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Ratio `voltage / reference` clamped to [0, 1]; 0 when the reference is 0.
pub fn charge_level(voltage: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    (voltage / reference).clamp(0.0, 1.0)
}

/// Derived figures reported alongside a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    /// tau (s)
    pub time_constant: f64,
    /// Temperature-adjusted load resistance (ohms)
    pub effective_resistance: f64,
    /// R_eff + R_int (ohms)
    pub total_resistance: f64,
    /// Capacitor voltage at the last sample (V)
    pub final_voltage: f64,
    /// Energy stored in the capacitor at the last sample (J)
    pub stored_energy: f64,
    /// Mean resistive power loss I^2 * R over the series (W)
    pub power_loss: f64,
    /// Largest |I| over the series (A)
    pub peak_current: f64,
    /// Phase lead of the current over the source (rad), 0 for DC
    pub current_phase_lead: f64,
}

/// The result of one run: series plus summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub series: TimeSeries,
    pub summary: SimulationSummary,
}

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Number of samples in a generated series (including t = 0).
    pub num_points: usize,
    /// Span of the series in time constants.
    pub tau_multiplier: f64,
    /// Minimum number of AC periods shown.
    pub min_ac_periods: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            tau_multiplier: TAU_MULTIPLIER,
            min_ac_periods: MIN_AC_PERIODS,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of samples per series.
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// Set how many time constants a series spans.
    pub fn with_tau_multiplier(mut self, tau_multiplier: f64) -> Self {
        self.tau_multiplier = tau_multiplier;
        self
    }

    /// Set the minimum number of AC periods a series spans.
    pub fn with_min_ac_periods(mut self, periods: f64) -> Self {
        self.min_ac_periods = periods;
        self
    }
}

/// Samples an [`RcModel`] into time series.
#[derive(Debug, Clone)]
pub struct Simulator {
    circuit: CircuitConfig,
    model: RcModel,
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator for the given circuit with default configuration.
    pub fn new(circuit: &CircuitConfig) -> Result<Self> {
        Self::with_config(circuit, SimulatorConfig::default())
    }

    /// Create a simulator for the given circuit with custom configuration.
    pub fn with_config(circuit: &CircuitConfig, config: SimulatorConfig) -> Result<Self> {
        let model = RcModel::new(circuit)?;

        if !(config.tau_multiplier > 0.0 && config.tau_multiplier.is_finite()) {
            return Err(RcSimError::invalid_parameter(
                "tau_multiplier",
                format!("must be positive, got {}", config.tau_multiplier),
            ));
        }
        if !(config.min_ac_periods >= 0.0 && config.min_ac_periods.is_finite()) {
            return Err(RcSimError::invalid_parameter(
                "min_ac_periods",
                format!("must not be negative, got {}", config.min_ac_periods),
            ));
        }

        tracing::debug!(
            capacitance = circuit.capacitance,
            resistance = circuit.resistance,
            internal_resistance = circuit.internal_resistance,
            emf = circuit.emf,
            source = %circuit.source_type,
            mode = %circuit.mode,
            temperature = circuit.temperature,
            temp_coefficient = circuit.temp_coefficient,
            "parameters set"
        );

        Ok(Self {
            circuit: circuit.clone(),
            model,
            config,
        })
    }

    pub fn model(&self) -> &RcModel {
        &self.model
    }

    pub fn circuit(&self) -> &CircuitConfig {
        &self.circuit
    }

    /// Time span of a generated series: `tau_multiplier` time constants, or
    /// for AC sources at least `min_ac_periods` periods, whichever is larger.
    pub fn duration(&self) -> f64 {
        let transient = self.config.tau_multiplier * self.model.time_constant();
        match self.model.source().period() {
            Some(period) => transient.max(self.config.min_ac_periods * period),
            None => transient,
        }
    }

    /// Sample the model at `num_points` evenly spaced times in [0, duration].
    ///
    /// Either returns a complete series or fails before producing samples.
    pub fn generate_series(&self, num_points: usize) -> Result<TimeSeries> {
        if num_points < MIN_NUM_POINTS {
            return Err(RcSimError::invalid_parameter(
                "num_points",
                format!("need at least {} samples, got {}", MIN_NUM_POINTS, num_points),
            ));
        }

        let duration = self.duration();
        let _span = tracing::debug_span!("generate_series", num_points, duration).entered();

        let last = (num_points - 1) as f64;
        let samples: Vec<Sample> = (0..num_points)
            .map(|i| {
                let t = duration * i as f64 / last;
                Sample::new(t, self.model.voltage_at(t), self.model.current_at(t))
            })
            .collect();

        if let Some(bad) = samples
            .iter()
            .find(|s| !(s.voltage.is_finite() && s.current.is_finite()))
        {
            return Err(RcSimError::NonFiniteResult { time: bad.time });
        }

        tracing::debug!(
            tau = self.model.time_constant(),
            points = samples.len(),
            "series generated"
        );

        Ok(TimeSeries::new(samples, self.circuit.emf))
    }

    /// Summarize a series produced by this simulator.
    pub fn summarize(&self, series: &TimeSeries) -> SimulationSummary {
        let total_resistance = self.model.total_resistance();
        let final_voltage = series.last().map_or(self.model.initial_voltage(), |s| s.voltage);

        let power_loss = if series.is_empty() {
            0.0
        } else {
            series
                .iter()
                .map(|s| s.current * s.current * total_resistance)
                .sum::<f64>()
                / series.len() as f64
        };

        let peak_current = series
            .iter()
            .map(|s| s.current.abs())
            .fold(0.0, f64::max);

        SimulationSummary {
            time_constant: self.model.time_constant(),
            effective_resistance: self.circuit.effective_resistance(),
            total_resistance,
            final_voltage,
            stored_energy: self.circuit.capacitor().stored_energy(final_voltage),
            power_loss,
            peak_current,
            current_phase_lead: self
                .model
                .ac_response()
                .map_or(0.0, |ac| ac.current_phase_lead()),
        }
    }

    /// Generate the configured number of samples and summarize them.
    pub fn run(&self) -> Result<Simulation> {
        let series = self.generate_series(self.config.num_points)?;
        let summary = self.summarize(&series);

        tracing::debug!(
            tau = summary.time_constant,
            energy = summary.stored_energy,
            power_loss = summary.power_loss,
            "simulation completed"
        );

        Ok(Simulation { series, summary })
    }
}

/// Validate `config` and sample `num_points` points from t = 0 to the end of
/// the transient.
pub fn generate_series(config: &CircuitConfig, num_points: usize) -> Result<TimeSeries> {
    Simulator::new(config)?.generate_series(num_points)
}
