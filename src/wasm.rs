//! WASM bindings for RC Sim.
//!
//! The browser front end owns the timer and the plot; these bindings only
//! answer queries about a fixed circuit.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRcSim } from 'rc_sim';
//!
//! await init();
//!
//! const sim = new WasmRcSim(`
//!   .mode charge
//!   E1 10
//!   R1 1k
//!   C1 1u
//! `);
//!
//! const times = sim.times(1000);
//! const voltages = sim.voltages(1000);
//! const csv = sim.export_csv(1000, 4, true);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{CircuitConfig, Mode, SourceType};
use crate::dsl;
use crate::error::RcSimError;
use crate::export::{self, DecimalSeparator, ExportSettings};
use crate::solver::{Simulator, TimeSeries};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: RcSimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible RC circuit simulator.
#[wasm_bindgen]
pub struct WasmRcSim {
    simulator: Simulator,
}

impl WasmRcSim {
    fn from_config(config: &CircuitConfig) -> Result<WasmRcSim, JsValue> {
        let simulator = Simulator::new(config).map_err(to_js)?;
        Ok(WasmRcSim { simulator })
    }

    fn series(&self, num_points: usize) -> Result<TimeSeries, JsValue> {
        self.simulator.generate_series(num_points).map_err(to_js)
    }
}

#[wasm_bindgen]
impl WasmRcSim {
    /// Create a simulator from a circuit description.
    ///
    /// # Example
    /// ```javascript
    /// const sim = new WasmRcSim("E1 10\nR1 1k\nC1 1u");
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(circuit_text: &str) -> Result<WasmRcSim, JsValue> {
        let ast = dsl::parse(circuit_text).map_err(to_js)?;
        let config = CircuitConfig::from_ast(&ast).map_err(to_js)?;
        Self::from_config(&config)
    }

    /// Create a simulator from form values, capacitance in µF.
    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen]
    pub fn from_params(
        capacitance_uf: f64,
        resistance: f64,
        internal_resistance: f64,
        emf: f64,
        ac: bool,
        discharging: bool,
        temperature: f64,
        temp_coefficient: f64,
    ) -> Result<WasmRcSim, JsValue> {
        let config = CircuitConfig::new()
            .with_capacitance_uf(capacitance_uf)
            .with_resistance(resistance)
            .with_internal_resistance(internal_resistance)
            .with_emf(emf)
            .with_source_type(if ac { SourceType::Ac } else { SourceType::Dc })
            .with_mode(if discharging {
                Mode::Discharging
            } else {
                Mode::Charging
            })
            .with_temperature(temperature)
            .with_temp_coefficient(temp_coefficient);
        Self::from_config(&config)
    }

    /// Time constant in seconds.
    #[wasm_bindgen(getter)]
    pub fn time_constant(&self) -> f64 {
        self.simulator.model().time_constant()
    }

    /// Span of a generated series in seconds.
    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> f64 {
        self.simulator.duration()
    }

    /// Capacitor voltage at time `t` (s).
    #[wasm_bindgen]
    pub fn voltage_at(&self, t: f64) -> f64 {
        self.simulator.model().voltage_at(t)
    }

    /// Loop current at time `t` (s).
    #[wasm_bindgen]
    pub fn current_at(&self, t: f64) -> f64 {
        self.simulator.model().current_at(t)
    }

    /// Sample times of a series with `num_points` samples.
    #[wasm_bindgen]
    pub fn times(&self, num_points: usize) -> Result<Vec<f64>, JsValue> {
        Ok(self.series(num_points)?.times())
    }

    /// Capacitor voltages of a series with `num_points` samples.
    #[wasm_bindgen]
    pub fn voltages(&self, num_points: usize) -> Result<Vec<f64>, JsValue> {
        Ok(self.series(num_points)?.voltages())
    }

    /// Loop currents of a series with `num_points` samples.
    #[wasm_bindgen]
    pub fn currents(&self, num_points: usize) -> Result<Vec<f64>, JsValue> {
        Ok(self.series(num_points)?.currents())
    }

    /// Charge indicator (0..=1) at `t`.
    #[wasm_bindgen]
    pub fn charge_level_at(&self, t: f64) -> f64 {
        crate::solver::charge_level(self.voltage_at(t), self.simulator.circuit().emf)
    }

    /// Export text for a series, as written to a file.
    #[wasm_bindgen]
    pub fn export_csv(
        &self,
        num_points: usize,
        precision: usize,
        comma: bool,
    ) -> Result<String, JsValue> {
        let separator = if comma {
            DecimalSeparator::Comma
        } else {
            DecimalSeparator::Point
        };
        let settings = ExportSettings::new(precision, separator);
        let series = self.series(num_points)?;
        export::csv_text(&series, &settings).map_err(to_js)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
