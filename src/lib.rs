//! # RC Sim
//!
//! Transient simulator for a series RC circuit.
//!
//! This library provides:
//! - A closed-form model of capacitor charging and discharging from a DC or
//!   50 Hz AC source with internal resistance
//! - Temperature dependence of the load resistor
//! - Time series generation and delimited-text export with a configurable
//!   precision and decimal separator
//! - A small text format for describing a circuit
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit parameters and validation
//! - [`components`] - Resistor, capacitor and source models
//! - [`solver`] - Analytic solution, series generation and playback
//! - [`export`] - Text rendering of series
//! - [`dsl`] - Parser for the circuit description language
//! - [`report`] - Parameter table and text schematic
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! rc-sim --capacitance 1 --resistance 1k --emf 10 --precision 4 --separator comma -o out.csv
//! rc-sim circuit.rc --summary --diagram
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use rc_sim::{CircuitConfig, ExportSettings, Simulator};
//!
//! let config = CircuitConfig::new().with_capacitance_uf(1.0).with_resistance(1000.0);
//! let series = Simulator::new(&config)?.generate_series(1000)?;
//! let text = rc_sim::export::format_series(&series, &ExportSettings::default())?;
//! # Ok::<(), rc_sim::RcSimError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmRcSim } from 'rc_sim';
//!
//! const sim = new WasmRcSim(circuitText);
//! const voltages = sim.voltages(1000);
//! ```

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod export;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{validate, CircuitConfig, Mode, SourceType};
pub use error::{RcSimError, Result};
pub use export::{format_series, preview, DecimalSeparator, ExportSettings};
pub use solver::{current_at, generate_series, time_constant, voltage_at, Simulator, TimeSeries};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmRcSim;

/// Frequency of the AC source in Hz
pub const AC_FREQUENCY: f64 = 50.0;

/// Temperature at which the nominal resistance is specified (°C)
pub const REFERENCE_TEMPERATURE: f64 = 25.0;
