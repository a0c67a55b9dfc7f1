//! Analytic RC solver.
//!
//! This module provides the numerical engine for the simulation.
//!
//! ## Model
//!
//! A single series loop of source, internal resistance, load resistance and
//! capacitor is a first-order linear system, so no numerical integration is
//! needed: every sample is evaluated directly from the closed-form solution.
//!
//! ```text
//!   tau   = (R * (1 + alpha * (T - 25)) + R_int) * C
//!   DC    V(t) = V0 * e^(-t/tau) + V_inf * (1 - e^(-t/tau))
//!   AC    V(t) = V0 * e^(-t/tau) + V_ss(t) - V_ss(0) * e^(-t/tau)
//! ```
//!
//! Samples are independent of each other, so a series can be produced in any
//! order and re-requested at any time without hidden state.

mod model;
mod playback;
mod simulator;

pub use model::{current_at, time_constant, voltage_at, AcResponse, RcModel};
pub use playback::{Frame, Playback, INTERVAL_DEFAULT_MS, INTERVAL_MAX_MS, INTERVAL_MIN_MS};
pub use simulator::{
    charge_level, generate_series, Sample, Simulation, SimulationSummary, Simulator,
    SimulatorConfig, TimeSeries,
};

/// Default number of samples per series.
pub const DEFAULT_NUM_POINTS: usize = 1000;

/// Smallest series that still has a start and an end.
pub const MIN_NUM_POINTS: usize = 2;

/// Series span in time constants (covers > 99% of the transient).
pub const TAU_MULTIPLIER: f64 = 5.0;

/// Minimum number of AC periods shown so the steady state is visible.
pub const MIN_AC_PERIODS: f64 = 3.0;
