//! Circuit configuration and validation.
//!
//! This module provides the description of a single RC circuit run. The
//! [`CircuitConfig`] struct holds every physical parameter in SI units,
//! in a form suitable for the analytic solver.

mod config;
mod types;
mod validate;

pub use config::{
    CircuitConfig, DEFAULT_CAPACITANCE, DEFAULT_EMF, DEFAULT_INTERNAL_RESISTANCE,
    DEFAULT_RESISTANCE, DEFAULT_TEMP_COEFFICIENT,
};
pub use types::*;
pub use validate::{validate, validate_circuit, validate_precision};
