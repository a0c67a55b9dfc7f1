//! Component models for the RC circuit.
//!
//! The simulated network is a single series loop:
//!
//! ```text
//!   E ──[R_int]──[R]──┬
//!   │                 C
//!   └─────────────────┴
//! ```
//!
//! - Linear: temperature-dependent Resistor, Capacitor
//! - Sources: DC or 50 Hz AC EMF with internal resistance

mod linear;
mod sources;

pub use linear::{Capacitor, Resistor};
pub use sources::Source;
