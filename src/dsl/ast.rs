//! Abstract Syntax Tree types for the circuit description language.

use crate::circuit::{Mode, SourceType};
use crate::export::DecimalSeparator;

/// Complete AST representation of a parsed circuit description.
#[derive(Debug, Clone, Default)]
pub struct CircuitAst {
    /// All component lines, in source order
    pub components: Vec<ComponentDef>,
    /// `.source` directive
    pub source_type: Option<SourceType>,
    /// `.mode` directive
    pub mode: Option<Mode>,
    /// `.temp` directive (°C)
    pub temperature: Option<f64>,
    /// `.tc` directive (1/°C)
    pub temp_coefficient: Option<f64>,
    /// `.v0` directive (V)
    pub initial_voltage: Option<f64>,
    /// `.points` directive
    pub num_points: Option<usize>,
    /// `.export` directive
    pub export: ExportDef,
}

impl CircuitAst {
    /// Create a new empty circuit AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the first component of the given type.
    pub fn component(&self, component_type: ComponentType) -> Option<&ComponentDef> {
        self.components
            .iter()
            .find(|c| c.component_type == component_type)
    }
}

/// Export options given by the `.export` directive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportDef {
    pub precision: Option<usize>,
    pub separator: Option<DecimalSeparator>,
}

/// A component line from the description.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    /// Component type (R, RINT, C, E/V)
    pub component_type: ComponentType,
    /// Component name as written
    pub name: String,
    /// Component value in SI units
    pub value: f64,
    /// Source line number for error reporting
    pub line: usize,
}

/// Component types supported by the description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Load resistor
    Resistor,
    /// Internal resistance of the source
    InternalResistance,
    /// Capacitor
    Capacitor,
    /// EMF source
    Source,
}

impl ComponentType {
    /// Identify a component from the first token of its line.
    ///
    /// `RINT` is checked before the single-character `R` prefix.
    pub fn from_token(token: &str) -> Option<Self> {
        let upper = token.to_uppercase();
        if upper == "RINT" || upper == "RI" {
            return Some(Self::InternalResistance);
        }
        match upper.chars().next()? {
            'R' => Some(Self::Resistor),
            'C' => Some(Self::Capacitor),
            'E' | 'V' => Some(Self::Source),
            _ => None,
        }
    }

    /// Human readable description used in error messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Resistor => "resistor",
            Self::InternalResistance => "internal resistance",
            Self::Capacitor => "capacitor",
            Self::Source => "EMF source",
        }
    }
}
