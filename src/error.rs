//! Error types for the RC circuit simulator.
//!
//! This module provides a unified error type [`RcSimError`] that covers
//! all error conditions that can occur during circuit description parsing,
//! parameter validation, simulation, and export.

use thiserror::Error;

/// Result type alias using [`RcSimError`].
pub type Result<T> = std::result::Result<T, RcSimError>;

/// Unified error type for all RC-Sim operations.
#[derive(Error, Debug)]
pub enum RcSimError {
    // ============ Parameter Errors ============
    /// A circuit, simulation or export parameter is invalid
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// A value handed to the formatter lies outside its accepted range
    #[error("Value {value} for '{param}' is out of range [{min}, {max}]")]
    OutOfRange {
        param: String,
        value: i64,
        min: i64,
        max: i64,
    },

    // ============ Simulation Errors ============
    /// The model produced NaN or infinity
    #[error("Simulation produced a non-finite value at t = {time:.3e} s")]
    NonFiniteResult { time: f64 },

    // ============ Circuit Description Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    /// Component declared more than once
    #[error("Duplicate component '{name}' at line {line}")]
    DuplicateComponent { name: String, line: usize },

    /// Required component absent from the description
    #[error("Circuit description has no {component} (add a '{hint}' line)")]
    MissingComponent { component: String, hint: String },

    // ============ I/O Errors ============
    /// Error reading circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing exported data
    #[error("Failed to write '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RcSimError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range(param: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            param: param.into(),
            value,
            min,
            max,
        }
    }

    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Whether the error was caused by user-supplied parameters, as opposed to I/O.
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Self::FileReadError { .. } | Self::FileWriteError { .. }
        )
    }
}
