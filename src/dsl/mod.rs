//! Text format for describing an RC circuit.
//!
//! The format is line-oriented and SPICE-flavoured. Each line is a comment,
//! a directive or a single component with its value.
//!
//! # Grammar Overview
//!
//! ```text
//! circuit     = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.' directive_name { argument }
//! component   = name value
//!
//! name        = ("R" | "RINT" | "RI" | "C" | "E" | "V") { letter | digit | '_' }
//! value       = number [unit_suffix]
//! number      = ['-'|'+'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'K' | 'M' | 'G'
//! ```
//!
//! # Components
//!
//! | Prefix | Description | Unit |
//! |--------|-------------|------|
//! | RINT, RI | Source internal resistance | Ω |
//! | R | Load resistor | Ω |
//! | C | Capacitor | F |
//! | E, V | Source EMF (amplitude for AC) | V |
//!
//! Each component may appear once. R, C and E are required.
//!
//! # Directives
//!
//! | Directive | Syntax | Default |
//! |-----------|--------|---------|
//! | .source | `.source dc\|ac` | dc |
//! | .mode | `.mode charge\|discharge` | charge |
//! | .temp | `.temp <°C>` | 25 |
//! | .tc | `.tc <1/°C>` | 100u |
//! | .v0 | `.v0 <V>` | 0 V charging, EMF discharging |
//! | .points | `.points <n>` | 1000 |
//! | .export | `.export precision=<n> separator=point\|comma` | 6, point |
//!
//! # Example
//!
//! ```text
//! # 1 ms charging circuit
//! .source dc
//! .mode charge
//! .export precision=4 separator=comma
//!
//! E1   10
//! RINT 0
//! R1   1k
//! C1   1u
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a circuit description string into an AST.
pub fn parse(input: &str) -> Result<CircuitAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a circuit description file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<CircuitAst> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::RcSimError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    tracing::debug!(path = %path.display(), "parsing circuit file");
    parse(&content)
}
