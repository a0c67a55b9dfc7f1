//! Parser for the circuit description language.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::circuit::{Mode, SourceType};
use crate::error::{RcSimError, Result};
use crate::export::DecimalSeparator;

/// Parser for circuit descriptions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire circuit description.
    pub fn parse(&mut self) -> Result<CircuitAst> {
        let mut ast = CircuitAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    ast.components.push(component);
                }
                _ => {
                    return Err(RcSimError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(RcSimError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    /// Require the statement to end here and consume the newline.
    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(RcSimError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn expect_value(&mut self, what: &str) -> Result<f64> {
        let line = self.current.line;
        let tok = self.expect(TokenKind::Number).map_err(|_| {
            RcSimError::parse(line, format!("expected a numeric {}", what))
        })?;
        parse_value(&tok.text)
            .ok_or_else(|| RcSimError::parse(line, format!("invalid number: {}", tok.text)))
    }

    fn expect_count(&mut self, what: &str) -> Result<usize> {
        let line = self.current.line;
        let tok = self.expect(TokenKind::Number)?;
        tok.text
            .parse::<usize>()
            .map_err(|_| RcSimError::parse(line, format!("{} must be a whole number", what)))
    }

    fn parse_directive(&mut self, ast: &mut CircuitAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".source" => {
                let word = self.expect(TokenKind::Identifier)?.text;
                let source = SourceType::from_keyword(&word).ok_or_else(|| {
                    RcSimError::parse(line, format!("unknown source type: {}", word))
                })?;
                ast.source_type = Some(source);
            }
            ".mode" => {
                let word = self.expect(TokenKind::Identifier)?.text;
                let mode = Mode::from_keyword(&word)
                    .ok_or_else(|| RcSimError::parse(line, format!("unknown mode: {}", word)))?;
                ast.mode = Some(mode);
            }
            ".temp" => ast.temperature = Some(self.expect_value("temperature")?),
            ".tc" => ast.temp_coefficient = Some(self.expect_value("temperature coefficient")?),
            ".v0" => ast.initial_voltage = Some(self.expect_value("initial voltage")?),
            ".points" => ast.num_points = Some(self.expect_count("point count")?),
            ".export" => self.parse_export_options(&mut ast.export, line)?,
            _ => {
                return Err(RcSimError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    /// Parse `name=value` pairs until end of line.
    fn parse_export_options(&mut self, export: &mut ExportDef, line: usize) -> Result<()> {
        while self.current.kind == TokenKind::Identifier {
            let option = self.current.text.to_lowercase();
            self.advance()?;
            self.expect(TokenKind::Equals)?;

            match option.as_str() {
                "precision" => export.precision = Some(self.expect_count("precision")?),
                "separator" | "sep" => {
                    let word = self.expect(TokenKind::Identifier)?.text;
                    let separator = DecimalSeparator::from_keyword(&word).ok_or_else(|| {
                        RcSimError::parse(line, format!("unknown decimal separator: {}", word))
                    })?;
                    export.separator = Some(separator);
                }
                _ => {
                    return Err(RcSimError::parse(
                        line,
                        format!("unknown export option: {}", option),
                    ));
                }
            }
        }
        Ok(())
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let component_type = ComponentType::from_token(&name).ok_or_else(|| {
            RcSimError::UnknownComponentType {
                component_type: name.clone(),
                line,
            }
        })?;

        let value = self.expect_value(component_type.description())?;

        Ok(ComponentDef {
            component_type,
            name,
            value,
            line,
        })
    }
}
