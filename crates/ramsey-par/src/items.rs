//! Top-level item parsing: functions and their parameter lists.
//!
//! `function := 'fun' id '(' params? ')' ('as' type)? eol stmt* 'endfun' eol`

use std::cell::Cell;

use ramsey_lex::TokenKind;
use ramsey_util::error::ParseError;
use ramsey_util::Symbol;

use crate::ast::{Function, Parameter, Type};
use crate::Parser;

impl<'a> Parser<'a> {
    pub fn parse_function(&mut self) -> Result<Function, ParseError> {
        let line = self.line();
        self.expect(TokenKind::KwFun, "'fun'")?;
        let name = self.parse_ident("function name")?;

        self.expect(TokenKind::LParen, "'('")?;
        let params = if self.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_params()?
        };
        self.expect(TokenKind::RParen, "')'")?;

        let return_type = if self.eat(TokenKind::KwAs) {
            self.parse_type()?
        } else {
            Type::In
        };
        self.expect(TokenKind::Eol, "end of line after function header")?;

        let mut body = Vec::new();
        self.skip_eols();
        while !self.check(TokenKind::KwEndfun) {
            if self.check(TokenKind::Eof) {
                return Err(self.error("unexpected end of file inside function body, expected 'endfun'"));
            }
            body.push(self.parse_stmt()?);
            self.skip_eols();
        }
        self.expect(TokenKind::KwEndfun, "'endfun'")?;
        self.expect(TokenKind::Eol, "end of line after 'endfun'")?;

        Ok(Function {
            name,
            params,
            return_type,
            body,
            line,
            frame_size: Cell::new(0),
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut params = vec![self.parse_param()?];
        while self.eat(TokenKind::Comma) {
            params.push(self.parse_param()?);
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Parameter, ParseError> {
        let line = self.line();
        let ty = self.parse_type()?;
        let name = self.parse_ident("parameter name")?;
        Ok(Parameter { ty, name, line, offset: Cell::new(0) })
    }

    pub(crate) fn parse_ident(&mut self, what: &str) -> Result<Symbol, ParseError> {
        match self.kind() {
            TokenKind::Id(sym) => {
                self.advance();
                Ok(sym)
            }
            other => Err(self.error(format!("expected {what}, found {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramsey_lex::lex;

    fn parse_fn(src: &str) -> Function {
        let tokens = lex(src).unwrap();
        Parser::new(&tokens).parse_function().unwrap()
    }

    #[test]
    fn parses_function_with_no_params_and_default_return_type() {
        let f = parse_fn("fun main()\nendfun\n");
        assert_eq!(f.name.as_str(), "main");
        assert!(f.params.is_empty());
        assert_eq!(f.return_type, Type::In);
    }

    #[test]
    fn parses_function_with_params_and_explicit_return_type() {
        let f = parse_fn("fun add(in x, in y) as big\nendfun\n");
        assert_eq!(f.params.len(), 2);
        assert_eq!(f.params[0].name.as_str(), "x");
        assert_eq!(f.return_type, Type::Big);
    }

    #[test]
    fn missing_endfun_reports_a_parse_error() {
        let tokens = lex("fun main()\nin x\n").unwrap();
        assert!(Parser::new(&tokens).parse_function().is_err());
    }
}
