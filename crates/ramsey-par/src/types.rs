//! Type-name parsing: the four keyword tokens that name a Ramsey type.

use ramsey_lex::TokenKind;
use ramsey_util::error::ParseError;

use crate::ast::Type;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parses a type name if the current token is one of the four type
    /// keywords, without consuming anything otherwise.
    pub fn parse_type(&mut self) -> Result<Type, ParseError> {
        let ty = match self.kind() {
            TokenKind::KwIn => Type::In,
            TokenKind::KwBig => Type::Big,
            TokenKind::KwSmall => Type::Small,
            TokenKind::KwBoo => Type::Boo,
            other => {
                return Err(self.error(format!("expected a type name, found {other:?}")));
            }
        };
        self.advance();
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramsey_lex::lex;

    #[test]
    fn parses_each_type_keyword() {
        for (src, expected) in [
            ("in\n", Type::In),
            ("big\n", Type::Big),
            ("small\n", Type::Small),
            ("boo\n", Type::Boo),
        ] {
            let tokens = lex(src).unwrap();
            let mut parser = Parser::new(&tokens);
            assert_eq!(parser.parse_type().unwrap(), expected);
        }
    }

    #[test]
    fn rejects_non_type_token() {
        let tokens = lex("main\n").unwrap();
        let mut parser = Parser::new(&tokens);
        assert!(parser.parse_type().is_err());
    }
}
