//! Recursive-descent expression parsing.
//!
//! ```text
//! expr          := assignment
//! assignment    := or-expr ('<-' assignment)?
//! or-expr       := and-expr ('or' and-expr)*
//! and-expr      := eq-expr ('and' eq-expr)*
//! eq-expr       := rel-expr (('='|'!=') rel-expr)?        -- binary only
//! rel-expr      := add-expr (('<'|'>'|'<='|'>=') add-expr)?
//! add-expr      := mul-expr (('+'|'-') mul-expr)*
//! mul-expr      := prefix-expr (('*'|'/'|'mod') prefix-expr)*
//! prefix-expr   := ('-'|'not')? postfix-expr
//! postfix-expr  := primary ('(' expr-list? ')')?
//! primary       := id | number | hex-number | bool-literal | '(' expr ')'
//! ```
//!
//! Every routine that parses an optional chain collapses to its single
//! child when no operator followed, rather than wrapping a one-operand
//! node.

use std::cell::Cell;

use ramsey_lex::TokenKind;
use ramsey_util::error::ParseError;

use crate::ast::{
    ArithOp, AssignmentExpr, BinaryExpr, ChainExpr, Expr, OpChainExpr, PostfixExpr, PrefixExpr,
    PrefixOp, PrimaryExpr, PrimaryNode, RelOp,
};
use crate::Parser;

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let lhs = self.parse_or()?;
        if self.eat(TokenKind::Arrow) {
            if !is_bare_ident(&lhs) {
                return Err(self.error("left-hand side of assignment must be an identifier"));
            }
            let value = self.parse_assignment()?;
            return Ok(Expr::Assignment(Box::new(AssignmentExpr {
                target: lhs,
                value,
                line,
                ty: Cell::new(None),
            })));
        }
        Ok(lhs)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let mut operands = vec![self.parse_and()?];
        while self.eat(TokenKind::KwOr) {
            operands.push(self.parse_and()?);
        }
        Ok(collapse_or_chain(operands, line, Expr::LogicalOr))
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let mut operands = vec![self.parse_equality()?];
        while self.eat(TokenKind::KwAnd) {
            operands.push(self.parse_equality()?);
        }
        Ok(collapse_or_chain(operands, line, Expr::LogicalAnd))
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let lhs = self.parse_relational()?;
        let op = match self.kind() {
            TokenKind::Eq => RelOp::Eq,
            TokenKind::NotEq => RelOp::NotEq,
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.parse_relational()?;
        Ok(Expr::Equality(Box::new(BinaryExpr { op, lhs, rhs, line, ty: Cell::new(None) })))
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let lhs = self.parse_additive()?;
        let op = match self.kind() {
            TokenKind::Lt => RelOp::Lt,
            TokenKind::Gt => RelOp::Gt,
            TokenKind::LtEq => RelOp::LtEq,
            TokenKind::GtEq => RelOp::GtEq,
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.parse_additive()?;
        Ok(Expr::Relational(Box::new(BinaryExpr { op, lhs, rhs, line, ty: Cell::new(None) })))
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let mut operands = vec![self.parse_multiplicative()?];
        let mut operators = Vec::new();
        loop {
            let op = match self.kind() {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            operators.push(op);
            operands.push(self.parse_multiplicative()?);
        }
        Ok(collapse_op_chain(operands, operators, line, Expr::Additive))
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let mut operands = vec![self.parse_prefix()?];
        let mut operators = Vec::new();
        loop {
            let op = match self.kind() {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                TokenKind::KwMod => ArithOp::Mod,
                _ => break,
            };
            self.advance();
            operators.push(op);
            operands.push(self.parse_prefix()?);
        }
        Ok(collapse_op_chain(operands, operators, line, Expr::Multiplicative))
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let op = match self.kind() {
            TokenKind::Minus => Some(PrefixOp::Neg),
            TokenKind::KwNot => Some(PrefixOp::Not),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix();
        };
        self.advance();
        let operand = self.parse_postfix()?;
        Ok(Expr::Prefix(Box::new(PrefixExpr { op, operand, line, ty: Cell::new(None) })))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();

        if let TokenKind::Id(name) = self.kind() {
            // A bare identifier followed by '(' is a call; otherwise fall
            // through to ordinary primary parsing (which also accepts an
            // identifier, just without the call sugar).
            if self.peek_kind(1) == TokenKind::LParen {
                self.advance();
                self.advance();
                let args = if self.check(TokenKind::RParen) {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                self.expect(TokenKind::RParen, "')'")?;
                return Ok(Expr::Postfix(Box::new(PostfixExpr {
                    name,
                    args,
                    line,
                    ty: Cell::new(None),
                })));
            }
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let line = self.line();
        let value = match self.kind() {
            TokenKind::Id(sym) => {
                self.advance();
                PrimaryExpr::Ident(sym)
            }
            TokenKind::Number(sym) => {
                self.advance();
                PrimaryExpr::Number(sym)
            }
            TokenKind::NumberHex(sym) => {
                self.advance();
                PrimaryExpr::NumberHex(sym)
            }
            TokenKind::BoolTrue => {
                self.advance();
                PrimaryExpr::Bool(true)
            }
            TokenKind::BoolFalse => {
                self.advance();
                PrimaryExpr::Bool(false)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                return Ok(inner);
            }
            other => return Err(self.error(format!("expected an expression, found {other:?}"))),
        };
        Ok(Expr::Primary(Box::new(PrimaryNode { value, line, ty: Cell::new(None) })))
    }
}

/// Determines whether `expr` is a bare identifier (a postfix node with no
/// call arguments), the only legal assignment target.
fn is_bare_ident(expr: &Expr) -> bool {
    matches!(expr, Expr::Primary(p) if matches!(p.value, PrimaryExpr::Ident(_)))
}

fn collapse_or_chain(
    mut operands: Vec<Expr>,
    line: u32,
    wrap: impl FnOnce(Box<ChainExpr>) -> Expr,
) -> Expr {
    if operands.len() == 1 {
        return operands.pop().unwrap();
    }
    wrap(Box::new(ChainExpr { operands, line, ty: Cell::new(None) }))
}

fn collapse_op_chain(
    mut operands: Vec<Expr>,
    operators: Vec<ArithOp>,
    line: u32,
    wrap: impl FnOnce(Box<OpChainExpr>) -> Expr,
) -> Expr {
    if operands.len() == 1 {
        return operands.pop().unwrap();
    }
    wrap(Box::new(OpChainExpr { operands, operators, line, ty: Cell::new(None) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramsey_lex::lex;

    fn parse(src: &str) -> Expr {
        let tokens = lex(src).unwrap();
        Parser::new(&tokens).parse_expr().unwrap()
    }

    #[test]
    fn single_operand_or_chain_collapses_to_child() {
        assert!(matches!(parse("a\n"), Expr::Primary(_)));
    }

    #[test]
    fn assignment_requires_identifier_target() {
        let tokens = lex("1 <- 2\n").unwrap();
        assert!(Parser::new(&tokens).parse_expr().is_err());
    }

    #[test]
    fn additive_chain_collects_all_operands_and_operators() {
        match parse("a + b - c\n") {
            Expr::Additive(chain) => {
                assert_eq!(chain.operands.len(), 3);
                assert_eq!(chain.operators, vec![ArithOp::Add, ArithOp::Sub]);
            }
            other => panic!("expected Additive, got {other:?}"),
        }
    }

    #[test]
    fn equality_is_strictly_binary() {
        // `a = b = c` is not in the grammar: eq-expr has no repetition.
        let tokens = lex("a = b = c\n").unwrap();
        assert!(Parser::new(&tokens).parse_expr().is_err());
    }

    #[test]
    fn precedence_groups_multiplicative_inside_additive() {
        match parse("a + b * c\n") {
            Expr::Additive(chain) => match &chain.operands[1] {
                Expr::Multiplicative(_) => {}
                other => panic!("expected nested Multiplicative, got {other:?}"),
            },
            other => panic!("expected Additive, got {other:?}"),
        }
    }

    #[test]
    fn parses_function_call_with_arguments() {
        match parse("f(a, b)\n") {
            Expr::Postfix(p) => assert_eq!(p.args.len(), 2),
            other => panic!("expected Postfix, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_expression_does_not_create_a_wrapper_node() {
        match parse("(a + b)\n") {
            Expr::Additive(_) => {}
            other => panic!("expected Additive unwrapped from parens, got {other:?}"),
        }
    }

    #[test]
    fn prefix_not_and_negation_parse() {
        assert!(matches!(parse("not a\n"), Expr::Prefix(_)));
        assert!(matches!(parse("-a\n"), Expr::Prefix(_)));
    }
}
