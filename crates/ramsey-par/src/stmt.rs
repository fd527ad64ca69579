//! Statement parsing: declarations, expression statements, conditionals,
//! loops, and jumps.

use std::cell::Cell;

use ramsey_lex::TokenKind;
use ramsey_util::error::ParseError;

use crate::ast::{
    DeclStmt, ElfStmt, Expr, ExprListStmt, IfStmt, JumpKind, JumpStmt, Stmt, WhileStmt,
};
use crate::Parser;

impl<'a> Parser<'a> {
    pub fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.kind() {
            TokenKind::KwIn | TokenKind::KwBig | TokenKind::KwSmall | TokenKind::KwBoo => {
                self.parse_decl().map(Stmt::Decl)
            }
            TokenKind::KwIf => self.parse_if().map(Stmt::If),
            TokenKind::KwWhile => self.parse_while().map(Stmt::While),
            TokenKind::KwToss | TokenKind::KwSmash => self.parse_jump().map(Stmt::Jump),
            _ => self.parse_expr_list_stmt().map(Stmt::ExprList),
        }
    }

    fn parse_decl(&mut self) -> Result<DeclStmt, ParseError> {
        let line = self.line();
        let ty = self.parse_type()?;
        let name = self.parse_ident("variable name")?;
        let init = if self.eat(TokenKind::Arrow) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Eol, "end of line after declaration")?;
        Ok(DeclStmt { ty, name, init, line, offset: Cell::new(0) })
    }

    fn parse_expr_list_stmt(&mut self) -> Result<ExprListStmt, ParseError> {
        let line = self.line();
        let exprs = self.parse_expr_list()?;
        self.expect(TokenKind::Eol, "end of line after expression")?;
        Ok(ExprListStmt { exprs, line })
    }

    pub(crate) fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    fn parse_block_until(&mut self, stop: &[TokenKind]) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        self.skip_eols();
        while !stop.contains(&self.kind()) {
            if self.check(TokenKind::Eof) {
                return Err(self.error("unexpected end of file inside block"));
            }
            stmts.push(self.parse_stmt()?);
            self.skip_eols();
        }
        Ok(stmts)
    }

    fn parse_if(&mut self) -> Result<IfStmt, ParseError> {
        let line = self.line();
        self.expect(TokenKind::KwIf, "'if'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::Eol, "end of line after 'if' condition")?;

        let then_body =
            self.parse_block_until(&[TokenKind::KwElf, TokenKind::KwElse, TokenKind::KwEndif])?;

        let elf = if self.check(TokenKind::KwElf) {
            Some(Box::new(self.parse_elf()?))
        } else {
            None
        };

        let else_body = if self.eat(TokenKind::KwElse) {
            self.expect(TokenKind::Eol, "end of line after 'else'")?;
            Some(self.parse_block_until(&[TokenKind::KwEndif])?)
        } else {
            None
        };

        self.expect(TokenKind::KwEndif, "'endif'")?;
        self.expect(TokenKind::Eol, "end of line after 'endif'")?;

        Ok(IfStmt { condition, then_body, elf, else_body, line })
    }

    fn parse_elf(&mut self) -> Result<ElfStmt, ParseError> {
        let line = self.line();
        self.expect(TokenKind::KwElf, "'elf'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::Eol, "end of line after 'elf' condition")?;

        let body =
            self.parse_block_until(&[TokenKind::KwElf, TokenKind::KwElse, TokenKind::KwEndif])?;

        let elf = if self.check(TokenKind::KwElf) {
            Some(Box::new(self.parse_elf()?))
        } else {
            None
        };

        Ok(ElfStmt { condition, body, elf, line })
    }

    fn parse_while(&mut self) -> Result<WhileStmt, ParseError> {
        let line = self.line();
        self.expect(TokenKind::KwWhile, "'while'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::Eol, "end of line after 'while' condition")?;

        let body = self.parse_block_until(&[TokenKind::KwEndwhile])?;

        self.expect(TokenKind::KwEndwhile, "'endwhile'")?;
        self.expect(TokenKind::Eol, "end of line after 'endwhile'")?;

        Ok(WhileStmt { condition, body, line })
    }

    fn parse_jump(&mut self) -> Result<JumpStmt, ParseError> {
        let line = self.line();
        if self.eat(TokenKind::KwSmash) {
            self.expect(TokenKind::Eol, "end of line after 'smash'")?;
            return Ok(JumpStmt { kind: JumpKind::Smash, value: None, line });
        }
        self.expect(TokenKind::KwToss, "'toss'")?;
        let value = Some(self.parse_expr()?);
        self.expect(TokenKind::Eol, "end of line after 'toss' expression")?;
        Ok(JumpStmt { kind: JumpKind::Toss, value, line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramsey_lex::lex;

    fn parse_one(src: &str) -> Stmt {
        let tokens = lex(src).unwrap();
        Parser::new(&tokens).parse_stmt().unwrap()
    }

    #[test]
    fn parses_declaration_without_initializer() {
        assert!(matches!(parse_one("in x\n"), Stmt::Decl(_)));
    }

    #[test]
    fn parses_declaration_with_initializer() {
        let stmt = parse_one("in x <- 5\n");
        match stmt {
            Stmt::Decl(d) => assert!(d.init.is_some()),
            other => panic!("expected Decl, got {other:?}"),
        }
    }

    #[test]
    fn parses_if_elf_else_chain() {
        let src = "if (a)\nsmash\nelf (b)\nsmash\nelse\nsmash\nendif\n";
        let stmt = parse_one(src);
        match stmt {
            Stmt::If(s) => {
                assert!(s.elf.is_some());
                assert!(s.else_body.is_some());
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn parses_while_loop() {
        assert!(matches!(parse_one("while (a)\nsmash\nendwhile\n"), Stmt::While(_)));
    }

    #[test]
    fn parses_smash_and_toss() {
        assert!(matches!(parse_one("smash\n"), Stmt::Jump(_)));
        assert!(matches!(parse_one("toss 1\n"), Stmt::Jump(_)));
    }
}
