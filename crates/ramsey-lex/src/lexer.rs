//! Two-phase lexer for Ramsey source.
//!
//! Phase 1 scans raw bytes into preprocessing tokens (identifier, number,
//! number_hex, string, a maximal run of operator/punctuator characters, or
//! eol). Phase 2 rewrites each preprocessing token into its final lexical
//! token: identifiers are checked against the keyword table, and punctuator
//! runs are re-segmented by maximal munch over the known operator set.

use ramsey_util::error::{LexError, LexResult};
use ramsey_util::Symbol;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Characters that may appear in an operator/punctuator run.
const PUNCOP_CHARS: &[u8] = b"+-*/<>=!,()";

/// Two-character operators, tried before falling back to one character.
/// Order doesn't matter for correctness (all prefixes are distinct) but
/// longest-first keeps the intent obvious.
const TWO_CHAR_OPS: &[(&[u8; 2], TokenKind)] = &[
    (b"<-", TokenKind::Arrow),
    (b"<=", TokenKind::LtEq),
    (b">=", TokenKind::GtEq),
    (b"!=", TokenKind::NotEq),
];

fn one_char_op(b: u8) -> Option<TokenKind> {
    Some(match b {
        b'+' => TokenKind::Plus,
        b'-' => TokenKind::Minus,
        b'*' => TokenKind::Star,
        b'/' => TokenKind::Slash,
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b'=' => TokenKind::Eq,
        b'<' => TokenKind::Lt,
        b'>' => TokenKind::Gt,
        b',' => TokenKind::Comma,
        _ => return None,
    })
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b)
}

/// A preprocessing token, the output of lexer phase 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PpKind {
    Identifier,
    Number,
    NumberHex,
    String,
    Puncop,
    Eol,
}

struct PpToken<'a> {
    kind: PpKind,
    lexeme: &'a str,
    line: u32,
}

/// Scans Ramsey source text into a vector of lexical tokens, including a
/// trailing `Eof`.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { cursor: Cursor::new(source) }
    }

    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while !self.cursor.is_at_end() {
            let pp = self.next_preprocessing_token()?;
            self.lower(pp, &mut tokens)?;
        }
        let last_line = tokens.last().map(|t| t.line).unwrap_or(1);
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eol) {
            tokens.push(Token::new(TokenKind::Eol, last_line));
        }
        tokens.push(Token::new(TokenKind::Eof, last_line));
        Ok(tokens)
    }

    /// Rewrites one preprocessing token into zero or more lexical tokens
    /// (a `puncop` run may expand into several).
    fn lower(&self, pp: PpToken<'a>, out: &mut Vec<Token>) -> LexResult<()> {
        match pp.kind {
            PpKind::Identifier => {
                if pp.lexeme == "true" {
                    out.push(Token::new(TokenKind::BoolTrue, pp.line));
                } else if pp.lexeme == "false" {
                    out.push(Token::new(TokenKind::BoolFalse, pp.line));
                } else if let Some(kw) = TokenKind::keyword_from_ident(pp.lexeme) {
                    out.push(Token::new(kw, pp.line));
                } else {
                    out.push(Token::new(TokenKind::Id(Symbol::intern(pp.lexeme)), pp.line));
                }
            }
            PpKind::Number => {
                out.push(Token::new(TokenKind::Number(Symbol::intern(pp.lexeme)), pp.line));
            }
            PpKind::NumberHex => {
                out.push(Token::new(TokenKind::NumberHex(Symbol::intern(pp.lexeme)), pp.line));
            }
            PpKind::String => {
                out.push(Token::new(TokenKind::Str(Symbol::intern(pp.lexeme)), pp.line));
            }
            PpKind::Eol => {
                out.push(Token::new(TokenKind::Eol, pp.line));
            }
            PpKind::Puncop => {
                self.segment_puncop(pp.lexeme, pp.line, out)?;
            }
        }
        Ok(())
    }

    /// Maximal-munch re-segmentation of a punctuator run into tokens.
    fn segment_puncop(&self, run: &str, line: u32, out: &mut Vec<Token>) -> LexResult<()> {
        let bytes = run.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if i + 1 < bytes.len() {
                let pair = [bytes[i], bytes[i + 1]];
                if let Some((_, kind)) = TWO_CHAR_OPS.iter().find(|(p, _)| **p == pair) {
                    out.push(Token::new(*kind, line));
                    i += 2;
                    continue;
                }
            }
            if let Some(kind) = one_char_op(bytes[i]) {
                out.push(Token::new(kind, line));
                i += 1;
                continue;
            }
            return Err(LexError::BadPunctuatorRun { line, run: run.to_string() });
        }
        Ok(())
    }

    /// Phase 1: produces the next preprocessing token, skipping whitespace
    /// (other than newlines) and `#` comments first.
    fn next_preprocessing_token(&mut self) -> LexResult<PpToken<'a>> {
        self.skip_insignificant();

        let line = self.cursor.line();
        if self.cursor.is_at_end() {
            return Ok(PpToken { kind: PpKind::Eol, lexeme: "\n", line });
        }

        let b = self.cursor.current();
        if b == b'\n' {
            self.cursor.advance();
            return Ok(PpToken { kind: PpKind::Eol, lexeme: "\n", line });
        }
        if is_ident_start(b) {
            return Ok(self.scan_identifier(line));
        }
        if b.is_ascii_digit() {
            return self.scan_number(line);
        }
        if b == b'"' {
            return self.scan_string(line);
        }
        if PUNCOP_CHARS.contains(&b) {
            return Ok(self.scan_puncop(line));
        }
        self.cursor.advance();
        Err(LexError::StrayCharacter { line, ch: b as char })
    }

    /// Skips spaces/tabs/carriage-returns and `#`-to-end-of-line comments.
    /// Leaves newlines in place; they are significant `eol` tokens.
    fn skip_insignificant(&mut self) {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' => self.cursor.advance(),
                b'#' => {
                    while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_identifier(&mut self, line: u32) -> PpToken<'a> {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        PpToken { kind: PpKind::Identifier, lexeme: self.cursor.slice_from(start), line }
    }

    fn scan_number(&mut self, line: u32) -> LexResult<PpToken<'a>> {
        let start = self.cursor.position();
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(1), b'x' | b'X') {
            self.cursor.advance();
            self.cursor.advance();
            while self.cursor.current().is_ascii_hexdigit() {
                self.cursor.advance();
            }
            return Ok(PpToken { kind: PpKind::NumberHex, lexeme: self.cursor.slice_from(start), line });
        }
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }
        Ok(PpToken { kind: PpKind::Number, lexeme: self.cursor.slice_from(start), line })
    }

    fn scan_string(&mut self, line: u32) -> LexResult<PpToken<'a>> {
        self.cursor.advance(); // opening quote
        let mut value = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString { line });
            }
            match self.cursor.current() {
                b'"' => {
                    self.cursor.advance();
                    break;
                }
                b'\n' => return Err(LexError::NewlineInString { line }),
                b'\\' => {
                    self.cursor.advance();
                    let esc = self.cursor.current();
                    let mapped = match esc {
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        b'0' => 0,
                        b'\\' => b'\\',
                        b'"' => b'"',
                        other => {
                            return Err(LexError::BadEscape { line, ch: other as char });
                        }
                    };
                    value.push(mapped as char);
                    self.cursor.advance();
                }
                other => {
                    value.push(other as char);
                    self.cursor.advance();
                }
            }
        }
        let leaked: &'a str = Box::leak(value.into_boxed_str());
        Ok(PpToken { kind: PpKind::String, lexeme: leaked, line })
    }

    fn scan_puncop(&mut self, line: u32) -> PpToken<'a> {
        let start = self.cursor.position();
        while PUNCOP_CHARS.contains(&self.cursor.current()) {
            self.cursor.advance();
        }
        PpToken { kind: PpKind::Puncop, lexeme: self.cursor.slice_from(start), line }
    }
}

/// Convenience entry point: lexes `source` into a token stream.
pub fn lex(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_keywords_and_identifiers() {
        assert_eq!(
            kinds("fun main\n"),
            vec![TokenKind::KwFun, TokenKind::Id(Symbol::intern("main")), TokenKind::Eol, TokenKind::Eof]
        );
    }

    #[test]
    fn lexes_decimal_and_hex_numbers() {
        let ks = kinds("42 0xFF\n");
        assert_eq!(ks[0], TokenKind::Number(Symbol::intern("42")));
        assert_eq!(ks[1], TokenKind::NumberHex(Symbol::intern("0xFF")));
    }

    #[test]
    fn maximal_munch_disambiguates_arrow_from_less_and_minus() {
        assert_eq!(kinds("x<-1\n")[1], TokenKind::Arrow);
    }

    #[test]
    fn maximal_munch_splits_adjacent_single_char_operators() {
        let ks = kinds("(-1)\n");
        assert_eq!(ks[0], TokenKind::LParen);
        assert_eq!(ks[1], TokenKind::Minus);
    }

    #[test]
    fn relational_operators_distinguish_le_from_lt() {
        assert_eq!(kinds("a<=b\n")[1], TokenKind::LtEq);
        assert_eq!(kinds("a<b\n")[1], TokenKind::Lt);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("# whole line\nin x\n")[0], TokenKind::KwIn);
    }

    #[test]
    fn string_literal_supports_escapes() {
        let tokens = lex("\"a\\nb\"\n").unwrap();
        match tokens[0].kind {
            TokenKind::Str(sym) => assert_eq!(sym.as_str(), "a\nb"),
            other => panic!("expected string token, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(matches!(lex("\"abc"), Err(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn newline_inside_string_is_an_error() {
        assert!(matches!(lex("\"abc\ndef\""), Err(LexError::NewlineInString { .. })));
    }

    #[test]
    fn stray_character_is_an_error() {
        assert!(matches!(lex("@\n"), Err(LexError::StrayCharacter { .. })));
    }

    #[test]
    fn bad_escape_is_an_error() {
        assert!(matches!(lex("\"\\q\"\n"), Err(LexError::BadEscape { .. })));
    }

    #[test]
    fn digits_do_not_continue_identifiers() {
        let tokens = lex("x1\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Id(Symbol::intern("x")));
        assert_eq!(tokens[1].kind, TokenKind::Number(Symbol::intern("1")));
    }

    #[test]
    fn line_numbers_increase_monotonically() {
        let tokens = lex("in x\nbig y\n").unwrap();
        let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
        assert!(lines.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The lexer never panics on arbitrary identifier/number/operator
        /// soup, and it always either succeeds or reports a `LexError`.
        #[test]
        fn never_panics_on_punctuator_soup(s in "[a-zA-Z0-9_+*/<>=!, ()\n]{0,64}") {
            let _ = lex(&s);
        }

        /// Line numbers in a successful tokenization are always
        /// non-decreasing, regardless of input shape.
        #[test]
        fn line_numbers_never_decrease(s in "[a-zA-Z0-9_ \n]{0,64}") {
            if let Ok(tokens) = lex(&s) {
                let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
                prop_assert!(lines.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
