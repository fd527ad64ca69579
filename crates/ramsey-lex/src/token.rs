//! The lexical token set.
//!
//! Ramsey has a closed token vocabulary: literals, a fixed operator and
//! punctuator set, keywords, and the end-of-line delimiter that the
//! grammar uses as a statement terminator.

use ramsey_util::Symbol;

/// A single lexical token together with the source line it started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Token { kind, line }
    }
}

/// The kind tag of a token, with lexeme data inlined for the variants
/// that carry one (identifiers and literals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Id(Symbol),
    Number(Symbol),
    NumberHex(Symbol),
    Str(Symbol),
    BoolTrue,
    BoolFalse,

    Plus,
    Minus,
    Star,
    Slash,
    Arrow, // `<-`, assignment
    LParen,
    RParen,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Comma,

    KwIn,
    KwBig,
    KwSmall,
    KwBoo,
    KwIf,
    KwElf,
    KwElse,
    KwEndif,
    KwWhile,
    KwSmash,
    KwEndwhile,
    KwFun,
    KwAs,
    KwEndfun,
    KwToss,
    KwMod,
    KwOr,
    KwAnd,
    KwNot,

    Eol,
    Eof,
}

impl TokenKind {
    /// Maps an identifier lexeme to its keyword token, if it is one.
    ///
    /// `true`/`false` are handled separately by the caller since they
    /// lex to literal kinds, not keyword kinds.
    pub fn keyword_from_ident(ident: &str) -> Option<TokenKind> {
        Some(match ident {
            "in" => TokenKind::KwIn,
            "big" => TokenKind::KwBig,
            "small" => TokenKind::KwSmall,
            "boo" => TokenKind::KwBoo,
            "if" => TokenKind::KwIf,
            "elf" => TokenKind::KwElf,
            "else" => TokenKind::KwElse,
            "endif" => TokenKind::KwEndif,
            "while" => TokenKind::KwWhile,
            "smash" => TokenKind::KwSmash,
            "endwhile" => TokenKind::KwEndwhile,
            "fun" => TokenKind::KwFun,
            "as" => TokenKind::KwAs,
            "endfun" => TokenKind::KwEndfun,
            "toss" => TokenKind::KwToss,
            "mod" => TokenKind::KwMod,
            "or" => TokenKind::KwOr,
            "and" => TokenKind::KwAnd,
            "not" => TokenKind::KwNot,
            _ => return None,
        })
    }

    /// True for the four type-name keywords.
    pub fn is_type_name(self) -> bool {
        matches!(
            self,
            TokenKind::KwIn | TokenKind::KwBig | TokenKind::KwSmall | TokenKind::KwBoo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_matches_known_words() {
        assert_eq!(TokenKind::keyword_from_ident("while"), Some(TokenKind::KwWhile));
        assert_eq!(TokenKind::keyword_from_ident("endfun"), Some(TokenKind::KwEndfun));
    }

    #[test]
    fn keyword_lookup_rejects_plain_identifiers() {
        assert_eq!(TokenKind::keyword_from_ident("counter"), None);
    }
}
