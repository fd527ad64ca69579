//! Core error types shared across every compiler stage.
//!
//! Each pass of the compiler fails with exactly one of these four kinds;
//! `ramsey-drv` unifies them into `CompileError` (see its `lib.rs`) so the
//! pipeline has a single fallible return type end to end.

use thiserror::Error;

/// Error raised while scanning source text into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("line {line}: stray '{ch}' character")]
    StrayCharacter { line: u32, ch: char },

    #[error("line {line}: newline in string literal")]
    NewlineInString { line: u32 },

    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: u32 },

    #[error("line {line}: bad escape sequence '\\{ch}'")]
    BadEscape { line: u32, ch: char },

    #[error("line {line}: couldn't process punctuator run '{run}'")]
    BadPunctuatorRun { line: u32, run: String },
}

/// Error raised while parsing a token stream into an AST.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub message: String,
}

impl ParseError {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        ParseError {
            line,
            message: message.into(),
        }
    }
}

/// Error raised while resolving scopes, checking types, and matching
/// function signatures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct SemanticError {
    pub line: u32,
    pub message: String,
}

impl SemanticError {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        SemanticError {
            line,
            message: message.into(),
        }
    }
}

/// Error raised by a downstream byte sink or an external process spawn.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Message(String),
}

impl IoError {
    pub fn message(message: impl Into<String>) -> Self {
        IoError::Message(message.into())
    }
}

pub type LexResult<T> = std::result::Result<T, LexError>;
pub type ParseResult<T> = std::result::Result<T, ParseError>;
pub type SemanticResult<T> = std::result::Result<T, SemanticError>;
pub type IoResult<T> = std::result::Result<T, IoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_messages_carry_line_numbers() {
        let err = LexError::StrayCharacter { line: 4, ch: '$' };
        assert_eq!(err.to_string(), "line 4: stray '$' character");
    }

    #[test]
    fn parse_error_formats_with_message() {
        let err = ParseError::new(7, "expected 'endfun'");
        assert_eq!(err.to_string(), "line 7: expected 'endfun'");
    }
}
