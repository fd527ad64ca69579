//! Unifies the four pass-level error kinds into one fallible return type
//! for [`crate::Session::compile`], and maps each to the CLI's exit
//! behavior: an error-class label for standard error, and exit code `1`.

use thiserror::Error;

use ramsey_util::error::{IoError, LexError, ParseError, SemanticError};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("{0}")]
    InvalidArguments(String),
}

impl CompileError {
    /// The error-class label the CLI contract prefixes diagnostics with.
    pub fn label(&self) -> &'static str {
        match self {
            CompileError::Lex(_) | CompileError::Parse(_) => "syntax error",
            CompileError::Semantic(_) => "semantic error",
            CompileError::Io(_) | CompileError::InvalidArguments(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_and_parse_errors_share_the_syntax_error_label() {
        let lex = CompileError::from(LexError::StrayCharacter { line: 1, ch: '$' });
        let parse = CompileError::from(ParseError::new(1, "bad"));
        assert_eq!(lex.label(), "syntax error");
        assert_eq!(parse.label(), "syntax error");
    }

    #[test]
    fn semantic_errors_get_their_own_label() {
        let err = CompileError::from(SemanticError::new(1, "bad"));
        assert_eq!(err.label(), "semantic error");
    }

    #[test]
    fn io_and_argument_errors_fall_back_to_bare_error() {
        assert_eq!(CompileError::from(IoError::message("x")).label(), "error");
        assert_eq!(CompileError::InvalidArguments("x".into()).label(), "error");
    }
}
