//! Lexical analysis for Ramsey source: turns a source string into a flat
//! vector of [`Token`]s terminated by `Eof`, or a [`ramsey_util::error::LexError`].

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::{lex, Lexer};
pub use token::{Token, TokenKind};
