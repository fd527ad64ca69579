//! Code generation for Ramsey: walks a semantically-checked program and
//! emits 32-bit x86 AT&T assembly text, one function at a time.
//!
//! There's no error type here beyond the i/o failures that can occur while
//! writing the output: by the time a program reaches this crate, semantic
//! analysis has already rejected anything codegen can't handle. A lookup
//! that fails here is an internal inconsistency, not a user-facing error,
//! and panics rather than threading through a `Result`.

pub mod asm;
pub mod types;

pub use asm::{generate_to, AsmGenerator};
