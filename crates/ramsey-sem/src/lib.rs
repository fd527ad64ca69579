//! Semantic analysis for Ramsey: resolves names against a scope stack,
//! checks every type rule, and memoizes the resolved type of each
//! expression node for the code generator to read back.

pub mod analysis;
pub mod scope;
pub mod types;

pub use analysis::analyze;
pub use scope::{ScopeStack, SymbolEntry, VarBinding};
