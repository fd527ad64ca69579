//! String interning for identifier handling.
//!
//! [`Symbol`] is a compact (4-byte) handle to an interned string. Every
//! identifier lexeme the lexer produces is interned once; afterwards,
//! symbol comparisons (scope lookups, redeclaration checks) are index
//! comparisons rather than string comparisons.
//!
//! ```
//! use ramsey_util::symbol::Symbol;
//!
//! let a = Symbol::intern("x");
//! let b = Symbol::intern("x");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "x");
//! ```

mod interner;

use interner::Interner;
use std::fmt;
use std::sync::{Mutex, OnceLock};

fn global_interner() -> &'static Mutex<Interner> {
    static INTERNER: OnceLock<Mutex<Interner>> = OnceLock::new();
    INTERNER.get_or_init(|| Mutex::new(Interner::new()))
}

/// A compact, `Copy` handle to an interned identifier string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        let mut interner = global_interner().lock().expect("interner poisoned");
        Symbol(interner.intern(s))
    }

    pub fn as_str(&self) -> &'static str {
        global_interner()
            .lock()
            .expect("interner poisoned")
            .resolve(self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_equal_symbol() {
        assert_eq!(Symbol::intern("toss"), Symbol::intern("toss"));
    }

    #[test]
    fn display_matches_source_text() {
        let sym = Symbol::intern("endfun");
        assert_eq!(format!("{sym}"), "endfun");
    }
}
