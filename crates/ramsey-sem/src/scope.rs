//! Symbol table: a stack of scope maps holding non-owning references into
//! the AST. Popping a scope just drops its map; the referenced AST nodes
//! live on inside the tree the parser built.

use rustc_hash::FxHashMap;

use ramsey_par::ast::{Function, Parameter, Type};
use ramsey_util::Symbol;

/// Where a variable's declaration lives: either a function parameter or a
/// local `decl` statement. Both expose a type and a `Cell<i32>` the code
/// generator later writes a frame offset into.
#[derive(Debug, Clone, Copy)]
pub enum VarBinding<'ast> {
    Param(&'ast Parameter),
    Local(&'ast ramsey_par::ast::DeclStmt),
}

impl<'ast> VarBinding<'ast> {
    pub fn ty(self) -> Type {
        match self {
            VarBinding::Param(p) => p.ty,
            VarBinding::Local(d) => d.ty,
        }
    }

    pub fn set_offset(self, offset: i32) {
        match self {
            VarBinding::Param(p) => p.offset.set(offset),
            VarBinding::Local(d) => d.offset.set(offset),
        }
    }

    pub fn offset(self) -> i32 {
        match self {
            VarBinding::Param(p) => p.offset.get(),
            VarBinding::Local(d) => d.offset.get(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SymbolEntry<'ast> {
    Function(&'ast Function),
    Variable(VarBinding<'ast>),
}

/// A stack of scope maps, plus the bits of state tracked alongside it:
/// the currently enclosing function (for `toss` type checking) and a
/// while-nesting counter (for `smash` validity).
pub struct ScopeStack<'ast> {
    scopes: Vec<FxHashMap<Symbol, SymbolEntry<'ast>>>,
    enclosing_function: Vec<&'ast Function>,
    loop_depth: u32,
}

impl<'ast> ScopeStack<'ast> {
    pub fn new() -> Self {
        ScopeStack { scopes: vec![FxHashMap::default()], enclosing_function: Vec::new(), loop_depth: 0 }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "popped the global scope");
    }

    /// Inserts `name` into the top-most scope. Returns `false` if the name
    /// already exists in that same scope (a collision); other scopes are
    /// not consulted, since shadowing across scopes is not a collision.
    pub fn insert(&mut self, name: Symbol, sym: SymbolEntry<'ast>) -> bool {
        let top = self.scopes.last_mut().expect("scope stack is never empty");
        if top.contains_key(&name) {
            return false;
        }
        top.insert(name, sym);
        true
    }

    pub fn lookup(&self, name: Symbol) -> Option<SymbolEntry<'ast>> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name).copied())
    }

    pub fn enter_function(&mut self, function: &'ast Function) {
        self.enclosing_function.push(function);
    }

    pub fn exit_function(&mut self) {
        self.enclosing_function.pop();
    }

    pub fn enclosing_function(&self) -> Option<&'ast Function> {
        self.enclosing_function.last().copied()
    }

    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
    }

    pub fn exit_loop(&mut self) {
        self.loop_depth -= 1;
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }
}

impl<'ast> Default for ScopeStack<'ast> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_searches_scopes_top_down() {
        let func = Function {
            name: Symbol::intern("f"),
            params: vec![],
            return_type: Type::In,
            body: vec![],
            line: 1,
            frame_size: Default::default(),
        };
        let mut scopes = ScopeStack::new();
        scopes.insert(Symbol::intern("f"), SymbolEntry::Function(&func));
        scopes.push_scope();
        assert!(scopes.lookup(Symbol::intern("f")).is_some());
        assert!(scopes.lookup(Symbol::intern("missing")).is_none());
    }

    #[test]
    fn insert_rejects_collision_in_same_scope() {
        let func = Function {
            name: Symbol::intern("f"),
            params: vec![],
            return_type: Type::In,
            body: vec![],
            line: 1,
            frame_size: Default::default(),
        };
        let mut scopes = ScopeStack::new();
        assert!(scopes.insert(Symbol::intern("f"), SymbolEntry::Function(&func)));
        assert!(!scopes.insert(Symbol::intern("f"), SymbolEntry::Function(&func)));
    }

    #[test]
    fn loop_depth_tracks_nesting() {
        let mut scopes = ScopeStack::new();
        assert!(!scopes.in_loop());
        scopes.enter_loop();
        scopes.enter_loop();
        assert!(scopes.in_loop());
        scopes.exit_loop();
        assert!(scopes.in_loop());
        scopes.exit_loop();
        assert!(!scopes.in_loop());
    }
}
