//! AST node definitions for Ramsey.
//!
//! Nodes own their children directly (`Vec`/`Box`), no arena or linked-list
//! indirection. Expression nodes cache their resolved type in a `Cell` so
//! the semantic analyzer can memoize through a shared reference; `function`
//! and `parameter` nodes cache a frame offset the same way, written during
//! code generation.

use std::cell::Cell;

use ramsey_util::Symbol;

/// The four Ramsey type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    In,
    Big,
    Small,
    Boo,
}

impl Type {
    /// Size in bytes of a value of this type.
    pub fn size(self) -> u32 {
        match self {
            Type::In | Type::Big => 4,
            Type::Small => 2,
            Type::Boo => 1,
        }
    }
}

/// A whole compiled source file: an ordered list of functions.
#[derive(Debug, Clone)]
pub struct Program {
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: Symbol,
    pub params: Vec<Parameter>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
    pub line: u32,
    /// Total size of the local frame, assigned during code generation.
    pub frame_size: Cell<i32>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub ty: Type,
    pub name: Symbol,
    pub line: u32,
    /// Offset from the frame pointer, assigned during code generation.
    pub offset: Cell<i32>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Decl(DeclStmt),
    ExprList(ExprListStmt),
    If(IfStmt),
    While(WhileStmt),
    Jump(JumpStmt),
}

impl Stmt {
    pub fn line(&self) -> u32 {
        match self {
            Stmt::Decl(s) => s.line,
            Stmt::ExprList(s) => s.line,
            Stmt::If(s) => s.line,
            Stmt::While(s) => s.line,
            Stmt::Jump(s) => s.line,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeclStmt {
    pub ty: Type,
    pub name: Symbol,
    pub init: Option<Expr>,
    pub line: u32,
    /// Offset from the frame pointer, assigned during code generation.
    pub offset: Cell<i32>,
}

#[derive(Debug, Clone)]
pub struct ExprListStmt {
    pub exprs: Vec<Expr>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    pub elf: Option<Box<ElfStmt>>,
    pub else_body: Option<Vec<Stmt>>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct ElfStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub elf: Option<Box<ElfStmt>>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Toss,
    Smash,
}

#[derive(Debug, Clone)]
pub struct JumpStmt {
    pub kind: JumpKind,
    /// Only present for `toss`.
    pub value: Option<Expr>,
    pub line: u32,
}

/// An expression node. Every variant caches its resolved type once the
/// semantic analyzer has visited it.
#[derive(Debug, Clone)]
pub enum Expr {
    Assignment(Box<AssignmentExpr>),
    LogicalOr(Box<ChainExpr>),
    LogicalAnd(Box<ChainExpr>),
    Equality(Box<BinaryExpr>),
    Relational(Box<BinaryExpr>),
    Additive(Box<OpChainExpr>),
    Multiplicative(Box<OpChainExpr>),
    Prefix(Box<PrefixExpr>),
    Postfix(Box<PostfixExpr>),
    Primary(Box<PrimaryNode>),
}

impl Expr {
    pub fn line(&self) -> u32 {
        match self {
            Expr::Assignment(e) => e.line,
            Expr::LogicalOr(e) | Expr::LogicalAnd(e) => e.line,
            Expr::Equality(e) | Expr::Relational(e) => e.line,
            Expr::Additive(e) | Expr::Multiplicative(e) => e.line,
            Expr::Prefix(e) => e.line,
            Expr::Postfix(e) => e.line,
            Expr::Primary(e) => e.line,
        }
    }

    fn ty_cell(&self) -> &Cell<Option<Type>> {
        match self {
            Expr::Assignment(e) => &e.ty,
            Expr::LogicalOr(e) | Expr::LogicalAnd(e) => &e.ty,
            Expr::Equality(e) | Expr::Relational(e) => &e.ty,
            Expr::Additive(e) | Expr::Multiplicative(e) => &e.ty,
            Expr::Prefix(e) => &e.ty,
            Expr::Postfix(e) => &e.ty,
            Expr::Primary(e) => &e.ty,
        }
    }

    pub fn resolved_type(&self) -> Option<Type> {
        self.ty_cell().get()
    }

    pub fn set_resolved_type(&self, ty: Type) {
        self.ty_cell().set(Some(ty));
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub target: Expr,
    pub value: Expr,
    pub line: u32,
    pub ty: Cell<Option<Type>>,
}

/// `or`/`and` chains: an ordered list of ≥ 2 operands, no explicit
/// operator tokens (the operator is implied by which variant holds it).
#[derive(Debug, Clone)]
pub struct ChainExpr {
    pub operands: Vec<Expr>,
    pub line: u32,
    pub ty: Cell<Option<Type>>,
}

/// Equality/relational: strictly two operands, one operator token.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub op: RelOp,
    pub lhs: Expr,
    pub rhs: Expr,
    pub line: u32,
    pub ty: Cell<Option<Type>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

/// Additive/multiplicative: ≥ 2 operands, `operands.len() - 1` operators.
#[derive(Debug, Clone)]
pub struct OpChainExpr {
    pub operands: Vec<Expr>,
    pub operators: Vec<ArithOp>,
    pub line: u32,
    pub ty: Cell<Option<Type>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
    Not,
}

#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub op: PrefixOp,
    pub operand: Expr,
    pub line: u32,
    pub ty: Cell<Option<Type>>,
}

/// A function call: `name(args...)`. Always constructed with an argument
/// list (possibly empty) — a bare identifier with no call parses as
/// [`PrimaryExpr::Ident`] instead.
#[derive(Debug, Clone)]
pub struct PostfixExpr {
    pub name: Symbol,
    pub args: Vec<Expr>,
    pub line: u32,
    pub ty: Cell<Option<Type>>,
}

#[derive(Debug, Clone)]
pub enum PrimaryExpr {
    Ident(Symbol),
    Number(Symbol),
    NumberHex(Symbol),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub struct PrimaryNode {
    pub value: PrimaryExpr,
    pub line: u32,
    pub ty: Cell<Option<Type>>,
}
