//! 32-bit x86 AT&T assembly generator.
//!
//! One [`AsmGenerator`] walks the whole program. Per-function state (the
//! prologue/body buffers, the frame allocator, the register pool, and the
//! label stacks) is reset between functions; the label counter is the only
//! piece that stays monotonic across the whole run, so every label in the
//! emitted file is unique.

use std::collections::VecDeque;
use std::io::Write;

use ramsey_par::ast::{
    ArithOp, ElfStmt, Expr, Function, IfStmt, JumpKind, JumpStmt, Parameter, PrefixOp,
    PrimaryExpr, Program, RelOp, Stmt, Type, WhileStmt,
};
use ramsey_sem::scope::{ScopeStack, SymbolEntry, VarBinding};
use ramsey_util::error::{IoError, IoResult};

use crate::types::{register_name, LONG_REGISTERS};

/// Generates assembly for `program` and writes it to `sink`, one function
/// at a time (prologue buffer, then body buffer, flushed as each function
/// finishes).
pub fn generate_to<W: Write>(program: &Program, sink: &mut W) -> IoResult<()> {
    let mut scopes = ScopeStack::new();
    for function in &program.functions {
        scopes.insert(function.name, SymbolEntry::Function(function));
    }

    let mut gen = AsmGenerator::new();
    for function in &program.functions {
        gen.generate_function(function, &mut scopes);
        sink.write_all(gen.prologue.as_bytes()).map_err(IoError::from)?;
        sink.write_all(gen.body.as_bytes()).map_err(IoError::from)?;
        sink.write_all(b"\n").map_err(IoError::from)?;
    }
    Ok(())
}

/// Three free lists of reclaimable local-variable slots, by width. An
/// allocation of a given width prefers its own list; failing that, it
/// splits a slot borrowed from the next-wider list.
struct FrameAllocator {
    local_bytes: i32,
    free4: VecDeque<i32>,
    free2: VecDeque<i32>,
    free1: VecDeque<i32>,
}

impl FrameAllocator {
    fn new() -> Self {
        FrameAllocator { local_bytes: 0, free4: VecDeque::new(), free2: VecDeque::new(), free1: VecDeque::new() }
    }

    /// Allocates a local slot of `width` bytes (4, 2, or 1) and returns its
    /// offset from `%ebp` (always negative).
    fn allocate(&mut self, width: u32) -> i32 {
        match width {
            4 => self.allocate_from(0),
            2 => self.allocate_from(1),
            1 => self.allocate_from(2),
            other => unreachable!("no local variable has width {other}"),
        }
    }

    fn allocate_from(&mut self, tier: usize) -> i32 {
        const WIDTHS: [i32; 3] = [4, 2, 1];
        if self.list(tier).is_empty() {
            let mut donor = tier as i32 - 1;
            while donor >= 0 && self.list(donor as usize).is_empty() {
                donor -= 1;
            }
            if donor < 0 {
                let mut offset = self.local_bytes + 4;
                self.local_bytes += 16;
                while offset <= self.local_bytes {
                    self.free4.push_back(offset);
                    offset += 4;
                }
                donor = 0;
            }
            let mut donor = donor as usize;
            while donor < tier {
                let slot = self.list(donor).pop_front().expect("donor list just verified non-empty");
                let next = self.list(donor + 1);
                next.push_back(slot - WIDTHS[donor + 1]);
                next.push_back(slot);
                donor += 1;
            }
        }
        let slot = self.list(tier).pop_front().expect("slot available after borrowing");
        -slot
    }

    fn list(&mut self, tier: usize) -> &mut VecDeque<i32> {
        match tier {
            0 => &mut self.free4,
            1 => &mut self.free2,
            _ => &mut self.free1,
        }
    }
}

/// Four-entry round-robin register pool (`eax, ebx, ecx, edx`). Depth -1
/// means nothing is allocated; depth `d` uses register `d % 4`, spilling
/// the shadowed register with `pushl`/`popl` once `d >= 4`.
struct RegisterPool {
    depth: i32,
}

impl RegisterPool {
    fn new() -> Self {
        RegisterPool { depth: -1 }
    }

    fn allocate(&mut self, out: &mut String) -> usize {
        self.depth += 1;
        let idx = self.depth as usize % 4;
        if self.depth >= 4 {
            emit(out, &format!("pushl %{}", LONG_REGISTERS[idx]));
        }
        idx
    }

    fn deallocate(&mut self, out: &mut String) {
        debug_assert!(self.depth >= 0, "register pool underflow");
        let idx = self.depth as usize % 4;
        if self.depth >= 4 {
            emit(out, &format!("popl %{}", LONG_REGISTERS[idx]));
        }
        self.depth -= 1;
    }

    fn expects_result(&self) -> bool {
        self.depth >= 0
    }

    fn current_index(&self) -> usize {
        debug_assert!(self.depth >= 0, "no result register is currently allocated");
        self.depth as usize % 4
    }
}

fn emit(buf: &mut String, instruction: &str) {
    buf.push('\t');
    buf.push_str(instruction);
    buf.push('\n');
}

fn emit_label(buf: &mut String, label: u32) {
    buf.push_str(&format!("L{label}:\n"));
}

pub struct AsmGenerator {
    prologue: String,
    body: String,
    frame: FrameAllocator,
    regs: RegisterPool,
    arg_offset: i32,
    next_label: u32,
    return_label: Option<u32>,
    loop_end_labels: Vec<u32>,
    else_join_labels: Vec<u32>,
}

impl AsmGenerator {
    pub fn new() -> Self {
        AsmGenerator {
            prologue: String::new(),
            body: String::new(),
            frame: FrameAllocator::new(),
            regs: RegisterPool::new(),
            arg_offset: 8,
            next_label: 0,
            return_label: None,
            loop_end_labels: Vec::new(),
            else_join_labels: Vec::new(),
        }
    }

    fn reset_for_function(&mut self) {
        self.prologue.clear();
        self.body.clear();
        self.frame = FrameAllocator::new();
        self.regs = RegisterPool::new();
        self.arg_offset = 8;
        self.return_label = None;
        debug_assert!(self.loop_end_labels.is_empty());
        debug_assert!(self.else_join_labels.is_empty());
    }

    fn new_label(&mut self) -> u32 {
        let label = self.next_label;
        self.next_label += 1;
        label
    }

    fn return_label(&mut self) -> u32 {
        if self.return_label.is_none() {
            self.return_label = Some(self.new_label());
        }
        self.return_label.unwrap()
    }

    pub fn generate_function(&mut self, function: &Function, scopes: &mut ScopeStack) {
        self.reset_for_function();

        self.prologue.push_str(&format!(".globl {0}\n.type {0}, @function\n{0}:\n", function.name));
        emit(&mut self.prologue, "pushl %ebp");
        emit(&mut self.prologue, "movl %esp, %ebp");

        scopes.enter_function(function);
        scopes.push_scope();

        for param in &function.params {
            self.assign_parameter_offset(param);
            scopes.insert(param.name, SymbolEntry::Variable(VarBinding::Param(param)));
        }

        for stmt in &function.body {
            self.generate_stmt(stmt, scopes);
        }

        if let Some(label) = self.return_label {
            emit_label(&mut self.body, label);
        }
        if self.frame.local_bytes > 0 {
            emit(&mut self.prologue, &format!("subl ${}, %esp", self.frame.local_bytes));
            emit(&mut self.body, "leave");
        } else {
            emit(&mut self.body, "popl %ebp");
        }
        emit(&mut self.body, "ret");

        scopes.pop_scope();
        scopes.exit_function();
    }

    fn assign_parameter_offset(&mut self, param: &Parameter) {
        param.offset.set(self.arg_offset);
        self.arg_offset += 4;
    }

    // ---- statements ----

    fn generate_stmt(&mut self, stmt: &Stmt, scopes: &mut ScopeStack) {
        match stmt {
            Stmt::Decl(decl) => {
                let offset = self.frame.allocate(crate::types::width_bytes(decl.ty));
                decl.offset.set(offset);
                if let Some(init) = &decl.init {
                    self.regs.allocate(&mut self.body);
                    self.generate_expr(init, scopes);
                    let reg = register_name(self.regs.current_index(), decl.ty);
                    self.store(decl.ty, reg, offset);
                    self.regs.deallocate(&mut self.body);
                }
                scopes.insert(decl.name, SymbolEntry::Variable(VarBinding::Local(decl)));
            }
            Stmt::ExprList(list) => {
                for expr in &list.exprs {
                    self.generate_expr_discard(expr, scopes);
                }
            }
            Stmt::If(s) => self.generate_if(s, scopes),
            Stmt::While(s) => self.generate_while(s, scopes),
            Stmt::Jump(jump) => self.generate_jump(jump, scopes),
        }
    }

    fn generate_if(&mut self, s: &IfStmt, scopes: &mut ScopeStack) {
        let label_true = self.new_label();
        let label_done = self.new_label();

        self.generate_condition_test(&s.condition, scopes, label_true);

        self.else_join_labels.push(label_done);
        if let Some(elf) = &s.elf {
            self.generate_elf(elf, scopes);
        }
        self.else_join_labels.pop();

        scopes.push_scope();
        if let Some(else_body) = &s.else_body {
            for stmt in else_body {
                self.generate_stmt(stmt, scopes);
            }
        }
        scopes.pop_scope();

        emit(&mut self.body, &format!("jmp L{label_done}"));
        emit_label(&mut self.body, label_true);
        scopes.push_scope();
        if s.then_body.is_empty() {
            emit(&mut self.body, "nop");
        } else {
            for stmt in &s.then_body {
                self.generate_stmt(stmt, scopes);
            }
        }
        scopes.pop_scope();
        emit_label(&mut self.body, label_done);
    }

    fn generate_elf(&mut self, elf: &ElfStmt, scopes: &mut ScopeStack) {
        let label_false = self.new_label();
        self.generate_condition_test_negated(&elf.condition, scopes, label_false);

        scopes.push_scope();
        for stmt in &elf.body {
            self.generate_stmt(stmt, scopes);
        }
        scopes.pop_scope();

        let join = *self.else_join_labels.last().expect("elf is always nested inside an if");
        emit(&mut self.body, &format!("jmp L{join}"));
        emit_label(&mut self.body, label_false);

        if let Some(next) = &elf.elf {
            self.generate_elf(next, scopes);
        }
    }

    fn generate_while(&mut self, s: &WhileStmt, scopes: &mut ScopeStack) {
        let label_top = self.new_label();
        let label_done = self.new_label();

        emit_label(&mut self.body, label_top);
        self.generate_condition_test_negated(&s.condition, scopes, label_done);

        self.loop_end_labels.push(label_done);
        scopes.push_scope();
        for stmt in &s.body {
            self.generate_stmt(stmt, scopes);
        }
        scopes.pop_scope();
        self.loop_end_labels.pop();

        emit(&mut self.body, &format!("jmp L{label_top}"));
        emit_label(&mut self.body, label_done);
    }

    fn generate_jump(&mut self, jump: &JumpStmt, scopes: &mut ScopeStack) {
        match jump.kind {
            JumpKind::Toss => {
                if let Some(value) = &jump.value {
                    self.regs.allocate(&mut self.body);
                    self.generate_expr(value, scopes);
                    let reg = register_name(self.regs.current_index(), Type::In);
                    if reg != "eax" {
                        emit(&mut self.body, &format!("movl %{reg}, %eax"));
                    }
                    self.regs.deallocate(&mut self.body);
                }
                let label = self.return_label();
                emit(&mut self.body, &format!("jmp L{label}"));
            }
            JumpKind::Smash => {
                let label = *self.loop_end_labels.last().expect("'smash' only parses inside a while loop");
                emit(&mut self.body, &format!("jmp L{label}"));
            }
        }
    }

    /// Emits a comparison against zero for `condition` and jumps to
    /// `label_if_true` when it's non-zero.
    fn generate_condition_test(&mut self, condition: &Expr, scopes: &mut ScopeStack, label_if_true: u32) {
        if let Expr::Primary(p) = condition {
            if let PrimaryExpr::Ident(name) = p.value {
                let ty = self.lookup_type(name, scopes);
                let offset = self.lookup_offset(name, scopes);
                emit(&mut self.body, &format!("cmp{} $0, {}(%ebp)", crate::types::mov_suffix(ty), offset));
                emit(&mut self.body, &format!("jne L{label_if_true}"));
                return;
            }
        }
        self.regs.allocate(&mut self.body);
        self.generate_expr(condition, scopes);
        let reg = register_name(self.regs.current_index(), Type::Boo);
        emit(&mut self.body, &format!("cmpl $0, %{reg}"));
        self.regs.deallocate(&mut self.body);
        emit(&mut self.body, &format!("jne L{label_if_true}"));
    }

    /// Same as [`Self::generate_condition_test`] but jumps when the
    /// condition is zero (used by `elf` and `while`, which test for the
    /// "skip this body" case).
    fn generate_condition_test_negated(&mut self, condition: &Expr, scopes: &mut ScopeStack, label_if_false: u32) {
        if let Expr::Primary(p) = condition {
            if let PrimaryExpr::Ident(name) = p.value {
                let ty = self.lookup_type(name, scopes);
                let offset = self.lookup_offset(name, scopes);
                emit(&mut self.body, &format!("cmp{} $0, {}(%ebp)", crate::types::mov_suffix(ty), offset));
                emit(&mut self.body, &format!("je L{label_if_false}"));
                return;
            }
        }
        self.regs.allocate(&mut self.body);
        self.generate_expr(condition, scopes);
        let reg = register_name(self.regs.current_index(), Type::Boo);
        emit(&mut self.body, &format!("cmpl $0, %{reg}"));
        self.regs.deallocate(&mut self.body);
        emit(&mut self.body, &format!("je L{label_if_false}"));
    }

    // ---- expressions ----

    /// Evaluates `expr` purely for side effects (a statement-level
    /// expression list entry): no result register is allocated.
    fn generate_expr_discard(&mut self, expr: &Expr, scopes: &mut ScopeStack) {
        self.generate_expr(expr, scopes);
    }

    fn load_operand(&mut self, operand: &Expr, scopes: &mut ScopeStack, allocate: bool) -> usize {
        if allocate {
            self.regs.allocate(&mut self.body);
        }
        self.generate_expr(operand, scopes);
        if self.regs.expects_result() {
            self.regs.current_index()
        } else {
            0 // "eax"
        }
    }

    fn generate_expr(&mut self, expr: &Expr, scopes: &mut ScopeStack) {
        match expr {
            Expr::Assignment(a) => {
                let Expr::Primary(p) = &a.target else {
                    unreachable!("semantic analysis guarantees an identifier assignment target");
                };
                let PrimaryExpr::Ident(name) = p.value else {
                    unreachable!("semantic analysis guarantees an identifier assignment target");
                };
                let ty = self.lookup_type(name, scopes);
                let offset = self.lookup_offset(name, scopes);

                let wants_result = self.regs.expects_result();
                if !wants_result {
                    self.regs.allocate(&mut self.body);
                }
                self.generate_expr(&a.value, scopes);
                let reg = register_name(self.regs.current_index(), ty).to_string();
                self.store(ty, &reg, offset);
                if !wants_result {
                    self.regs.deallocate(&mut self.body);
                } else {
                    emit(&mut self.body, &format!("movl {offset}(%ebp), %{reg}"));
                }
            }
            Expr::LogicalOr(chain) => self.generate_logical(chain, scopes, true),
            Expr::LogicalAnd(chain) => self.generate_logical(chain, scopes, false),
            Expr::Equality(bin) => self.generate_compare(&bin.lhs, &bin.rhs, relop_jump(bin.op), scopes),
            Expr::Relational(bin) => self.generate_compare(&bin.lhs, &bin.rhs, relop_jump(bin.op), scopes),
            Expr::Additive(chain) => self.generate_arith_chain(chain, scopes, true),
            Expr::Multiplicative(chain) => self.generate_arith_chain(chain, scopes, false),
            Expr::Prefix(p) => self.generate_prefix(p, scopes),
            Expr::Postfix(call) => self.generate_call(call, scopes),
            Expr::Primary(p) => self.generate_primary(p, scopes),
        }
    }

    fn generate_primary(&mut self, p: &ramsey_par::ast::PrimaryNode, scopes: &mut ScopeStack) {
        if !self.regs.expects_result() {
            return;
        }
        match &p.value {
            PrimaryExpr::Ident(name) => {
                let ty = self.lookup_type(*name, scopes);
                let offset = self.lookup_offset(*name, scopes);
                let reg = register_name(self.regs.current_index(), ty);
                let mnemonic = match ty {
                    Type::In | Type::Big => "movl",
                    Type::Small => "movswl",
                    Type::Boo => "movsbl",
                };
                if ty == Type::Small || ty == Type::Boo {
                    emit(&mut self.body, &format!("{mnemonic} {offset}(%ebp), %{}", register_name(self.regs.current_index(), Type::In)));
                } else {
                    emit(&mut self.body, &format!("{mnemonic} {offset}(%ebp), %{reg}"));
                }
            }
            PrimaryExpr::Number(sym) | PrimaryExpr::NumberHex(sym) => {
                let reg = register_name(self.regs.current_index(), Type::In);
                emit(&mut self.body, &format!("movl ${sym}, %{reg}"));
            }
            PrimaryExpr::Bool(value) => {
                let reg = register_name(self.regs.current_index(), Type::In);
                emit(&mut self.body, &format!("movl ${}, %{reg}", if *value { 1 } else { 0 }));
            }
        }
    }

    fn generate_logical(&mut self, chain: &ramsey_par::ast::ChainExpr, scopes: &mut ScopeStack, is_or: bool) {
        let label_true = self.new_label();
        let label_false = self.new_label();
        let label_done = self.new_label();

        let allocate_first = !self.regs.expects_result();
        let idx = self.load_operand(&chain.operands[0], scopes, allocate_first);
        let reg = register_name(idx, Type::In);

        for operand in &chain.operands[1..] {
            emit(&mut self.body, &format!("cmpl $0, %{reg}"));
            if is_or {
                emit(&mut self.body, &format!("jne L{label_true}"));
            } else {
                emit(&mut self.body, &format!("je L{label_false}"));
            }
            self.load_operand(operand, scopes, false);
        }

        emit(&mut self.body, &format!("cmpl $0, %{reg}"));
        if is_or {
            emit(&mut self.body, &format!("je L{label_false}"));
            emit_label(&mut self.body, label_true);
            emit(&mut self.body, &format!("movl $1, %{reg}"));
            emit(&mut self.body, &format!("jmp L{label_done}"));
            emit_label(&mut self.body, label_false);
            emit(&mut self.body, &format!("movl $0, %{reg}"));
        } else {
            emit(&mut self.body, &format!("jne L{label_true}"));
            emit_label(&mut self.body, label_false);
            emit(&mut self.body, &format!("movl $0, %{reg}"));
            emit(&mut self.body, &format!("jmp L{label_done}"));
            emit_label(&mut self.body, label_true);
            emit(&mut self.body, &format!("movl $1, %{reg}"));
        }
        emit_label(&mut self.body, label_done);

        if allocate_first {
            self.regs.deallocate(&mut self.body);
        }
    }

    /// Equality and relational operators share this shape: load both
    /// operands into distinct registers, compare, then branch to one of
    /// two one-line blocks that materialize `0` or `1`.
    fn generate_compare(&mut self, lhs: &Expr, rhs: &Expr, jump: &'static str, scopes: &mut ScopeStack) {
        let allocate_lhs = !self.regs.expects_result();
        let idx_a = self.load_operand(lhs, scopes, allocate_lhs);
        let idx_b = self.load_operand(rhs, scopes, true);
        let reg_a = register_name(idx_a, Type::In);
        let reg_b = register_name(idx_b, Type::In);

        emit(&mut self.body, &format!("cmp %{reg_b}, %{reg_a}"));
        self.regs.deallocate(&mut self.body);
        if allocate_lhs {
            self.regs.deallocate(&mut self.body);
        }

        let label_true = self.new_label();
        let label_done = self.new_label();
        emit(&mut self.body, &format!("{jump} L{label_true}"));
        emit(&mut self.body, &format!("movl $0, %{reg_a}"));
        emit(&mut self.body, &format!("jmp L{label_done}"));
        emit_label(&mut self.body, label_true);
        emit(&mut self.body, &format!("movl $1, %{reg_a}"));
        emit_label(&mut self.body, label_done);
    }

    /// Additive and multiplicative chains share this shape: evaluate the
    /// first operand into an accumulator, then fold each remaining operand
    /// into it one at a time.
    fn generate_arith_chain(&mut self, chain: &ramsey_par::ast::OpChainExpr, scopes: &mut ScopeStack, is_additive: bool) {
        let allocate_first = !self.regs.expects_result();
        let acc_idx = self.load_operand(&chain.operands[0], scopes, allocate_first);
        let acc = register_name(acc_idx, Type::In).to_string();

        for (operand, op) in chain.operands[1..].iter().zip(&chain.operators) {
            let rhs_idx = self.load_operand(operand, scopes, true);
            let rhs = register_name(rhs_idx, Type::In).to_string();
            if is_additive {
                match op {
                    ArithOp::Add => emit(&mut self.body, &format!("addl %{rhs}, %{acc}")),
                    ArithOp::Sub => emit(&mut self.body, &format!("subl %{rhs}, %{acc}")),
                    _ => unreachable!("additive chains only carry +/-"),
                }
            } else {
                self.generate_multiplicative_op(*op, &acc, &rhs);
            }
            self.regs.deallocate(&mut self.body);
        }

        if allocate_first {
            self.regs.deallocate(&mut self.body);
        }
    }

    fn generate_multiplicative_op(&mut self, op: ArithOp, acc: &str, rhs: &str) {
        match op {
            ArithOp::Mul => emit(&mut self.body, &format!("imull %{rhs}, %{acc}")),
            ArithOp::Div | ArithOp::Mod => {
                let save_eax = acc != "eax";
                let save_edx = self.regs.depth >= 3 && acc != "edx";
                if save_eax {
                    emit(&mut self.body, "pushl %eax");
                    emit(&mut self.body, &format!("movl %{acc}, %eax"));
                }
                if save_edx {
                    emit(&mut self.body, "pushl %edx");
                }
                emit(&mut self.body, "cdq");
                emit(&mut self.body, &format!("idivl %{rhs}"));
                if op == ArithOp::Mod {
                    emit(&mut self.body, &format!("movl %edx, %{acc}"));
                } else if save_eax {
                    emit(&mut self.body, &format!("movl %eax, %{acc}"));
                }
                if save_edx {
                    emit(&mut self.body, "popl %edx");
                }
                if save_eax {
                    emit(&mut self.body, "popl %eax");
                }
            }
            ArithOp::Add | ArithOp::Sub => unreachable!("multiplicative chains only carry */ /mod"),
        }
    }

    fn generate_prefix(&mut self, p: &ramsey_par::ast::PrefixExpr, scopes: &mut ScopeStack) {
        let allocate = !self.regs.expects_result();
        let idx = self.load_operand(&p.operand, scopes, allocate);
        let reg_long = register_name(idx, Type::In);
        match p.op {
            PrefixOp::Not => {
                let reg_byte = register_name(idx, Type::Boo);
                emit(&mut self.body, &format!("cmp $0, %{reg_long}"));
                emit(&mut self.body, &format!("sete %{reg_byte}"));
                emit(&mut self.body, &format!("movzbl %{reg_byte}, %{reg_long}"));
            }
            PrefixOp::Neg => {
                emit(&mut self.body, &format!("negl %{reg_long}"));
            }
        }
        if allocate {
            self.regs.deallocate(&mut self.body);
        }
    }

    fn generate_call(&mut self, call: &ramsey_par::ast::PostfixExpr, scopes: &mut ScopeStack) {
        // "live" here means currently holding a value some enclosing
        // expression still needs; all of those survive across the call
        // except the one about to carry this call's own result.
        let result_idx = if self.regs.expects_result() { Some(self.regs.current_index()) } else { None };
        let live_count = if self.regs.depth < 0 { 0 } else { (self.regs.depth as usize + 1).min(4) };

        for idx in 0..live_count {
            if Some(idx) != result_idx {
                emit(&mut self.body, &format!("pushl %{}", LONG_REGISTERS[idx]));
            }
        }

        // Arguments share a single staging register: each is evaluated and
        // immediately pushed before the next is computed.
        let alloc = !self.regs.expects_result();
        if alloc {
            self.regs.allocate(&mut self.body);
        }
        for arg in call.args.iter().rev() {
            self.generate_expr(arg, scopes);
            let reg = register_name(self.regs.current_index(), Type::In);
            emit(&mut self.body, &format!("pushl %{reg}"));
        }
        if alloc {
            self.regs.deallocate(&mut self.body);
        }

        emit(&mut self.body, &format!("call {}", call.name));

        if self.regs.expects_result() {
            let reg = register_name(self.regs.current_index(), Type::In);
            if reg != "eax" {
                emit(&mut self.body, &format!("movl %eax, %{reg}"));
            }
        }

        if !call.args.is_empty() {
            emit(&mut self.body, &format!("addl ${}, %esp", 4 * call.args.len()));
        }

        for idx in (0..live_count).rev() {
            if Some(idx) != result_idx {
                emit(&mut self.body, &format!("popl %{}", LONG_REGISTERS[idx]));
            }
        }
    }

    /// Stores `reg` into the stack slot at `offset`, using the mnemonic
    /// matching `ty`'s width. A sign-extending load always reads back only
    /// the declared width, so a parameter's wider 4-byte argument slot and
    /// a local's exactly-sized slot both round-trip correctly through a
    /// plain narrow store; there's no need to special-case the two.
    fn store(&mut self, ty: Type, reg: &str, offset: i32) {
        let mnemonic = match ty {
            Type::In | Type::Big => "movl",
            Type::Small => "movw",
            Type::Boo => "movb",
        };
        emit(&mut self.body, &format!("{mnemonic} %{reg}, {offset}(%ebp)"));
    }

    fn lookup_type(&self, name: ramsey_util::Symbol, scopes: &ScopeStack) -> Type {
        match scopes.lookup(name) {
            Some(SymbolEntry::Variable(binding)) => binding.ty(),
            _ => unreachable!("semantic analysis guarantees '{name}' resolves to a variable"),
        }
    }

    fn lookup_offset(&self, name: ramsey_util::Symbol, scopes: &ScopeStack) -> i32 {
        match scopes.lookup(name) {
            Some(SymbolEntry::Variable(binding)) => binding.offset(),
            _ => unreachable!("semantic analysis guarantees '{name}' resolves to a variable"),
        }
    }
}

fn relop_jump(op: RelOp) -> &'static str {
    match op {
        RelOp::Eq => "je",
        RelOp::NotEq => "jne",
        RelOp::Lt => "jl",
        RelOp::Gt => "jg",
        RelOp::LtEq => "jle",
        RelOp::GtEq => "jge",
    }
}

impl Default for AsmGenerator {
    fn default() -> Self {
        Self::new()
    }
}
