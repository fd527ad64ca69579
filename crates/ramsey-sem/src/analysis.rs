//! One-pass semantic analyzer: post-order traversal per statement, with
//! pre-order scope management (a scope opens before its body is visited
//! and closes once control leaves it on every path, success or error).

use ramsey_par::ast::{
    ArithOp, Expr, Function, JumpKind, PrefixOp, PrimaryExpr, Program, RelOp, Stmt, Type,
};
use ramsey_util::error::{SemanticError, SemanticResult};
use ramsey_util::Symbol;

use crate::scope::{ScopeStack, SymbolEntry, VarBinding};
use crate::types::{assignable, is_numeric, widen};

/// Runs semantic analysis over a whole program. Functions are inserted
/// into the global scope before any body is analyzed, so forward and
/// mutually recursive calls resolve.
pub fn analyze(program: &Program) -> SemanticResult<()> {
    let mut scopes = ScopeStack::new();

    for function in &program.functions {
        if !scopes.insert(function.name, SymbolEntry::Function(function)) {
            return Err(SemanticError::new(
                function.line,
                format!("function '{}' is already declared", function.name),
            ));
        }
    }

    for function in &program.functions {
        analyze_function(function, &mut scopes)?;
    }

    Ok(())
}

fn analyze_function(function: &Function, scopes: &mut ScopeStack) -> SemanticResult<()> {
    scopes.enter_function(function);
    scopes.push_scope();

    for param in &function.params {
        if !scopes.insert(param.name, SymbolEntry::Variable(VarBinding::Param(param))) {
            scopes.pop_scope();
            scopes.exit_function();
            return Err(SemanticError::new(
                param.line,
                format!("parameter '{}' is already declared", param.name),
            ));
        }
    }

    let result = analyze_block(&function.body, scopes);

    scopes.pop_scope();
    scopes.exit_function();
    result
}

fn analyze_block(stmts: &[Stmt], scopes: &mut ScopeStack) -> SemanticResult<()> {
    for stmt in stmts {
        analyze_stmt(stmt, scopes)?;
    }
    Ok(())
}

fn analyze_stmt(stmt: &Stmt, scopes: &mut ScopeStack) -> SemanticResult<()> {
    match stmt {
        Stmt::Decl(decl) => {
            let init_ty = match &decl.init {
                Some(expr) => Some(analyze_expr(expr, scopes)?),
                None => None,
            };
            if let Some(init_ty) = init_ty {
                if !assignable(init_ty, decl.ty) {
                    return Err(SemanticError::new(
                        decl.line,
                        format!(
                            "cannot initialize '{}' of type {:?} with a value of type {init_ty:?}",
                            decl.name, decl.ty
                        ),
                    ));
                }
            }
            if !scopes.insert(decl.name, SymbolEntry::Variable(VarBinding::Local(decl))) {
                return Err(SemanticError::new(
                    decl.line,
                    format!("variable '{}' is already declared in this scope", decl.name),
                ));
            }
            Ok(())
        }
        Stmt::ExprList(list) => {
            for expr in &list.exprs {
                analyze_expr(expr, scopes)?;
            }
            Ok(())
        }
        Stmt::If(s) => {
            let cond_ty = analyze_expr(&s.condition, scopes)?;
            require_boo(cond_ty, s.line, "if-statement condition")?;

            scopes.push_scope();
            let then_result = analyze_block(&s.then_body, scopes);
            scopes.pop_scope();
            then_result?;

            if let Some(elf) = &s.elf {
                analyze_elf(elf, scopes)?;
            }

            if let Some(else_body) = &s.else_body {
                scopes.push_scope();
                let else_result = analyze_block(else_body, scopes);
                scopes.pop_scope();
                else_result?;
            }
            Ok(())
        }
        Stmt::While(s) => {
            let cond_ty = analyze_expr(&s.condition, scopes)?;
            require_boo(cond_ty, s.line, "while-statement condition")?;

            scopes.push_scope();
            scopes.enter_loop();
            let result = analyze_block(&s.body, scopes);
            scopes.exit_loop();
            scopes.pop_scope();
            result
        }
        Stmt::Jump(jump) => analyze_jump(jump, scopes),
    }
}

fn analyze_elf(elf: &ramsey_par::ast::ElfStmt, scopes: &mut ScopeStack) -> SemanticResult<()> {
    let cond_ty = analyze_expr(&elf.condition, scopes)?;
    require_boo(cond_ty, elf.line, "elf-statement condition")?;

    scopes.push_scope();
    let result = analyze_block(&elf.body, scopes);
    scopes.pop_scope();
    result?;

    if let Some(next) = &elf.elf {
        analyze_elf(next, scopes)?;
    }
    Ok(())
}

fn analyze_jump(jump: &ramsey_par::ast::JumpStmt, scopes: &mut ScopeStack) -> SemanticResult<()> {
    match jump.kind {
        JumpKind::Toss => {
            let Some(function) = scopes.enclosing_function() else {
                return Err(SemanticError::new(jump.line, "'toss' outside of a function"));
            };
            let value_ty = match &jump.value {
                Some(expr) => analyze_expr(expr, scopes)?,
                None => {
                    return Err(SemanticError::new(jump.line, "'toss' requires an expression"));
                }
            };
            if !assignable(value_ty, function.return_type) {
                return Err(SemanticError::new(
                    jump.line,
                    format!(
                        "'toss' value of type {value_ty:?} is not assignable to return type {:?}",
                        function.return_type
                    ),
                ));
            }
            Ok(())
        }
        JumpKind::Smash => {
            if !scopes.in_loop() {
                return Err(SemanticError::new(jump.line, "'smash' outside of a 'while' loop"));
            }
            Ok(())
        }
    }
}

fn require_boo(ty: Type, line: u32, context: &str) -> SemanticResult<()> {
    if ty != Type::Boo {
        return Err(SemanticError::new(line, format!("{context} must be type boo, found {ty:?}")));
    }
    Ok(())
}

fn analyze_expr(expr: &Expr, scopes: &mut ScopeStack) -> SemanticResult<Type> {
    if let Some(ty) = expr.resolved_type() {
        return Ok(ty);
    }
    let ty = analyze_expr_uncached(expr, scopes)?;
    expr.set_resolved_type(ty);
    Ok(ty)
}

fn analyze_expr_uncached(expr: &Expr, scopes: &mut ScopeStack) -> SemanticResult<Type> {
    match expr {
        Expr::Assignment(a) => {
            let target_name = match &a.target {
                Expr::Primary(p) => match p.value {
                    PrimaryExpr::Ident(name) => name,
                    _ => {
                        return Err(SemanticError::new(
                            a.line,
                            "left-hand side of assignment must be an identifier",
                        ))
                    }
                },
                _ => {
                    return Err(SemanticError::new(
                        a.line,
                        "left-hand side of assignment must be an identifier",
                    ))
                }
            };
            let target_ty = lookup_variable_type(target_name, a.line, scopes)?;
            let value_ty = analyze_expr(&a.value, scopes)?;
            if !assignable(value_ty, target_ty) {
                return Err(SemanticError::new(
                    a.line,
                    format!(
                        "cannot assign value of type {value_ty:?} to '{target_name}' of type {target_ty:?}"
                    ),
                ));
            }
            Ok(target_ty)
        }
        Expr::LogicalOr(chain) | Expr::LogicalAnd(chain) => {
            for operand in &chain.operands {
                let ty = analyze_expr(operand, scopes)?;
                if ty != Type::Boo {
                    return Err(SemanticError::new(
                        chain.line,
                        format!("logical operands must be type boo, found {ty:?}"),
                    ));
                }
            }
            Ok(Type::Boo)
        }
        Expr::Equality(bin) | Expr::Relational(bin) => {
            let lhs_ty = analyze_expr(&bin.lhs, scopes)?;
            let rhs_ty = analyze_expr(&bin.rhs, scopes)?;
            if !is_numeric(lhs_ty) || !is_numeric(rhs_ty) {
                return Err(SemanticError::new(
                    bin.line,
                    "comparison operands must be numeric",
                ));
            }
            if !assignable(lhs_ty, rhs_ty) && !assignable(rhs_ty, lhs_ty) {
                return Err(SemanticError::new(
                    bin.line,
                    format!("comparison operands have incompatible types {lhs_ty:?} and {rhs_ty:?}"),
                ));
            }
            let _ = relop_name(bin.op);
            Ok(Type::Boo)
        }
        Expr::Additive(chain) | Expr::Multiplicative(chain) => {
            let mut result = None;
            for operand in &chain.operands {
                let ty = analyze_expr(operand, scopes)?;
                if !is_numeric(ty) {
                    return Err(SemanticError::new(
                        chain.line,
                        format!("arithmetic operand must be numeric, found {ty:?}"),
                    ));
                }
                result = Some(match result {
                    None => ty,
                    Some(acc) => widen(acc, ty),
                });
            }
            Ok(result.unwrap_or(Type::In))
        }
        Expr::Prefix(p) => {
            let operand_ty = analyze_expr(&p.operand, scopes)?;
            match p.op {
                PrefixOp::Not => {
                    if operand_ty != Type::Boo {
                        return Err(SemanticError::new(
                            p.line,
                            format!("'not' requires a boo operand, found {operand_ty:?}"),
                        ));
                    }
                    Ok(Type::Boo)
                }
                PrefixOp::Neg => {
                    if !is_numeric(operand_ty) {
                        return Err(SemanticError::new(
                            p.line,
                            format!("unary '-' requires a numeric operand, found {operand_ty:?}"),
                        ));
                    }
                    Ok(operand_ty)
                }
            }
        }
        Expr::Postfix(call) => {
            let Some(entry) = scopes.lookup(call.name) else {
                return Err(SemanticError::new(call.line, format!("undefined function '{}'", call.name)));
            };
            let SymbolEntry::Function(function) = entry else {
                return Err(SemanticError::new(call.line, format!("'{}' is not a function", call.name)));
            };
            if call.args.len() < function.params.len() {
                return Err(SemanticError::new(
                    call.line,
                    format!("too few arguments to '{}'", call.name),
                ));
            }
            if call.args.len() > function.params.len() {
                return Err(SemanticError::new(
                    call.line,
                    format!("too many arguments to '{}'", call.name),
                ));
            }
            for (arg, param) in call.args.iter().zip(&function.params) {
                let arg_ty = analyze_expr(arg, scopes)?;
                if !assignable(arg_ty, param.ty) {
                    return Err(SemanticError::new(
                        call.line,
                        format!(
                            "argument of type {arg_ty:?} is not assignable to parameter '{}' of type {:?}",
                            param.name, param.ty
                        ),
                    ));
                }
            }
            Ok(function.return_type)
        }
        Expr::Primary(p) => match &p.value {
            PrimaryExpr::Ident(name) => lookup_variable_type(*name, p.line, scopes),
            PrimaryExpr::Number(_) | PrimaryExpr::NumberHex(_) => Ok(Type::In),
            PrimaryExpr::Bool(_) => Ok(Type::Boo),
        },
    }
}

fn lookup_variable_type(name: Symbol, line: u32, scopes: &ScopeStack) -> SemanticResult<Type> {
    match scopes.lookup(name) {
        Some(SymbolEntry::Variable(binding)) => Ok(binding.ty()),
        Some(SymbolEntry::Function(_)) => {
            Err(SemanticError::new(line, format!("'{name}' is a function, not a variable")))
        }
        None => Err(SemanticError::new(line, format!("undefined variable '{name}'"))),
    }
}

fn relop_name(op: RelOp) -> &'static str {
    match op {
        RelOp::Eq => "=",
        RelOp::NotEq => "!=",
        RelOp::Lt => "<",
        RelOp::Gt => ">",
        RelOp::LtEq => "<=",
        RelOp::GtEq => ">=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramsey_lex::lex;
    use ramsey_par::parse_tokens;

    fn analyze_src(src: &str) -> SemanticResult<()> {
        let tokens = lex(src).unwrap();
        let program = parse_tokens(&tokens).unwrap();
        analyze(&program)
    }

    #[test]
    fn accepts_well_typed_function() {
        assert!(analyze_src("fun main()\nin x <- 1\ntoss x\nendfun\n").is_ok());
    }

    #[test]
    fn rejects_undefined_variable() {
        assert!(analyze_src("fun main()\ntoss x\nendfun\n").is_err());
    }

    #[test]
    fn rejects_smash_outside_loop() {
        assert!(analyze_src("fun main()\nsmash\nendfun\n").is_err());
    }

    #[test]
    fn accepts_smash_inside_while() {
        assert!(analyze_src("fun main()\nwhile (true)\nsmash\nendwhile\nendfun\n").is_ok());
    }

    #[test]
    fn rejects_non_boo_condition() {
        assert!(analyze_src("fun main()\nin x <- 1\nif (x)\nendif\nendfun\n").is_err());
    }

    #[test]
    fn non_boo_if_condition_names_the_construct_in_the_message() {
        let err = analyze_src("fun h() as in\nif (3+4)\ntoss 1\nendif\ntoss 0\nendfun\n").unwrap_err();
        assert!(err.message.contains("if-statement condition"));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn rejects_redeclared_function() {
        assert!(analyze_src("fun f()\nendfun\nfun f()\nendfun\n").is_err());
    }

    #[test]
    fn rejects_duplicate_parameter_names() {
        assert!(analyze_src("fun f(in x, in x)\nendfun\n").is_err());
    }

    #[test]
    fn rejects_too_few_call_arguments() {
        assert!(analyze_src("fun f(in x)\nendfun\nfun main()\nf()\nendfun\n").is_err());
    }

    #[test]
    fn widens_small_plus_big_to_big() {
        let tokens = lex("fun main()\nbig x <- 1\nsmall y <- 1\nbig z <- x + y\nendfun\n").unwrap();
        let program = parse_tokens(&tokens).unwrap();
        assert!(analyze(&program).is_ok());
    }

    #[test]
    fn allows_forward_reference_between_functions() {
        assert!(analyze_src("fun a()\nb()\nendfun\nfun b()\nendfun\n").is_ok());
    }

    #[test]
    fn declaration_initializer_cannot_see_its_own_name() {
        // `in x <- x` must fail: the new binding isn't visible while
        // evaluating its own initializer.
        assert!(analyze_src("fun main()\nin x <- x\nendfun\n").is_err());
    }
}
