//! Expression translation.
//!
//! [`ExprCompiler`] type-checks an expression and produces its C text in one
//! walk. Node handlers return `Result` and use `?` like any other check; the
//! [`ExprCompiler::infer`] boundary records a failed node's error and hands
//! back a poisoned [`ExprInfo`], so sibling expressions are still checked and
//! enclosing checks do not report follow-on errors.
//!
//! # Example
//!
//! ```ignore
//! let mut compiler = ExprCompiler::new(&validator, &scope, class, &mut diagnostics);
//! let info = compiler.infer(&expr);
//! let code = compiler.check(&expr, Some(TypeDescriptor::INT), "assignment to 'x'");
//! ```

mod binary;
mod calls;
mod identifiers;

use cobalt_core::{ClassId, CompilationError, Diagnostics, TypeDescriptor, VariableId};
use cobalt_registry::SymbolTable;
use cobalt_syntax::Expr;

use crate::emit::{RECEIVER, base_member, c_ident};
use crate::expr_info::ExprInfo;
use crate::scope::LocalScope;
use crate::validator::Validator;

type Result<T> = std::result::Result<T, CompilationError>;

pub struct ExprCompiler<'a, 't> {
    table: &'t SymbolTable,
    validator: &'a Validator<'t>,
    scope: &'a LocalScope<'t>,
    /// Class of the method being translated.
    class: ClassId,
    diagnostics: &'a mut Diagnostics,
}

impl<'a, 't> ExprCompiler<'a, 't> {
    pub fn new(
        validator: &'a Validator<'t>,
        scope: &'a LocalScope<'t>,
        class: ClassId,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            table: validator.table(),
            validator,
            scope,
            class,
            diagnostics,
        }
    }

    /// Translate an expression. A failed check is recorded and yields a
    /// poisoned result.
    pub fn infer(&mut self, expr: &Expr<'_>) -> ExprInfo {
        let result = match expr {
            Expr::Literal(lit) => identifiers::compile_literal(self, lit),
            Expr::Ident(ident) => identifiers::compile_ident(self, ident),
            Expr::SelfRef(_) => Ok(identifiers::compile_self(self)),
            Expr::Binary(bin) => binary::compile_binary(self, bin),
            Expr::Call(call) => calls::compile_call(self, call),
        };
        match result {
            Ok(info) => info,
            Err(error) => {
                self.report(error);
                ExprInfo::poisoned()
            }
        }
    }

    /// Translate an expression whose value is used.
    pub fn infer_value(&mut self, expr: &Expr<'_>) -> ExprInfo {
        let info = self.infer(expr);
        if let Some(ty) = info.ty
            && let Err(error) = self.validator.check_value(ty, expr.span())
        {
            self.report(error);
            return ExprInfo::poisoned();
        }
        info
    }

    /// Translate `expr` for storage where `target` is expected and return its
    /// C text, converted to `target` if it is an ancestor class.
    pub fn check(&mut self, expr: &Expr<'_>, target: Option<TypeDescriptor>, context: &str) -> String {
        let info = self.infer_value(expr);
        let (Some(source), Some(target)) = (info.ty, target) else {
            return standalone(expr, info.code);
        };
        if let Err(error) = self.validator.check_assignable(source, target, context, expr.span()) {
            self.report(error);
            return info.code;
        }
        standalone(expr, coerce(self.table, &info, target))
    }

    fn report(&mut self, error: CompilationError) {
        self.diagnostics.report(error);
    }

    /// Check and discard arguments of a call that cannot be translated.
    fn discard(&mut self, args: &[Expr<'_>]) {
        for arg in args {
            self.infer_value(arg);
        }
    }
}

/// Drop the outer parentheses of a binary expression that stands alone.
pub fn standalone(expr: &Expr<'_>, code: String) -> String {
    match expr {
        Expr::Binary(_) if code.starts_with('(') && code.ends_with(')') => {
            code[1..code.len() - 1].to_string()
        }
        _ => code,
    }
}

/// `code`, a pointer to a `from`, as a pointer to its ancestor `to`.
///
/// Every parent is embedded in its child as a `<Parent>_part` member, so an
/// ancestor is reached by walking those members down the base path.
pub fn upcast(table: &SymbolTable, code: &str, from: ClassId, to: ClassId) -> String {
    match table.base_path(from, to) {
        Some(path) if !path.is_empty() => {
            format!("&{}->{}", postfix(code), part_chain(table, &path))
        }
        _ => code.to_string(),
    }
}

/// `info`'s value converted to `target`.
pub fn coerce(table: &SymbolTable, info: &ExprInfo, target: TypeDescriptor) -> String {
    match (info.ty, target) {
        (Some(TypeDescriptor::Class(from)), TypeDescriptor::Class(to)) => {
            upcast(table, &info.code, from, to)
        }
        _ => info.code.clone(),
    }
}

/// `self->...` access to `field` from a method of `class`, through the
/// parts of the ancestors between them.
pub fn field_access(table: &SymbolTable, class: ClassId, field: VariableId) -> String {
    let name = c_ident(&table.variable(field).name);
    let path = table
        .field_owner(field)
        .and_then(|owner| table.base_path(class, owner))
        .unwrap_or_default();
    if path.is_empty() {
        format!("{RECEIVER}->{name}")
    } else {
        format!("{RECEIVER}->{}.{name}", part_chain(table, &path))
    }
}

fn part_chain(table: &SymbolTable, path: &[ClassId]) -> String {
    path.iter()
        .map(|class| base_member(&table.class(*class).name))
        .collect::<Vec<_>>()
        .join(".")
}

/// Parenthesize `code` unless it already is a name, a member access or a
/// call, which bind tighter than `->`.
fn postfix(code: &str) -> String {
    if code.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        code.to_string()
    } else {
        format!("({code})")
    }
}
