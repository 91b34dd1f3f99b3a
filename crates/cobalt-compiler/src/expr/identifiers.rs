//! Identifiers, `self` and literals.

use cobalt_core::TypeDescriptor;
use cobalt_registry::VariableKind;
use cobalt_syntax::{Ident, LiteralExpr};

use super::{ExprCompiler, Result, field_access};
use crate::emit::c_ident;
use crate::expr_info::ExprInfo;

/// A bare name: a local, a parameter, the receiver or a field of the
/// enclosing class.
pub fn compile_ident(compiler: &mut ExprCompiler<'_, '_>, ident: &Ident<'_>) -> Result<ExprInfo> {
    let id = compiler
        .validator
        .resolve_variable(compiler.scope, compiler.class, ident.name, ident.span)?;
    let var = compiler.table.variable(id);
    Ok(match var.kind {
        VariableKind::Receiver => ExprInfo::receiver(TypeDescriptor::Class(compiler.class)),
        VariableKind::Field => ExprInfo::named(var.ty, field_access(compiler.table, compiler.class, id)),
        VariableKind::Parameter | VariableKind::Local => ExprInfo::named(var.ty, c_ident(&var.name)),
    })
}

pub fn compile_self(compiler: &ExprCompiler<'_, '_>) -> ExprInfo {
    ExprInfo::receiver(TypeDescriptor::Class(compiler.class))
}

pub fn compile_literal(compiler: &ExprCompiler<'_, '_>, lit: &LiteralExpr) -> Result<ExprInfo> {
    compiler.validator.check_int_literal(lit.value, lit.span)?;
    Ok(ExprInfo::value(TypeDescriptor::INT, lit.value.to_string()))
}
