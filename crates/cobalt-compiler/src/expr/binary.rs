//! Binary operators.
//!
//! Every operator takes `int` operands and yields `int`, so the result type
//! is known even when an operand failed to check.

use cobalt_core::TypeDescriptor;
use cobalt_syntax::{BinaryExpr, Expr};

use super::{ExprCompiler, Result};
use crate::expr_info::ExprInfo;

pub fn compile_binary(compiler: &mut ExprCompiler<'_, '_>, bin: &BinaryExpr<'_>) -> Result<ExprInfo> {
    let left = operand(compiler, bin, bin.left);
    let right = operand(compiler, bin, bin.right);
    Ok(ExprInfo::value(
        TypeDescriptor::INT,
        format!("({} {} {})", left, bin.op, right),
    ))
}

fn operand(compiler: &mut ExprCompiler<'_, '_>, bin: &BinaryExpr<'_>, expr: &Expr<'_>) -> String {
    let info = compiler.infer_value(expr);
    if let Some(ty) = info.ty
        && let Err(error) = compiler.validator.check_operand(bin.op, ty, expr.span())
    {
        compiler.report(error);
    }
    info.code
}
