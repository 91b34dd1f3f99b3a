//! Method calls and construction.
//!
//! - `recv.m(args)`: resolved through the flattened members of `recv`'s class
//! - `m(args)`: the same against the implicit receiver
//! - `B()`: a pointer to a zero-initialised `B` when `B` names a class
//!
//! A call is emitted against the class that owns the resolved method, so an
//! inherited method is called as `Owner_m(&recv->Parent_part, ...)` with the
//! owner's part of the receiver.

use cobalt_core::{ClassId, CompilationError, TypeDescriptor};
use cobalt_syntax::CallExpr;

use super::{ExprCompiler, Result, upcast};
use crate::emit::{c_ident, function_name};
use crate::expr_info::ExprInfo;
use crate::validator::MethodLookup;

pub fn compile_call(compiler: &mut ExprCompiler<'_, '_>, call: &CallExpr<'_>) -> Result<ExprInfo> {
    let receiver = match call.receiver {
        Some(recv) => compiler.infer_value(recv),
        None => {
            if let Some(class) = compiler.table.lookup_class(call.callee.name) {
                return Ok(compile_construct(compiler, class, call));
            }
            ExprInfo::receiver(TypeDescriptor::Class(compiler.class))
        }
    };

    let Some(receiver_ty) = receiver.ty else {
        compiler.discard(call.args);
        return Ok(ExprInfo::poisoned());
    };
    let Some(class) = receiver_ty.as_class() else {
        compiler.report(CompilationError::type_mismatch(
            format!(
                "cannot call method '{}' on a value of type '{}'",
                call.callee.name,
                compiler.table.type_name(receiver_ty)
            ),
            call.callee.span,
        ));
        compiler.discard(call.args);
        return Ok(ExprInfo::poisoned());
    };

    let method = match compiler.validator.resolve_method(class, call.callee.name, call.callee.span) {
        Ok(MethodLookup::Found(method)) => method,
        Ok(MethodLookup::Ambiguous) => {
            compiler.discard(call.args);
            return Ok(ExprInfo::poisoned());
        }
        Err(error) => {
            compiler.report(error);
            compiler.discard(call.args);
            return Ok(ExprInfo::poisoned());
        }
    };

    if let Err(error) = compiler.validator.check_arity(method, call.args.len(), call.span) {
        compiler.report(error);
    }

    let table = compiler.table;
    let symbol = table.method(method);
    let name = compiler.validator.qualified_name(method);
    let mut code = format!(
        "{}({}",
        function_name(&table.class(symbol.owner).name, &symbol.name),
        upcast(table, &receiver.code, class, symbol.owner)
    );
    for (i, arg) in call.args.iter().enumerate() {
        let param_ty = symbol
            .explicit_params()
            .get(i)
            .and_then(|param| table.variable(*param).ty);
        let arg_code = compiler.check(arg, param_ty, &format!("argument {} of '{}'", i + 1, name));
        code.push_str(", ");
        code.push_str(&arg_code);
    }
    code.push(')');

    Ok(match symbol.return_type {
        Some(ty) => ExprInfo::value(ty, code),
        None => ExprInfo::poisoned(),
    })
}

/// `B()`, storage for a `B` in the enclosing C block. Nothing is allocated
/// on the heap.
fn compile_construct(compiler: &mut ExprCompiler<'_, '_>, class: ClassId, call: &CallExpr<'_>) -> ExprInfo {
    if !call.args.is_empty() {
        compiler.report(CompilationError::ArityMismatch {
            name: call.callee.name.to_string(),
            expected: 0,
            got: call.args.len(),
            span: call.span,
        });
        compiler.discard(call.args);
    }
    ExprInfo::value(
        TypeDescriptor::Class(class),
        format!("&({}){{0}}", c_ident(&compiler.table.class(class).name)),
    )
}
