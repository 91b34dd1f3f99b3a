//! Local variable declarations.

use cobalt_core::CompilationError;
use cobalt_syntax::LocalDecl;

use super::{Result, StmtCompiler};
use crate::emit::{c_declaration, c_ident, c_type};

impl<'a, 't> StmtCompiler<'a, 't> {
    /// `T a, b = init;` becomes one C declaration per declarator.
    ///
    /// The initializer is translated before the variable becomes visible, so
    /// `int x = x;` refers to an outer `x`.
    pub(super) fn compile_local(&mut self, decl: &LocalDecl<'_>) -> Result<()> {
        let table = self.table;
        for var in decl.vars {
            let name = var.name.name;
            let Some(id) = self.scope.current().and_then(|scope| table.lookup_in_scope(scope, name))
            else {
                return Err(CompilationError::MalformedTree {
                    message: format!("local '{name}' was not collected"),
                    span: var.span,
                });
            };
            let ty = table.variable(id).ty;

            let init = var.init.map(|init| {
                let context = format!("initializer of '{name}'");
                self.expr().check(init, ty, &context)
            });
            self.scope.declare(name);

            let c_ty = ty.map_or_else(|| decl.ty.name.to_string(), |ty| c_type(table, ty));
            let declaration = c_declaration(&c_ty, &c_ident(name));
            match init {
                Some(code) => self.writer.line(format!("{declaration} = {code};")),
                None => self.writer.line(format!("{declaration};")),
            }
        }
        Ok(())
    }
}
