//! Return statements.

use cobalt_syntax::ReturnStmt;

use super::StmtCompiler;
use crate::expr::{coerce, standalone};

impl<'a, 't> StmtCompiler<'a, 't> {
    pub(super) fn compile_return(&mut self, ret: &ReturnStmt<'_>) {
        let Some(value) = ret.value else {
            if let Err(error) = self.validator.check_bare_return(self.method, ret.span) {
                self.report(error);
            }
            self.writer.line("return;");
            return;
        };

        let info = self.expr().infer(value);
        let mut code = info.code.clone();
        if let Some(ty) = info.ty {
            match self.validator.check_value_return(self.method, ty, value.span()) {
                Ok(()) => {
                    if let Some(expected) = self.table.method(self.method).return_type {
                        code = coerce(self.table, &info, expected);
                    }
                }
                Err(error) => self.report(error),
            }
        }
        self.writer.line(format!("return {};", standalone(value, code)));
    }
}
