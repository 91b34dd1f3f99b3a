//! `if` and `while`.

use cobalt_syntax::{Expr, IfStmt, WhileStmt};

use super::{Result, StmtCompiler};
use crate::expr::standalone;

impl<'a, 't> StmtCompiler<'a, 't> {
    pub(super) fn compile_if(&mut self, if_stmt: &IfStmt<'_>) -> Result<()> {
        let condition = self.condition(if_stmt.condition);
        self.writer.open(format!("if ({condition})"));
        self.compile_block(&if_stmt.then_block)?;
        if let Some(else_block) = &if_stmt.else_block {
            self.writer.close("} else {");
            self.writer.indent();
            self.compile_block(else_block)?;
        }
        self.writer.close("}");
        Ok(())
    }

    pub(super) fn compile_while(&mut self, while_stmt: &WhileStmt<'_>) -> Result<()> {
        let condition = self.condition(while_stmt.condition);
        self.writer.open(format!("while ({condition})"));
        self.compile_block(&while_stmt.body)?;
        self.writer.close("}");
        Ok(())
    }

    /// A condition must be an `int`.
    fn condition(&mut self, expr: &Expr<'_>) -> String {
        let info = self.expr().infer_value(expr);
        if let Some(ty) = info.ty
            && let Err(error) = self.validator.check_condition(ty, expr.span())
        {
            self.report(error);
        }
        standalone(expr, info.code)
    }
}
