//! Statement translation.
//!
//! The [`StmtCompiler`] translates one method body, statement by statement,
//! into C lines:
//! - local declarations at their point of declaration, with resolved types
//! - `if`/`while` mapped onto the C constructs, each block in its own scope
//! - `return` checked against the declared return type
//! - assignments checked for compatibility
//!
//! Semantic errors are recorded and translation continues. Only a tree that
//! disagrees with the collected scope tree stops the body.

mod control;
mod return_stmt;
mod var_decl;

use cobalt_core::{ClassId, CompilationError, Diagnostics, MethodId};
use cobalt_registry::{SymbolTable, VariableKind};
use cobalt_syntax::{AssignStmt, Block, ExprStmt, Stmt};

use crate::emit::{RECEIVER, SourceWriter, c_ident};
use crate::expr::{ExprCompiler, field_access, standalone};
use crate::scope::LocalScope;
use crate::validator::Validator;

type Result<T> = std::result::Result<T, CompilationError>;

pub struct StmtCompiler<'a, 't> {
    table: &'t SymbolTable,
    validator: &'a Validator<'t>,
    scope: LocalScope<'t>,
    writer: &'a mut SourceWriter,
    diagnostics: &'a mut Diagnostics,
    method: MethodId,
    class: ClassId,
}

impl<'a, 't> StmtCompiler<'a, 't> {
    pub fn new(
        validator: &'a Validator<'t>,
        method: MethodId,
        writer: &'a mut SourceWriter,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        let table = validator.table();
        Self {
            table,
            validator,
            scope: LocalScope::new(table, method),
            writer,
            diagnostics,
            method,
            class: table.method(method).owner,
        }
    }

    /// Translate a method body. The body shares the method's scope.
    pub fn compile_body(&mut self, body: &Block<'_>) {
        if let Err(error) = self.compile_stmts(body) {
            self.diagnostics.report(error);
        }
    }

    pub fn compile(&mut self, stmt: &Stmt<'_>) -> Result<()> {
        match stmt {
            Stmt::Local(decl) => self.compile_local(decl),
            Stmt::If(if_stmt) => self.compile_if(if_stmt),
            Stmt::While(while_stmt) => self.compile_while(while_stmt),
            Stmt::Return(ret) => {
                self.compile_return(ret);
                Ok(())
            }
            Stmt::Assign(assign) => {
                self.compile_assign(assign);
                Ok(())
            }
            Stmt::Expr(expr_stmt) => {
                self.compile_expr_stmt(expr_stmt);
                Ok(())
            }
        }
    }

    fn compile_stmts(&mut self, block: &Block<'_>) -> Result<()> {
        for stmt in block.stmts {
            self.compile(stmt)?;
        }
        Ok(())
    }

    /// A nested block in the next scope collected for it.
    fn compile_block(&mut self, block: &Block<'_>) -> Result<()> {
        self.scope.enter_block(block.span)?;
        let result = self.compile_stmts(block);
        self.scope.exit_block();
        result
    }

    fn expr(&mut self) -> ExprCompiler<'_, 't> {
        ExprCompiler::new(self.validator, &self.scope, self.class, self.diagnostics)
    }

    fn report(&mut self, error: CompilationError) {
        self.diagnostics.report(error);
    }

    fn compile_assign(&mut self, assign: &AssignStmt<'_>) {
        let table = self.table;
        let target = &assign.target;
        let resolved =
            self.validator
                .resolve_variable(&self.scope, self.class, target.name, target.span);
        let (ty, lhs) = match resolved {
            Ok(id) => {
                let var = table.variable(id);
                match var.kind {
                    VariableKind::Receiver => {
                        self.report(CompilationError::type_mismatch(
                            format!("cannot assign to the receiver '{}'", target.name),
                            target.span,
                        ));
                        (None, RECEIVER.to_string())
                    }
                    VariableKind::Field => (var.ty, field_access(table, self.class, id)),
                    VariableKind::Parameter | VariableKind::Local => (var.ty, c_ident(&var.name)),
                }
            }
            Err(error) => {
                self.report(error);
                (None, c_ident(target.name))
            }
        };
        let context = format!("assignment to '{}'", target.name);
        let value = self.expr().check(assign.value, ty, &context);
        self.writer.line(format!("{lhs} = {value};"));
    }

    fn compile_expr_stmt(&mut self, expr_stmt: &ExprStmt<'_>) {
        let info = self.expr().infer(expr_stmt.expr);
        self.writer
            .line(format!("{};", standalone(expr_stmt.expr, info.code)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::{InheritanceResolver, SymbolCollector};
    use bumpalo::Bump;
    use cobalt_core::DiagnosticKind;
    use cobalt_syntax::{BinaryOp, ClassMember, Program, TreeBuilder};

    /// Collect and resolve `program`, then translate the body of the first
    /// method of the first class.
    fn body(program: &Program<'_>) -> (String, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mut table = SymbolCollector::new(&mut diagnostics).run(program).table;
        InheritanceResolver::new(&mut table, &mut diagnostics).run();

        let class = table.class_ids().next().unwrap();
        let method = table.class(class).methods[0];
        let ClassMember::Method(decl) = &program.classes[0].members[table.method(method).decl_index] else {
            panic!("expected a method");
        };

        let validator = Validator::new(&table);
        let mut writer = SourceWriter::new(4);
        StmtCompiler::new(&validator, method, &mut writer, &mut diagnostics).compile_body(&decl.body);
        (writer.finish(), diagnostics)
    }

    #[test]
    fn locals_and_control_flow() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[b.class(
            "Counter",
            &[],
            &[
                b.field("int", &["count"]),
                b.method(
                    "run",
                    &[b.receiver("self"), b.param("limit", "int")],
                    None,
                    &[
                        b.local_init("int", "i", b.int(0)),
                        b.while_(
                            b.binary(b.var("i"), BinaryOp::Less, b.var("limit")),
                            &[
                                b.if_(
                                    b.binary(b.var("i"), BinaryOp::Rem, b.int(2)),
                                    &[b.assign("count", b.binary(b.var("count"), BinaryOp::Add, b.int(1)))],
                                    Some(&[b.expr_stmt(b.call(None, "reset", &[]))]),
                                ),
                                b.assign("i", b.binary(b.var("i"), BinaryOp::Add, b.int(1))),
                            ],
                        ),
                        b.ret(None),
                    ],
                ),
                b.method("reset", &[b.receiver("self")], None, &[b.assign("count", b.int(0))]),
            ],
        )]);

        let (text, diagnostics) = body(&program);
        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(
            text,
            "int i = 0;\n\
             while (i < limit) {\n    \
                 if (i % 2) {\n        \
                     self->count = self->count + 1;\n    \
                 } else {\n        \
                     Counter_reset(self);\n    \
                 }\n    \
                 i = i + 1;\n\
             }\n\
             return;\n"
        );
    }

    #[test]
    fn local_is_not_visible_before_its_declaration() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[b.class(
            "A",
            &[],
            &[b.method(
                "m",
                &[b.receiver("self")],
                None,
                &[b.assign("a", b.int(1)), b.local("int", &["a"])],
            )],
        )]);

        let (_, diagnostics) = body(&program);
        assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UndeclaredIdentifier]);
    }

    #[test]
    fn assigning_the_receiver_is_rejected() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[b.class(
            "A",
            &[],
            &[b.method("m", &[b.receiver("self")], None, &[b.assign("self", b.self_())])],
        )]);

        let (_, diagnostics) = body(&program);
        assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::TypeMismatch]);
    }

    #[test]
    fn class_condition_is_rejected() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[b.class(
            "A",
            &[],
            &[b.method("m", &[b.receiver("self")], None, &[b.while_(b.self_(), &[])])],
        )]);

        let (_, diagnostics) = body(&program);
        assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::TypeMismatch]);
    }

    #[test]
    fn upcast_assignment_and_return() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[
            b.class(
                "Holder",
                &[],
                &[
                    b.field("Base", &["item"]),
                    b.method(
                        "take",
                        &[b.receiver("self"), b.param("d", "Derived")],
                        Some("Base"),
                        &[b.assign("item", b.var("d")), b.ret(Some(b.var("d")))],
                    ),
                ],
            ),
            b.class("Base", &[], &[]),
            b.class("Derived", &["Base"], &[]),
        ]);

        let (text, diagnostics) = body(&program);
        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(
            text,
            "self->item = &d->Base_part;\nreturn &d->Base_part;\n"
        );
    }

    #[test]
    fn objects_are_shared_not_copied() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[b.class(
            "Node",
            &[],
            &[
                b.field("Node", &["next"]),
                b.method(
                    "link",
                    &[b.receiver("self"), b.param("other", "Node")],
                    None,
                    &[
                        b.local_init("Node", "n", b.var("other")),
                        b.assign("next", b.var("n")),
                        b.expr_stmt(b.call(Some(b.var("next")), "link", &[b.self_()])),
                    ],
                ),
            ],
        )]);

        let (text, diagnostics) = body(&program);
        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(
            text,
            "Node *n = other;\nself->next = n;\nNode_link(self->next, self);\n"
        );
    }
}
