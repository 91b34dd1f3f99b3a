//! Symbol collection (pass 1).
//!
//! Walks the tree once, depth-first in declaration order, and registers
//! every class, field, method, parameter and local together with the scope
//! tree. Nothing is resolved here: parent and type names are kept as written
//! so that later declarations can be referenced.
//!
//! ## Responsibilities
//!
//! - Register classes, rejecting duplicate names. A rejected class or method
//!   is still walked against a throwaway table so the declarations inside it
//!   are checked too
//! - Register fields and methods in one namespace per class
//! - Open a method scope for parameters and top-level locals, and a block
//!   scope for every if-branch, else-branch and while-body
//! - Report method declarations without an untyped receiver as malformed

use cobalt_core::{ClassId, CompilationError, Diagnostics, MethodId, ScopeId};
use cobalt_registry::{SymbolTable, TypeName};
use cobalt_syntax::{Block, ClassDecl, ClassMember, FieldDecl, MethodDecl, Param, Program, Stmt, TypeExpr};

/// Output of the collection pass.
#[derive(Debug)]
pub struct CollectionOutput {
    pub table: SymbolTable,
    pub classes_registered: usize,
    pub methods_registered: usize,
    pub scopes_opened: usize,
}

pub struct SymbolCollector<'d> {
    table: SymbolTable,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> SymbolCollector<'d> {
    pub fn new(diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            table: SymbolTable::new(),
            diagnostics,
        }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self, program: &Program<'_>) -> CollectionOutput {
        for (index, class) in program.classes.iter().enumerate() {
            self.visit_class(index, class);
        }

        let output = CollectionOutput {
            classes_registered: self.table.class_count(),
            methods_registered: self.table.method_count(),
            scopes_opened: self.table.scope_count(),
            table: self.table,
        };
        tracing::debug!(
            classes = output.classes_registered,
            methods = output.methods_registered,
            scopes = output.scopes_opened,
            "symbols collected"
        );
        output
    }

    fn visit_class(&mut self, index: usize, decl: &ClassDecl<'_>) {
        let parents = decl
            .parents
            .iter()
            .map(|parent| TypeName::new(parent.name, parent.span))
            .collect();
        let class = match self.table.register_class(decl.name.name, parents, index, decl.name.span) {
            Ok(id) => id,
            Err(error) => {
                self.diagnostics.report(error);
                SymbolCollector::new(&mut *self.diagnostics).visit_class(index, decl);
                return;
            }
        };

        for (member_index, member) in decl.members.iter().enumerate() {
            match member {
                ClassMember::Field(field) => self.visit_field(class, field),
                ClassMember::Method(method) => self.visit_method(class, member_index, method),
            }
        }
    }

    fn visit_field(&mut self, class: ClassId, field: &FieldDecl<'_>) {
        for name in field.names {
            let result = self
                .table
                .declare_field(class, name.name, type_name(&field.ty), name.span);
            self.diagnostics.record(result);
        }
    }

    fn visit_method(&mut self, class: ClassId, index: usize, decl: &MethodDecl<'_>) {
        let Some(receiver) = decl.params.first() else {
            self.diagnostics.report(CompilationError::MalformedTree {
                message: format!("method '{}' has no receiver parameter", decl.name),
                span: decl.span,
            });
            return;
        };
        if receiver.ty.is_some() {
            self.diagnostics.report(CompilationError::MalformedTree {
                message: format!("first parameter of method '{}' must be the untyped receiver", decl.name),
                span: receiver.span,
            });
            return;
        }

        let return_type = decl.return_type.as_ref().map(type_name);
        let method = match self
            .table
            .register_method(class, decl.name.name, return_type, index, decl.name.span)
        {
            Ok(id) => id,
            Err(error) => {
                self.diagnostics.report(error);
                self.visit_detached_method(class, index, decl);
                return;
            }
        };

        let result = self.table.declare_receiver(method, receiver.name.name, receiver.span);
        self.diagnostics.record(result);
        for param in &decl.params[1..] {
            self.visit_param(method, decl, param);
        }

        let scope = self.table.method(method).scope;
        self.visit_stmts(scope, &decl.body);
    }

    /// Walk a method that clashed with an earlier member inside a throwaway
    /// copy of its class.
    fn visit_detached_method(&mut self, class: ClassId, index: usize, decl: &MethodDecl<'_>) {
        let symbol = self.table.class(class);
        let (name, span) = (symbol.name.clone(), symbol.span);
        let mut detached = SymbolCollector::new(&mut *self.diagnostics);
        if let Some(copy) = detached
            .diagnostics
            .record(detached.table.register_class(&name, Vec::new(), 0, span))
        {
            detached.visit_method(copy, index, decl);
        }
    }

    fn visit_param(&mut self, method: MethodId, decl: &MethodDecl<'_>, param: &Param<'_>) {
        let Some(ty) = &param.ty else {
            self.diagnostics.report(CompilationError::MalformedTree {
                message: format!("parameter '{}' of method '{}' has no type", param.name, decl.name),
                span: param.span,
            });
            return;
        };
        let result = self
            .table
            .declare_parameter(method, param.name.name, type_name(ty), param.span);
        self.diagnostics.record(result);
    }

    /// Register the declarations of `block` directly in `scope`.
    fn visit_stmts(&mut self, scope: ScopeId, block: &Block<'_>) {
        for stmt in block.stmts {
            match stmt {
                Stmt::Local(local) => {
                    for var in local.vars {
                        let result = self
                            .table
                            .declare_local(scope, var.name.name, type_name(&local.ty), var.name.span);
                        self.diagnostics.record(result);
                    }
                }
                Stmt::If(if_stmt) => {
                    self.visit_block(scope, &if_stmt.then_block);
                    if let Some(else_block) = &if_stmt.else_block {
                        self.visit_block(scope, else_block);
                    }
                }
                Stmt::While(while_stmt) => self.visit_block(scope, &while_stmt.body),
                Stmt::Return(_) | Stmt::Assign(_) | Stmt::Expr(_) => {}
            }
        }
    }

    fn visit_block(&mut self, parent: ScopeId, block: &Block<'_>) {
        let scope = self.table.open_block(parent);
        self.visit_stmts(scope, block);
    }
}

fn type_name(ty: &TypeExpr<'_>) -> TypeName {
    TypeName::new(ty.name, ty.span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use cobalt_core::DiagnosticKind;
    use cobalt_registry::{ScopeKind, VariableKind};
    use cobalt_syntax::TreeBuilder;

    fn collect(program: &Program<'_>) -> (CollectionOutput, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let output = SymbolCollector::new(&mut diagnostics).run(program);
        (output, diagnostics)
    }

    #[test]
    fn registers_classes_members_and_scopes() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[
            b.class("B", &["A"], &[]),
            b.class(
                "A",
                &[],
                &[
                    b.field("int", &["x", "y"]),
                    b.method(
                        "m",
                        &[b.receiver("self"), b.param("p", "int")],
                        Some("int"),
                        &[
                            b.local("int", &["a"]),
                            b.if_(b.var("a"), &[b.local("int", &["a"])], Some(&[])),
                            b.while_(b.var("a"), &[]),
                            b.ret(Some(b.var("a"))),
                        ],
                    ),
                ],
            ),
        ]);

        let (output, diagnostics) = collect(&program);
        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(output.classes_registered, 2);
        assert_eq!(output.methods_registered, 1);

        let table = &output.table;
        let b_class = table.lookup_class("B").unwrap();
        assert_eq!(table.class(b_class).parents[0].name, "A");
        assert!(table.class(b_class).resolved_parents.is_empty());

        let a = table.lookup_class("A").unwrap();
        assert_eq!(table.class(a).fields.len(), 2);
        let m = table.class(a).methods[0];
        let method = table.method(m);
        assert_eq!(method.decl_index, 1);
        assert_eq!(method.params.len(), 2);
        assert_eq!(table.variable(method.params[0]).kind, VariableKind::Receiver);

        // Method scope holds receiver, parameter and the top-level local;
        // then-branch, else-branch and while-body each get a block.
        let scope = table.scope(method.scope);
        assert_eq!(scope.variables().len(), 3);
        assert_eq!(scope.children.len(), 3);
        for child in &scope.children {
            assert_eq!(table.scope(*child).kind, ScopeKind::Block);
        }
        assert_eq!(table.scope(scope.children[0]).variables().len(), 1);
    }

    #[test]
    fn duplicate_class_reported_once() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[
            b.class("A", &[], &[b.field("int", &["x"])]),
            b.class("A", &[], &[b.field("int", &["x"])]),
        ]);

        let (output, diagnostics) = collect(&program);
        assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::DuplicateDeclaration]);
        assert_eq!(output.classes_registered, 1);
        let a = output.table.lookup_class("A").unwrap();
        assert_eq!(output.table.class(a).decl_index, 0);
    }

    #[test]
    fn rejected_declarations_are_still_walked() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[
            b.class("A", &[], &[b.method("m", &[b.receiver("self")], None, &[])]),
            b.class(
                "A",
                &[],
                &[b.method("n", &[b.receiver("self")], None, &[b.local("int", &["a", "a"])])],
            ),
            b.class(
                "B",
                &[],
                &[
                    b.method("m", &[b.receiver("self")], None, &[]),
                    b.method("m", &[b.receiver("self"), b.param("self", "int")], None, &[]),
                ],
            ),
        ]);

        let (output, diagnostics) = collect(&program);
        // The class clash, then the local clash inside the rejected class;
        // the method clash, then the parameter clash inside the rejected method.
        assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::DuplicateDeclaration; 4]);
        assert!(diagnostics.to_string().contains("duplicate declaration of variable 'a'"));
        assert!(diagnostics.to_string().contains("duplicate declaration of parameter 'self'"));
        // Nothing from the rejected declarations reaches the table.
        assert_eq!(output.classes_registered, 2);
        assert_eq!(output.methods_registered, 2);
    }

    #[test]
    fn same_scope_redeclaration_is_duplicate() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[b.class(
            "A",
            &[],
            &[
                b.field("int", &["v"]),
                b.method(
                    "m",
                    &[b.receiver("self"), b.param("p", "int")],
                    None,
                    &[b.local("int", &["v", "p"])],
                ),
                b.method("v", &[b.receiver("self")], None, &[]),
            ],
        )]);

        let (_, diagnostics) = collect(&program);
        // `v` shadows the field legally; `p` clashes with the parameter;
        // method `v` clashes with the field.
        assert_eq!(
            diagnostics.kinds(),
            vec![DiagnosticKind::DuplicateDeclaration, DiagnosticKind::DuplicateDeclaration]
        );
    }

    #[test]
    fn receiver_must_be_untyped_first_parameter() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let program = b.program(&[b.class(
            "A",
            &[],
            &[
                b.method("none", &[], None, &[]),
                b.method("typed", &[b.param("self", "A")], None, &[]),
                b.method("ok", &[b.receiver("this")], None, &[]),
            ],
        )]);

        let (output, diagnostics) = collect(&program);
        assert_eq!(
            diagnostics.kinds(),
            vec![DiagnosticKind::MalformedTree, DiagnosticKind::MalformedTree]
        );
        assert_eq!(output.methods_registered, 1);
    }
}
