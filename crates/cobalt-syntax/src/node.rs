//! Uniform, read-only access to tree nodes.
//!
//! The compiler passes match on the typed node enums directly. [`NodeRef`]
//! is the generic view over the same tree: every node reports a tag from the
//! closed [`NodeKind`] set, its span and its children, which is all a tool
//! needs to walk a tree without knowing the concrete node types.

use std::fmt;

use cobalt_core::Span;

use crate::decl::{ClassDecl, ClassMember, FieldDecl, MethodDecl, Program};
use crate::expr::Expr;
use crate::stmt::{Block, Stmt};

/// An identifier with its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The closed set of node kinds a tree may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ClassDecl,
    MethodDecl,
    FieldDecl,
    LocalDecl,
    IfStmt,
    WhileStmt,
    ReturnStmt,
    AssignStmt,
    ExprStmt,
    CallExpr,
    BinaryExpr,
    LiteralExpr,
    IdentifierExpr,
    SelfExpr,
}

/// A borrowed reference to any node of the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'ast> {
    Class(&'ast ClassDecl<'ast>),
    Method(&'ast MethodDecl<'ast>),
    Field(&'ast FieldDecl<'ast>),
    Stmt(&'ast Stmt<'ast>),
    Expr(&'ast Expr<'ast>),
}

impl<'ast> NodeRef<'ast> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Class(_) => NodeKind::ClassDecl,
            NodeRef::Method(_) => NodeKind::MethodDecl,
            NodeRef::Field(_) => NodeKind::FieldDecl,
            NodeRef::Stmt(stmt) => match stmt {
                Stmt::Local(_) => NodeKind::LocalDecl,
                Stmt::If(_) => NodeKind::IfStmt,
                Stmt::While(_) => NodeKind::WhileStmt,
                Stmt::Return(_) => NodeKind::ReturnStmt,
                Stmt::Assign(_) => NodeKind::AssignStmt,
                Stmt::Expr(_) => NodeKind::ExprStmt,
            },
            NodeRef::Expr(expr) => match expr {
                Expr::Call(_) => NodeKind::CallExpr,
                Expr::Binary(_) => NodeKind::BinaryExpr,
                Expr::Literal(_) => NodeKind::LiteralExpr,
                Expr::Ident(_) => NodeKind::IdentifierExpr,
                Expr::SelfRef(_) => NodeKind::SelfExpr,
            },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            NodeRef::Class(c) => c.span,
            NodeRef::Method(m) => m.span,
            NodeRef::Field(f) => f.span,
            NodeRef::Stmt(s) => s.span(),
            NodeRef::Expr(e) => e.span(),
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeRef<'ast>> {
        let mut out = Vec::new();
        match *self {
            NodeRef::Class(class) => {
                for member in class.members {
                    out.push(match member {
                        ClassMember::Field(field) => NodeRef::Field(field),
                        ClassMember::Method(method) => NodeRef::Method(method),
                    });
                }
            }
            NodeRef::Method(method) => push_block(&mut out, &method.body),
            NodeRef::Field(_) => {}
            NodeRef::Stmt(stmt) => match stmt {
                Stmt::Local(local) => {
                    out.extend(local.vars.iter().filter_map(|v| v.init).map(NodeRef::Expr));
                }
                Stmt::If(if_stmt) => {
                    out.push(NodeRef::Expr(if_stmt.condition));
                    push_block(&mut out, &if_stmt.then_block);
                    if let Some(else_block) = &if_stmt.else_block {
                        push_block(&mut out, else_block);
                    }
                }
                Stmt::While(while_stmt) => {
                    out.push(NodeRef::Expr(while_stmt.condition));
                    push_block(&mut out, &while_stmt.body);
                }
                Stmt::Return(ret) => out.extend(ret.value.map(NodeRef::Expr)),
                Stmt::Assign(assign) => out.push(NodeRef::Expr(assign.value)),
                Stmt::Expr(expr_stmt) => out.push(NodeRef::Expr(expr_stmt.expr)),
            },
            NodeRef::Expr(expr) => match expr {
                Expr::Call(call) => {
                    out.extend(call.receiver.map(NodeRef::Expr));
                    out.extend(call.args.iter().map(NodeRef::Expr));
                }
                Expr::Binary(binary) => {
                    out.push(NodeRef::Expr(binary.left));
                    out.push(NodeRef::Expr(binary.right));
                }
                Expr::Literal(_) | Expr::Ident(_) | Expr::SelfRef(_) => {}
            },
        }
        out
    }
}

fn push_block<'ast>(out: &mut Vec<NodeRef<'ast>>, block: &Block<'ast>) {
    out.extend(block.stmts.iter().map(NodeRef::Stmt));
}

/// Count every node reachable from the program's classes.
pub fn count_nodes(program: &Program<'_>) -> usize {
    let mut stack: Vec<NodeRef<'_>> = program.classes.iter().map(NodeRef::Class).collect();
    let mut count = 0;
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children());
    }
    count
}
