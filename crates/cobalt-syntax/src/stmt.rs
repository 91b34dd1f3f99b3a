//! Statement nodes.
//!
//! Blocks are not statements of their own: they only appear as method
//! bodies, if-branches and while-bodies, and each one opens a scope.

use cobalt_core::Span;

use crate::decl::TypeExpr;
use crate::expr::Expr;
use crate::node::Ident;

/// A braced list of statements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    pub stmts: &'ast [Stmt<'ast>],
    pub span: Span,
}

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// `int a, b = 2;`
    Local(LocalDecl<'ast>),
    /// `if (cond) { ... } else { ... }`
    If(&'ast IfStmt<'ast>),
    /// `while (cond) { ... }`
    While(&'ast WhileStmt<'ast>),
    /// `return;` / `return expr;`
    Return(ReturnStmt<'ast>),
    /// `name = expr;`
    Assign(AssignStmt<'ast>),
    /// `expr;`
    Expr(ExprStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Local(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::Expr(s) => s.span,
        }
    }
}

/// A local variable declaration with one or more declarators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalDecl<'ast> {
    pub ty: TypeExpr<'ast>,
    pub vars: &'ast [VarDeclarator<'ast>],
    pub span: Span,
}

/// One name within a local declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclarator<'ast> {
    pub name: Ident<'ast>,
    pub init: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub then_block: Block<'ast>,
    pub else_block: Option<Block<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub body: Block<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub value: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

/// Assignment to a local, parameter or field named by `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignStmt<'ast> {
    pub target: Ident<'ast>,
    pub value: &'ast Expr<'ast>,
    pub span: Span,
}

/// An expression evaluated for its side effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub span: Span,
}
