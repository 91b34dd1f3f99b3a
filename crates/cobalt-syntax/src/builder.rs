//! Arena-backed construction of syntax trees.
//!
//! Front ends and tests build trees through [`TreeBuilder`] instead of
//! spelling out every node struct. Each node receives the builder's current
//! position, which callers move with [`TreeBuilder::at`] before creating the
//! nodes whose spans matter.

use std::cell::Cell;

use bumpalo::Bump;
use cobalt_core::Span;

use crate::decl::{ClassDecl, ClassMember, FieldDecl, MethodDecl, Param, Program, TypeExpr};
use crate::expr::{BinaryExpr, BinaryOp, CallExpr, Expr, LiteralExpr, SelfExpr};
use crate::node::Ident;
use crate::stmt::{
    AssignStmt, Block, ExprStmt, IfStmt, LocalDecl, ReturnStmt, Stmt, VarDeclarator, WhileStmt,
};

/// Builds syntax trees into a `bumpalo` arena.
pub struct TreeBuilder<'ast> {
    arena: &'ast Bump,
    position: Cell<(u32, u32)>,
}

impl<'ast> TreeBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            position: Cell::new((1, 1)),
        }
    }

    /// Move the position given to subsequently created nodes.
    pub fn at(&self, line: u32, col: u32) -> &Self {
        self.position.set((line, col));
        self
    }

    fn span(&self, len: usize) -> Span {
        let (line, col) = self.position.get();
        Span::new(line, col, len as u32)
    }

    fn slice<T: Copy>(&self, items: &[T]) -> &'ast [T] {
        self.arena.alloc_slice_copy(items)
    }

    // ==========================================================================
    // Declarations
    // ==========================================================================

    pub fn ident(&self, name: &str) -> Ident<'ast> {
        Ident {
            name: self.arena.alloc_str(name),
            span: self.span(name.len()),
        }
    }

    pub fn ty(&self, name: &str) -> TypeExpr<'ast> {
        TypeExpr {
            name: self.arena.alloc_str(name),
            span: self.span(name.len()),
        }
    }

    pub fn program(&self, classes: &[ClassDecl<'ast>]) -> Program<'ast> {
        Program {
            classes: self.slice(classes),
            span: Span::new(1, 1, 0),
        }
    }

    pub fn class(
        &self,
        name: &str,
        parents: &[&str],
        members: &[ClassMember<'ast>],
    ) -> ClassDecl<'ast> {
        let parents: Vec<Ident<'ast>> = parents.iter().map(|p| self.ident(p)).collect();
        ClassDecl {
            name: self.ident(name),
            parents: self.slice(&parents),
            members: self.slice(members),
            span: self.span(name.len()),
        }
    }

    /// `ty name, name, ...;` inside a class body.
    pub fn field(&self, ty: &str, names: &[&str]) -> ClassMember<'ast> {
        let names: Vec<Ident<'ast>> = names.iter().map(|n| self.ident(n)).collect();
        ClassMember::Field(FieldDecl {
            ty: self.ty(ty),
            names: self.slice(&names),
            span: self.span(0),
        })
    }

    /// `def name(params): ret { body }`; `ret = None` declares `void`.
    pub fn method(
        &self,
        name: &str,
        params: &[Param<'ast>],
        ret: Option<&str>,
        body: &[Stmt<'ast>],
    ) -> ClassMember<'ast> {
        ClassMember::Method(MethodDecl {
            name: self.ident(name),
            params: self.slice(params),
            return_type: ret.map(|r| self.ty(r)),
            body: self.block(body),
            span: self.span(name.len()),
        })
    }

    /// The untyped receiver parameter.
    pub fn receiver(&self, name: &str) -> Param<'ast> {
        Param {
            name: self.ident(name),
            ty: None,
            span: self.span(name.len()),
        }
    }

    /// A typed parameter.
    pub fn param(&self, name: &str, ty: &str) -> Param<'ast> {
        Param {
            name: self.ident(name),
            ty: Some(self.ty(ty)),
            span: self.span(name.len()),
        }
    }

    pub fn block(&self, stmts: &[Stmt<'ast>]) -> Block<'ast> {
        Block {
            stmts: self.slice(stmts),
            span: self.span(0),
        }
    }

    // ==========================================================================
    // Statements
    // ==========================================================================

    /// `ty a, b;`
    pub fn local(&self, ty: &str, names: &[&str]) -> Stmt<'ast> {
        let vars: Vec<VarDeclarator<'ast>> = names
            .iter()
            .map(|n| VarDeclarator {
                name: self.ident(n),
                init: None,
                span: self.span(n.len()),
            })
            .collect();
        Stmt::Local(LocalDecl {
            ty: self.ty(ty),
            vars: self.slice(&vars),
            span: self.span(0),
        })
    }

    /// `ty name = init;`
    pub fn local_init(&self, ty: &str, name: &str, init: Expr<'ast>) -> Stmt<'ast> {
        let var = VarDeclarator {
            name: self.ident(name),
            init: Some(&*self.arena.alloc(init)),
            span: self.span(name.len()),
        };
        Stmt::Local(LocalDecl {
            ty: self.ty(ty),
            vars: self.slice(&[var]),
            span: self.span(0),
        })
    }

    pub fn if_(
        &self,
        condition: Expr<'ast>,
        then_stmts: &[Stmt<'ast>],
        else_stmts: Option<&[Stmt<'ast>]>,
    ) -> Stmt<'ast> {
        Stmt::If(self.arena.alloc(IfStmt {
            condition: self.arena.alloc(condition),
            then_block: self.block(then_stmts),
            else_block: else_stmts.map(|stmts| self.block(stmts)),
            span: self.span(2),
        }))
    }

    pub fn while_(&self, condition: Expr<'ast>, body: &[Stmt<'ast>]) -> Stmt<'ast> {
        Stmt::While(self.arena.alloc(WhileStmt {
            condition: self.arena.alloc(condition),
            body: self.block(body),
            span: self.span(5),
        }))
    }

    pub fn ret(&self, value: Option<Expr<'ast>>) -> Stmt<'ast> {
        let value: Option<&'ast Expr<'ast>> = match value {
            Some(expr) => Some(&*self.arena.alloc(expr)),
            None => None,
        };
        Stmt::Return(ReturnStmt {
            value,
            span: self.span(6),
        })
    }

    pub fn assign(&self, target: &str, value: Expr<'ast>) -> Stmt<'ast> {
        Stmt::Assign(AssignStmt {
            target: self.ident(target),
            value: self.arena.alloc(value),
            span: self.span(0),
        })
    }

    pub fn expr_stmt(&self, expr: Expr<'ast>) -> Stmt<'ast> {
        Stmt::Expr(ExprStmt {
            expr: self.arena.alloc(expr),
            span: self.span(0),
        })
    }

    // ==========================================================================
    // Expressions
    // ==========================================================================

    pub fn int(&self, value: i64) -> Expr<'ast> {
        Expr::Literal(LiteralExpr {
            value,
            span: self.span(0),
        })
    }

    pub fn var(&self, name: &str) -> Expr<'ast> {
        Expr::Ident(self.ident(name))
    }

    pub fn self_(&self) -> Expr<'ast> {
        Expr::SelfRef(SelfExpr {
            span: self.span(4),
        })
    }

    pub fn binary(&self, left: Expr<'ast>, op: BinaryOp, right: Expr<'ast>) -> Expr<'ast> {
        Expr::Binary(self.arena.alloc(BinaryExpr {
            left: self.arena.alloc(left),
            op,
            right: self.arena.alloc(right),
            span: self.span(op.as_str().len()),
        }))
    }

    /// `receiver.callee(args)`, or `callee(args)` without a receiver.
    pub fn call(
        &self,
        receiver: Option<Expr<'ast>>,
        callee: &str,
        args: &[Expr<'ast>],
    ) -> Expr<'ast> {
        let receiver: Option<&'ast Expr<'ast>> = match receiver {
            Some(expr) => Some(&*self.arena.alloc(expr)),
            None => None,
        };
        Expr::Call(self.arena.alloc(CallExpr {
            receiver,
            callee: self.ident(callee),
            args: self.slice(args),
            span: self.span(callee.len()),
        }))
    }

    /// `Class()`: construction of a zero-initialized value.
    pub fn construct(&self, class: &str) -> Expr<'ast> {
        self.call(None, class, &[])
    }
}
