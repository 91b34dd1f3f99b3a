//! Expression nodes.

use std::fmt;

use cobalt_core::Span;

use crate::node::Ident;

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    Call(&'ast CallExpr<'ast>),
    Binary(&'ast BinaryExpr<'ast>),
    Literal(LiteralExpr),
    Ident(Ident<'ast>),
    SelfRef(SelfExpr),
}

impl<'ast> Expr<'ast> {
    pub fn span(&self) -> Span {
        match self {
            Expr::Call(e) => e.span,
            Expr::Binary(e) => e.span,
            Expr::Literal(e) => e.span,
            Expr::Ident(e) => e.span,
            Expr::SelfRef(e) => e.span,
        }
    }
}

/// A call.
///
/// - `recv.m(args)`: method call on `recv`
/// - `m(args)`: method call on the implicit receiver
/// - `B()`: construction, when `callee` names a class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub receiver: Option<&'ast Expr<'ast>>,
    pub callee: Ident<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub left: &'ast Expr<'ast>,
    pub op: BinaryOp,
    pub right: &'ast Expr<'ast>,
    pub span: Span,
}

/// Integer literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr {
    pub value: i64,
    pub span: Span,
}

/// The receiver, `self`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfExpr {
    pub span: Span,
}

/// Binary operators. All take integer operands and yield an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinaryOp {
    /// Operator spelling, shared by the source and target languages.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
