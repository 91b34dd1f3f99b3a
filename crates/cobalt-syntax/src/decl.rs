//! Declaration nodes: the program root, classes and their members.

use cobalt_core::Span;

use crate::node::Ident;
use crate::stmt::Block;

/// Root of one translation unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Program<'ast> {
    /// Classes in source declaration order.
    pub classes: &'ast [ClassDecl<'ast>],
    pub span: Span,
}

/// A class declaration.
///
/// Example: `class B inherits A, Mixin { ... }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDecl<'ast> {
    pub name: Ident<'ast>,
    /// Parent class names as written, before resolution.
    pub parents: &'ast [Ident<'ast>],
    /// Members in source order.
    pub members: &'ast [ClassMember<'ast>],
    pub span: Span,
}

impl<'ast> ClassDecl<'ast> {
    /// Iterate over the method members with their member index.
    pub fn methods(&self) -> impl Iterator<Item = (usize, &'ast MethodDecl<'ast>)> + use<'ast> {
        let members: &'ast [ClassMember<'ast>] = self.members;
        members
            .iter()
            .enumerate()
            .filter_map(|(i, member)| match member {
                ClassMember::Method(method) => Some((i, method)),
                ClassMember::Field(_) => None,
            })
    }
}

/// A class member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassMember<'ast> {
    Field(FieldDecl<'ast>),
    Method(MethodDecl<'ast>),
}

impl<'ast> ClassMember<'ast> {
    pub fn span(&self) -> Span {
        match self {
            ClassMember::Field(f) => f.span,
            ClassMember::Method(m) => m.span,
        }
    }
}

/// A field declaration: `int x, y;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDecl<'ast> {
    pub ty: TypeExpr<'ast>,
    pub names: &'ast [Ident<'ast>],
    pub span: Span,
}

/// A method declaration.
///
/// Example: `def add(self, int x): int { ... }`
///
/// The first parameter is the implicit receiver and carries no type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodDecl<'ast> {
    pub name: Ident<'ast>,
    pub params: &'ast [Param<'ast>],
    /// Declared return type; `None` means `void`.
    pub return_type: Option<TypeExpr<'ast>>,
    pub body: Block<'ast>,
    pub span: Span,
}

/// A method parameter. The receiver is written without a type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'ast> {
    pub name: Ident<'ast>,
    pub ty: Option<TypeExpr<'ast>>,
    pub span: Span,
}

/// A type as written in the source: `int`, `void` or a class name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeExpr<'ast> {
    pub name: &'ast str,
    pub span: Span,
}
