//! Semantic diagnostics.
//!
//! Every problem the compiler passes find is a [`CompilationError`]. Each
//! variant belongs to exactly one [`DiagnosticKind`]; several variants may
//! share a kind when they need different message data (an unknown type and
//! an unknown variable are both `UndeclaredIdentifier`).
//!
//! ```text
//! SymbolCollector      → DuplicateDeclaration, MalformedTree
//! InheritanceResolver  → UnknownParentClass, CyclicInheritance,
//!                        UnresolvedClass, AmbiguousMethodResolution,
//!                        UndeclaredIdentifier (types), TypeMismatch (void vars)
//! Validator            → UndeclaredIdentifier, TypeMismatch, ArityMismatch,
//!                        UnresolvedClass
//! ```

use std::fmt;

use thiserror::Error;

use crate::Span;

/// Severity of a diagnostic. The core only produces errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
}

/// The closed taxonomy of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    DuplicateDeclaration,
    UnknownParentClass,
    CyclicInheritance,
    AmbiguousMethodResolution,
    UndeclaredIdentifier,
    TypeMismatch,
    ArityMismatch,
    /// A class whose ancestry is cyclic or broken, or a lookup against one.
    UnresolvedClass,
    /// The front end handed over a tree the core cannot interpret.
    MalformedTree,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        Severity::Error
    }

    pub fn name(self) -> &'static str {
        match self {
            DiagnosticKind::DuplicateDeclaration => "DuplicateDeclaration",
            DiagnosticKind::UnknownParentClass => "UnknownParentClass",
            DiagnosticKind::CyclicInheritance => "CyclicInheritance",
            DiagnosticKind::AmbiguousMethodResolution => "AmbiguousMethodResolution",
            DiagnosticKind::UndeclaredIdentifier => "UndeclaredIdentifier",
            DiagnosticKind::TypeMismatch => "TypeMismatch",
            DiagnosticKind::ArityMismatch => "ArityMismatch",
            DiagnosticKind::UnresolvedClass => "UnresolvedClass",
            DiagnosticKind::MalformedTree => "MalformedTree",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single semantic diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilationError {
    #[error("at {span}: duplicate declaration of {what} '{name}' (first declared at {original})")]
    DuplicateDeclaration {
        what: &'static str,
        name: String,
        original: Span,
        span: Span,
    },

    #[error("at {span}: class '{class}' inherits from unknown class '{parent}'")]
    UnknownParentClass {
        class: String,
        parent: String,
        span: Span,
    },

    #[error("at {span}: circular inheritance for '{class}'")]
    CyclicInheritance { class: String, span: Span },

    #[error("at {span}: ambiguous method '{method}' in class '{class}': inherited from {candidates}")]
    AmbiguousMethodResolution {
        class: String,
        method: String,
        candidates: String,
        span: Span,
    },

    #[error("at {span}: undeclared identifier '{name}'")]
    UndeclaredIdentifier { name: String, span: Span },

    #[error("at {span}: unknown type '{name}'")]
    UnknownType { name: String, span: Span },

    #[error("at {span}: unknown method '{method}' on type '{type_name}'")]
    UnknownMethod {
        method: String,
        type_name: String,
        span: Span,
    },

    #[error("at {span}: {message}")]
    TypeMismatch { message: String, span: Span },

    #[error("at {span}: '{name}' expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
        span: Span,
    },

    #[error("at {span}: class '{class}' has an unresolved inheritance chain")]
    UnresolvedClass { class: String, span: Span },

    #[error("at {span}: malformed syntax tree: {message}")]
    MalformedTree { message: String, span: Span },
}

impl CompilationError {
    /// The taxonomy entry this diagnostic belongs to.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            CompilationError::DuplicateDeclaration { .. } => DiagnosticKind::DuplicateDeclaration,
            CompilationError::UnknownParentClass { .. } => DiagnosticKind::UnknownParentClass,
            CompilationError::CyclicInheritance { .. } => DiagnosticKind::CyclicInheritance,
            CompilationError::AmbiguousMethodResolution { .. } => {
                DiagnosticKind::AmbiguousMethodResolution
            }
            CompilationError::UndeclaredIdentifier { .. }
            | CompilationError::UnknownType { .. }
            | CompilationError::UnknownMethod { .. } => DiagnosticKind::UndeclaredIdentifier,
            CompilationError::TypeMismatch { .. } => DiagnosticKind::TypeMismatch,
            CompilationError::ArityMismatch { .. } => DiagnosticKind::ArityMismatch,
            CompilationError::UnresolvedClass { .. } => DiagnosticKind::UnresolvedClass,
            CompilationError::MalformedTree { .. } => DiagnosticKind::MalformedTree,
        }
    }

    /// Source position of the diagnostic.
    pub fn span(&self) -> Span {
        match self {
            CompilationError::DuplicateDeclaration { span, .. }
            | CompilationError::UnknownParentClass { span, .. }
            | CompilationError::CyclicInheritance { span, .. }
            | CompilationError::AmbiguousMethodResolution { span, .. }
            | CompilationError::UndeclaredIdentifier { span, .. }
            | CompilationError::UnknownType { span, .. }
            | CompilationError::UnknownMethod { span, .. }
            | CompilationError::TypeMismatch { span, .. }
            | CompilationError::ArityMismatch { span, .. }
            | CompilationError::UnresolvedClass { span, .. }
            | CompilationError::MalformedTree { span, .. } => *span,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind().severity()
    }

    /// Shorthand for a `TypeMismatch` with a formatted message.
    pub fn type_mismatch(message: impl Into<String>, span: Span) -> Self {
        CompilationError::TypeMismatch {
            message: message.into(),
            span,
        }
    }
}
