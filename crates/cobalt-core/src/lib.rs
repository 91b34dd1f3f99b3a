//! Cobalt core crate.
//!
//! Shared vocabulary for every compiler pass:
//! - [`Span`] source positions
//! - symbol ids handed out by the symbol table
//! - [`TypeDescriptor`] for primitive and class types
//! - [`CompilationError`] and the [`Diagnostics`] reporter

mod diagnostics;
mod error;
mod ids;
mod span;
mod type_descriptor;

pub use diagnostics::Diagnostics;
pub use error::{CompilationError, DiagnosticKind, Severity};
pub use ids::{ClassId, MethodId, ScopeId, VariableId};
pub use span::Span;
pub use type_descriptor::{PrimitiveKind, TypeDescriptor};
