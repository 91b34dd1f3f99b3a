//! Cobalt registry crate.
//!
//! Storage for everything the compiler learns about a program:
//! - [`SymbolTable`]: arenas of classes, methods, variables and scopes
//! - [`Scope`]: the lexical scope tree, owned top-down, looked up bottom-up
//! - [`InheritanceGraph`]: class → parent edges for cycle and ancestry queries
//!
//! The registry stores and looks up; the passes in `cobalt-compiler` decide
//! what goes in.

mod hierarchy;
mod scope;
mod symbols;
mod table;

pub use hierarchy::InheritanceGraph;
pub use scope::{Scope, ScopeKind};
pub use symbols::{
    CONSTRUCTOR_NAME, ClassSymbol, MemberTable, MethodSymbol, ResolutionState, TypeName,
    VariableKind, VariableSymbol,
};
pub use table::SymbolTable;
