//! Cobalt Compiler
//!
//! Semantic passes and C99 emission for a class-based language with
//! multiple inheritance.
//!
//! ## Architecture
//!
//! - **Pass 1 (Collection)**: register classes, members and the scope tree
//! - **Pass 2 (Resolution)**: resolve types and parents, linearize classes, flatten members
//! - **Pass 3 (Translation)**: type check method bodies and emit C in one walk
//!
//! ## Modules
//!
//! - [`emit`]: line buffer and C naming rules
//! - [`expr`]: expression compiler
//! - [`options`]: [`CompilerOptions`]
//! - [`passes`]: the three passes
//! - [`pipeline`]: stage machine and the [`compile`] entry points
//! - [`scope`]: block-scope visibility while a body is translated
//! - [`stmt`]: statement compiler
//! - [`validator`]: name resolution and type rules

pub mod emit;
pub mod expr;
mod expr_info;
pub mod options;
pub mod passes;
pub mod pipeline;
pub mod scope;
pub mod stmt;
pub mod validator;

pub use emit::SourceWriter;
pub use expr::ExprCompiler;
pub use expr_info::ExprInfo;
pub use options::CompilerOptions;
pub use passes::{
    CollectionOutput, InheritanceResolver, ResolutionOutput, SymbolCollector, TranslationOutput,
    Translator,
};
pub use pipeline::{Compilation, CompilationResult, GeneratedSource, Stage, compile, compile_with};
pub use scope::LocalScope;
pub use stmt::StmtCompiler;
pub use validator::{MethodLookup, Validator};

// Re-export the diagnostic types from core for convenience
pub use cobalt_core::{CompilationError, DiagnosticKind, Diagnostics};
