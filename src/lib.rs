//! Cobalt
//!
//! Semantic back end of a source-to-source compiler from a small class-based
//! language with multiple inheritance to C99. A front end hands over an
//! already-parsed syntax tree; cobalt builds the symbol table, resolves
//! inheritance, validates every method body and emits one C translation unit.
//!
//! # Example
//!
//! ```
//! use cobalt::syntax::TreeBuilder;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let b = TreeBuilder::new(&arena);
//!
//! // class A { def m(self): int { return 1; } }
//! // class B inherits A { def n(self): int { return self.m(); } }
//! let program = b.program(&[
//!     b.class(
//!         "A",
//!         &[],
//!         &[b.method("m", &[b.receiver("self")], Some("int"), &[b.ret(Some(b.int(1)))])],
//!     ),
//!     b.class(
//!         "B",
//!         &["A"],
//!         &[b.method(
//!             "n",
//!             &[b.receiver("self")],
//!             Some("int"),
//!             &[b.ret(Some(b.call(Some(b.self_()), "m", &[])))],
//!         )],
//!     ),
//! ]);
//!
//! let output = cobalt::compile(&program).unwrap();
//! assert!(output.text.contains("struct B {\n    A A_part;\n};"));
//! assert!(output.text.contains("return A_m(&self->A_part);"));
//! ```

pub use cobalt_compiler::{
    Compilation, CompilationError, CompilationResult, CompilerOptions, DiagnosticKind, Diagnostics,
    GeneratedSource, Stage, compile, compile_with,
};
pub use cobalt_core::{Span, TypeDescriptor};

/// Syntax tree handed over by a front end.
pub mod syntax {
    pub use cobalt_syntax::*;
}

/// Symbol table produced by the first two passes.
pub mod registry {
    pub use cobalt_registry::*;
}

/// The individual passes, for callers that drive them one at a time.
pub mod passes {
    pub use cobalt_compiler::passes::*;
}
