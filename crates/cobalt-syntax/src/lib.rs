//! Cobalt syntax tree crate.
//!
//! The compiler never tokenizes or parses source text. A front end hands it
//! an already-parsed tree built from the node types in this crate:
//! - [`decl`]: program, classes, fields, methods
//! - [`stmt`]: blocks and statements
//! - [`expr`]: expressions
//! - [`node`]: the closed [`NodeKind`] tag set and uniform [`NodeRef`] traversal
//! - [`builder`]: [`TreeBuilder`] for front ends and tests
//!
//! All nodes borrow from a `bumpalo` arena and are `Copy`.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use cobalt_syntax::{TreeBuilder, count_nodes};
//!
//! let arena = Bump::new();
//! let b = TreeBuilder::new(&arena);
//!
//! // class A: def m(self): int { return 1; }
//! let program = b.program(&[b.class(
//!     "A",
//!     &[],
//!     &[b.method("m", &[b.receiver("self")], Some("int"), &[b.ret(Some(b.int(1)))])],
//! )]);
//!
//! assert_eq!(program.classes.len(), 1);
//! assert_eq!(count_nodes(&program), 4);
//! ```

pub mod builder;
pub mod decl;
pub mod expr;
pub mod node;
pub mod stmt;

pub use builder::TreeBuilder;
pub use decl::*;
pub use expr::*;
pub use node::*;
pub use stmt::*;
