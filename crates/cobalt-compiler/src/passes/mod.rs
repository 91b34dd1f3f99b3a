//! The three compiler passes, run in order by the pipeline.
//!
//! - [`SymbolCollector`]: registers every declaration and the scope tree
//! - [`InheritanceResolver`]: linearizes classes and flattens their members
//! - [`Translator`]: validates method bodies and emits C

pub mod collection;
pub mod resolution;
pub mod translation;

pub use collection::{CollectionOutput, SymbolCollector};
pub use resolution::{InheritanceResolver, ResolutionOutput};
pub use translation::{TranslationOutput, Translator};
