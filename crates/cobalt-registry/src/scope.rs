//! The lexical scope tree.
//!
//! Scopes are owned top-down by the [`SymbolTable`](crate::SymbolTable) arena
//! and refer to their parent by id, so lookups walk bottom-up:
//!
//! ```text
//! Program
//! └── Class A            fields
//!     └── Method A.m     receiver, parameters, top-level locals
//!         ├── Block      if-branch
//!         │   └── Block  nested while-body
//!         └── Block      else-branch
//! ```

use cobalt_core::{ClassId, ScopeId, VariableId};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Program,
    Class,
    Method,
    Block,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Class this scope belongs to, `None` for the program scope.
    pub class: Option<ClassId>,
    /// Child scopes in the order they were opened.
    pub children: Vec<ScopeId>,
    variables: Vec<VariableId>,
    names: FxHashMap<String, VariableId>,
}

impl Scope {
    pub fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>, class: Option<ClassId>) -> Self {
        Self {
            id,
            kind,
            parent,
            class,
            children: Vec::new(),
            variables: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    /// Look up a variable declared directly in this scope.
    pub fn lookup(&self, name: &str) -> Option<VariableId> {
        self.names.get(name).copied()
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    /// Add a variable. Returns the existing id if the name is taken.
    pub(crate) fn insert(&mut self, name: &str, id: VariableId) -> Result<(), VariableId> {
        if let Some(existing) = self.names.get(name) {
            return Err(*existing);
        }
        self.names.insert(name.to_string(), id);
        self.variables.push(id);
        Ok(())
    }
}
