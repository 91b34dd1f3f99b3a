//! Symbol records for classes, methods and variables.
//!
//! Symbols are created by the collection pass, completed by inheritance
//! resolution and read-only afterwards. Cross references between them are ids
//! into the owning [`SymbolTable`](crate::SymbolTable), never pointers.

use cobalt_core::{ClassId, MethodId, ScopeId, Span, TypeDescriptor, VariableId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Reserved name of the constructor method.
pub const CONSTRUCTOR_NAME: &str = "__init__";

/// A type name as written in the source, kept until resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub name: String,
    pub span: Span,
}

impl TypeName {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ============================================================================
// Variables
// ============================================================================

/// Where a variable lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Class-level field.
    Field,
    /// Explicit method parameter.
    Parameter,
    /// The implicit first parameter of every method.
    Receiver,
    /// Method or block local.
    Local,
}

#[derive(Debug, Clone)]
pub struct VariableSymbol {
    pub id: VariableId,
    pub name: String,
    /// Declared type; `None` only for the receiver, whose type is its class.
    pub type_name: Option<TypeName>,
    /// Resolved type. `None` until resolution, or if the type was unknown.
    pub ty: Option<TypeDescriptor>,
    pub scope: ScopeId,
    pub kind: VariableKind,
    pub span: Span,
}

impl VariableSymbol {
    pub fn is_field(&self) -> bool {
        self.kind == VariableKind::Field
    }
}

// ============================================================================
// Methods
// ============================================================================

#[derive(Debug, Clone)]
pub struct MethodSymbol {
    pub id: MethodId,
    pub owner: ClassId,
    pub name: String,
    /// Parameters in order. The first entry is the receiver.
    pub params: Vec<VariableId>,
    /// Declared return type; `None` means `void`.
    pub return_type_name: Option<TypeName>,
    /// Resolved return type, `None` if the written type was unknown.
    pub return_type: Option<TypeDescriptor>,
    pub is_constructor: bool,
    /// Scope holding the parameters and the top-level locals of the body.
    pub scope: ScopeId,
    /// Position of the declaration among its class's members.
    pub decl_index: usize,
    pub span: Span,
}

impl MethodSymbol {
    /// Parameters excluding the receiver.
    pub fn explicit_params(&self) -> &[VariableId] {
        self.params.get(1..).unwrap_or(&[])
    }

    /// Number of arguments a call must pass.
    pub fn arity(&self) -> usize {
        self.explicit_params().len()
    }

    pub fn receiver(&self) -> Option<VariableId> {
        self.params.first().copied()
    }
}

// ============================================================================
// Classes
// ============================================================================

/// Inheritance resolution state of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionState {
    /// Registered, not yet resolved.
    #[default]
    Pending,
    /// Linearized and flattened.
    Resolved,
    /// At least one declared parent does not exist.
    MissingParent,
    /// The class is on an inheritance cycle.
    Cyclic,
    /// An ancestor is missing a parent or cyclic.
    Unresolved,
}

impl ResolutionState {
    /// Whether the class's ancestry could not be resolved.
    pub fn is_broken(self) -> bool {
        matches!(
            self,
            ResolutionState::MissingParent | ResolutionState::Cyclic | ResolutionState::Unresolved
        )
    }
}

/// Flattened member table of a class after inheritance is compiled away.
#[derive(Debug, Clone, Default)]
pub struct MemberTable {
    /// Method name to the method that resolves it.
    pub methods: FxHashMap<String, MethodId>,
    /// Field name to the field that resolves it.
    pub fields: FxHashMap<String, VariableId>,
    /// Method names that could not be resolved to one owner.
    pub ambiguous: FxHashSet<String>,
}

#[derive(Debug, Clone)]
pub struct ClassSymbol {
    pub id: ClassId,
    pub name: String,
    /// Parent names as written, in declaration order.
    pub parents: Vec<TypeName>,
    /// Parents that resolved to a class, in declaration order.
    pub resolved_parents: Vec<ClassId>,
    /// Declared methods in source order.
    pub methods: Vec<MethodId>,
    /// Declared fields in source order.
    pub fields: Vec<VariableId>,
    pub scope: ScopeId,
    /// Position of the declaration in the program.
    pub decl_index: usize,
    pub span: Span,
    pub state: ResolutionState,
    /// The class itself followed by its ancestors, most derived first.
    pub linearization: Vec<ClassId>,
    pub members: MemberTable,
}

impl ClassSymbol {
    pub fn is_resolved(&self) -> bool {
        self.state == ResolutionState::Resolved
    }
}
