//! The program-wide symbol table.
//!
//! `SymbolTable` owns every symbol and scope in arenas indexed by the ids
//! from `cobalt_core`. It is built once by the collection pass, completed by
//! inheritance resolution, and then only read.

use cobalt_core::{
    ClassId, CompilationError, MethodId, PrimitiveKind, ScopeId, Span, TypeDescriptor, VariableId,
};
use rustc_hash::FxHashMap;

use crate::scope::{Scope, ScopeKind};
use crate::symbols::{
    CONSTRUCTOR_NAME, ClassSymbol, MemberTable, MethodSymbol, ResolutionState, TypeName,
    VariableKind, VariableSymbol,
};

const ROOT_SCOPE: ScopeId = ScopeId::new(0);

/// Classes, methods, variables and scopes of one translation unit.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    classes: Vec<ClassSymbol>,
    methods: Vec<MethodSymbol>,
    variables: Vec<VariableSymbol>,
    scopes: Vec<Scope>,
    class_names: FxHashMap<String, ClassId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a table holding only the program scope.
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            methods: Vec::new(),
            variables: Vec::new(),
            scopes: vec![Scope::new(ROOT_SCOPE, ScopeKind::Program, None, None)],
            class_names: FxHashMap::default(),
        }
    }

    pub fn root_scope(&self) -> ScopeId {
        ROOT_SCOPE
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a class. Parent names are kept verbatim until resolution.
    pub fn register_class(
        &mut self,
        name: &str,
        parents: Vec<TypeName>,
        decl_index: usize,
        span: Span,
    ) -> Result<ClassId, CompilationError> {
        if let Some(existing) = self.class_names.get(name) {
            return Err(CompilationError::DuplicateDeclaration {
                what: "class",
                name: name.to_string(),
                original: self.classes[existing.index()].span,
                span,
            });
        }

        let id = ClassId::new(self.classes.len() as u32);
        let scope = self.push_scope(ScopeKind::Class, ROOT_SCOPE, Some(id));
        self.classes.push(ClassSymbol {
            id,
            name: name.to_string(),
            parents,
            resolved_parents: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            scope,
            decl_index,
            span,
            state: ResolutionState::Pending,
            linearization: Vec::new(),
            members: MemberTable::default(),
        });
        self.class_names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Register a method of `owner` and open its scope.
    ///
    /// Fields and methods share one namespace per class.
    pub fn register_method(
        &mut self,
        owner: ClassId,
        name: &str,
        return_type_name: Option<TypeName>,
        decl_index: usize,
        span: Span,
    ) -> Result<MethodId, CompilationError> {
        if let Some(original) = self.member_span(owner, name) {
            return Err(CompilationError::DuplicateDeclaration {
                what: "member",
                name: name.to_string(),
                original,
                span,
            });
        }

        let id = MethodId::new(self.methods.len() as u32);
        let class_scope = self.classes[owner.index()].scope;
        let scope = self.push_scope(ScopeKind::Method, class_scope, Some(owner));
        // A missing return type is `void` and needs no resolution.
        let return_type = match return_type_name {
            Some(_) => None,
            None => Some(TypeDescriptor::VOID),
        };
        self.methods.push(MethodSymbol {
            id,
            owner,
            name: name.to_string(),
            params: Vec::new(),
            return_type_name,
            return_type,
            is_constructor: name == CONSTRUCTOR_NAME,
            scope,
            decl_index,
            span,
        });
        self.classes[owner.index()].methods.push(id);
        Ok(id)
    }

    pub fn declare_field(
        &mut self,
        owner: ClassId,
        name: &str,
        type_name: TypeName,
        span: Span,
    ) -> Result<VariableId, CompilationError> {
        if let Some(original) = self.member_span(owner, name) {
            return Err(CompilationError::DuplicateDeclaration {
                what: "member",
                name: name.to_string(),
                original,
                span,
            });
        }
        let scope = self.classes[owner.index()].scope;
        let id = self.declare_variable(scope, name, Some(type_name), None, VariableKind::Field, span)?;
        self.classes[owner.index()].fields.push(id);
        Ok(id)
    }

    /// Declare the receiver. Its type is the owning class, known immediately.
    pub fn declare_receiver(
        &mut self,
        method: MethodId,
        name: &str,
        span: Span,
    ) -> Result<VariableId, CompilationError> {
        let symbol = &self.methods[method.index()];
        let (scope, owner) = (symbol.scope, symbol.owner);
        let id = self.declare_variable(
            scope,
            name,
            None,
            Some(TypeDescriptor::Class(owner)),
            VariableKind::Receiver,
            span,
        )?;
        self.methods[method.index()].params.push(id);
        Ok(id)
    }

    pub fn declare_parameter(
        &mut self,
        method: MethodId,
        name: &str,
        type_name: TypeName,
        span: Span,
    ) -> Result<VariableId, CompilationError> {
        let scope = self.methods[method.index()].scope;
        let id = self.declare_variable(
            scope,
            name,
            Some(type_name),
            None,
            VariableKind::Parameter,
            span,
        )?;
        self.methods[method.index()].params.push(id);
        Ok(id)
    }

    pub fn declare_local(
        &mut self,
        scope: ScopeId,
        name: &str,
        type_name: TypeName,
        span: Span,
    ) -> Result<VariableId, CompilationError> {
        self.declare_variable(scope, name, Some(type_name), None, VariableKind::Local, span)
    }

    /// Open a block scope nested in `parent`.
    pub fn open_block(&mut self, parent: ScopeId) -> ScopeId {
        let class = self.scopes[parent.index()].class;
        self.push_scope(ScopeKind::Block, parent, class)
    }

    fn push_scope(&mut self, kind: ScopeKind, parent: ScopeId, class: Option<ClassId>) -> ScopeId {
        let id = ScopeId::new(self.scopes.len() as u32);
        self.scopes.push(Scope::new(id, kind, Some(parent), class));
        self.scopes[parent.index()].children.push(id);
        id
    }

    fn declare_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        type_name: Option<TypeName>,
        ty: Option<TypeDescriptor>,
        kind: VariableKind,
        span: Span,
    ) -> Result<VariableId, CompilationError> {
        let id = VariableId::new(self.variables.len() as u32);
        if let Err(existing) = self.scopes[scope.index()].insert(name, id) {
            return Err(CompilationError::DuplicateDeclaration {
                what: match kind {
                    VariableKind::Field => "field",
                    VariableKind::Parameter | VariableKind::Receiver => "parameter",
                    VariableKind::Local => "variable",
                },
                name: name.to_string(),
                original: self.variables[existing.index()].span,
                span,
            });
        }
        self.variables.push(VariableSymbol {
            id,
            name: name.to_string(),
            type_name,
            ty,
            scope,
            kind,
            span,
        });
        Ok(id)
    }

    /// Span of the field or method named `name` declared directly in `class`.
    fn member_span(&self, class: ClassId, name: &str) -> Option<Span> {
        if let Some(field) = self.declared_field(class, name) {
            return Some(self.variables[field.index()].span);
        }
        self.declared_method(class, name)
            .map(|method| self.methods[method.index()].span)
    }

    // ==========================================================================
    // Access
    // ==========================================================================

    pub fn class(&self, id: ClassId) -> &ClassSymbol {
        &self.classes[id.index()]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut ClassSymbol {
        &mut self.classes[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodSymbol {
        &self.methods[id.index()]
    }

    pub fn method_mut(&mut self, id: MethodId) -> &mut MethodSymbol {
        &mut self.methods[id.index()]
    }

    pub fn variable(&self, id: VariableId) -> &VariableSymbol {
        &self.variables[id.index()]
    }

    pub fn variable_mut(&mut self, id: VariableId) -> &mut VariableSymbol {
        &mut self.variables[id.index()]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// Classes in registration order, which is source order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassSymbol> {
        self.classes.iter()
    }

    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + use<> {
        (0..self.classes.len() as u32).map(ClassId::new)
    }

    pub fn method_ids(&self) -> impl Iterator<Item = MethodId> + use<> {
        (0..self.methods.len() as u32).map(MethodId::new)
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VariableId> + use<> {
        (0..self.variables.len() as u32).map(VariableId::new)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// A method declared directly in `class`, ignoring inheritance.
    pub fn declared_method(&self, class: ClassId, name: &str) -> Option<MethodId> {
        self.classes[class.index()]
            .methods
            .iter()
            .copied()
            .find(|m| self.methods[m.index()].name == name)
    }

    /// A field declared directly in `class`, ignoring inheritance.
    pub fn declared_field(&self, class: ClassId, name: &str) -> Option<VariableId> {
        self.scopes[self.classes[class.index()].scope.index()].lookup(name)
    }

    /// Resolve a method through the flattened member table.
    pub fn find_method(&self, class: ClassId, name: &str) -> Option<MethodId> {
        self.classes[class.index()].members.methods.get(name).copied()
    }

    /// Resolve a field through the flattened member table.
    pub fn find_field(&self, class: ClassId, name: &str) -> Option<VariableId> {
        self.classes[class.index()].members.fields.get(name).copied()
    }

    /// Look up a variable declared directly in `scope`.
    pub fn lookup_in_scope(&self, scope: ScopeId, name: &str) -> Option<VariableId> {
        self.scopes[scope.index()].lookup(name)
    }

    /// The class followed by its ancestors, most derived first.
    pub fn linearization(&self, class: ClassId) -> &[ClassId] {
        &self.classes[class.index()].linearization
    }

    /// The class that declares `field`, or `None` if it is not a field.
    pub fn field_owner(&self, field: VariableId) -> Option<ClassId> {
        let var = &self.variables[field.index()];
        if var.kind != VariableKind::Field {
            return None;
        }
        self.scopes[var.scope.index()].class
    }

    /// Direct-parent steps leading from `class` to its ancestor `ancestor`.
    ///
    /// Each step takes the first declared parent whose linearization
    /// contains `ancestor`, which is the path the linearization itself
    /// followed. Empty when both are the same class, `None` when `ancestor`
    /// is not an ancestor.
    pub fn base_path(&self, class: ClassId, ancestor: ClassId) -> Option<Vec<ClassId>> {
        let mut path = Vec::new();
        let mut current = class;
        while current != ancestor {
            let next = self.classes[current.index()]
                .resolved_parents
                .iter()
                .copied()
                .find(|parent| self.linearization(*parent).contains(&ancestor))?;
            path.push(next);
            current = next;
        }
        Some(path)
    }

    /// Whether a value of type `source` may be stored where `target` is expected.
    ///
    /// Identical types are compatible; a class is compatible with every class
    /// in its linearization.
    pub fn is_compatible(&self, source: TypeDescriptor, target: TypeDescriptor) -> bool {
        if source == target {
            return true;
        }
        match (source, target) {
            (TypeDescriptor::Class(from), TypeDescriptor::Class(to)) => {
                self.linearization(from).contains(&to)
            }
            _ => false,
        }
    }

    /// Whether two methods take the same explicit parameter types and
    /// return the same type.
    pub fn same_signature(&self, a: MethodId, b: MethodId) -> bool {
        let (a, b) = (self.method(a), self.method(b));
        a.return_type == b.return_type
            && a.arity() == b.arity()
            && a.explicit_params()
                .iter()
                .zip(b.explicit_params())
                .all(|(x, y)| self.variable(*x).ty == self.variable(*y).ty)
    }

    /// Source spelling of a type.
    pub fn type_name(&self, ty: TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Primitive(kind) => kind.name().to_string(),
            TypeDescriptor::Class(id) => self.classes[id.index()].name.clone(),
        }
    }

    /// Resolve a written type name to a descriptor.
    pub fn resolve_type(&self, name: &str) -> Option<TypeDescriptor> {
        PrimitiveKind::from_name(name)
            .map(TypeDescriptor::Primitive)
            .or_else(|| self.lookup_class(name).map(TypeDescriptor::Class))
    }
}
