//! Inheritance resolution (pass 2).
//!
//! Runs once every class is registered, so parents declared after their
//! children resolve. In order:
//!
//! 1. resolve written type names of variables and return types
//! 2. resolve parent names, marking classes with an unknown parent
//! 3. find inheritance cycles in the [`InheritanceGraph`]
//! 4. mark classes whose ancestry contains a broken class as unresolved
//! 5. linearize every intact class: itself, then each parent's
//!    linearization left to right, keeping only the first occurrence
//! 6. flatten members along the linearization
//!
//! Broken classes keep only their own members so that later lookups report
//! `UnresolvedClass` instead of failing.

use cobalt_core::{ClassId, CompilationError, Diagnostics, MethodId};
use cobalt_registry::{InheritanceGraph, MemberTable, ResolutionState, SymbolTable};
use rustc_hash::FxHashSet;

/// Output of the resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionOutput {
    /// Classes linearized and flattened.
    pub resolved: usize,
    /// Classes with a missing parent, on a cycle, or below one of those.
    pub broken: usize,
    /// Ambiguous method names over all classes.
    pub ambiguous: usize,
}

pub struct InheritanceResolver<'t, 'd> {
    table: &'t mut SymbolTable,
    diagnostics: &'d mut Diagnostics,
}

impl<'t, 'd> InheritanceResolver<'t, 'd> {
    pub fn new(table: &'t mut SymbolTable, diagnostics: &'d mut Diagnostics) -> Self {
        Self { table, diagnostics }
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self) -> ResolutionOutput {
        self.resolve_types();
        self.resolve_parents();

        let graph = InheritanceGraph::new(self.table);
        self.mark_cycles(&graph);
        self.mark_unresolved(&graph);

        for class in self.table.class_ids() {
            self.linearize(class);
        }
        let mut done = FxHashSet::default();
        for class in self.table.class_ids() {
            self.flatten(class, &graph, &mut done);
        }

        let broken = self.table.classes().filter(|c| c.state.is_broken()).count();
        let output = ResolutionOutput {
            resolved: self.table.class_count() - broken,
            broken,
            ambiguous: self.table.classes().map(|c| c.members.ambiguous.len()).sum(),
        };
        tracing::debug!(
            resolved = output.resolved,
            broken = output.broken,
            ambiguous = output.ambiguous,
            "inheritance resolved"
        );
        output
    }

    // ==========================================================================
    // Types and parents
    // ==========================================================================

    fn resolve_types(&mut self) {
        for id in self.table.variable_ids() {
            let var = self.table.variable(id);
            if var.ty.is_some() {
                continue;
            }
            let Some(type_name) = &var.type_name else {
                continue;
            };
            match self.table.resolve_type(&type_name.name) {
                Some(ty) if ty.is_void() => {
                    let error = CompilationError::type_mismatch(
                        format!("'{}' cannot have type 'void'", var.name),
                        type_name.span,
                    );
                    self.diagnostics.report(error);
                }
                Some(ty) => self.table.variable_mut(id).ty = Some(ty),
                None => {
                    let error = CompilationError::UnknownType {
                        name: type_name.name.clone(),
                        span: type_name.span,
                    };
                    self.diagnostics.report(error);
                }
            }
        }

        for id in self.table.method_ids() {
            let Some(type_name) = &self.table.method(id).return_type_name else {
                continue;
            };
            match self.table.resolve_type(&type_name.name) {
                Some(ty) => self.table.method_mut(id).return_type = Some(ty),
                None => {
                    let error = CompilationError::UnknownType {
                        name: type_name.name.clone(),
                        span: type_name.span,
                    };
                    self.diagnostics.report(error);
                }
            }
        }
    }

    fn resolve_parents(&mut self) {
        for class in self.table.class_ids() {
            let symbol = self.table.class(class);
            let mut resolved = Vec::with_capacity(symbol.parents.len());
            let mut missing = false;
            for parent in &symbol.parents {
                match self.table.lookup_class(&parent.name) {
                    Some(id) if !resolved.contains(&id) => resolved.push(id),
                    Some(_) => {}
                    None => {
                        missing = true;
                        self.diagnostics.report(CompilationError::UnknownParentClass {
                            class: symbol.name.clone(),
                            parent: parent.name.clone(),
                            span: parent.span,
                        });
                    }
                }
            }

            let symbol = self.table.class_mut(class);
            symbol.resolved_parents = resolved;
            if missing {
                symbol.state = ResolutionState::MissingParent;
            }
        }
    }

    fn mark_cycles(&mut self, graph: &InheritanceGraph) {
        let mut on_cycle: Vec<ClassId> = graph.cycles().into_iter().flatten().collect();
        on_cycle.sort();
        for class in on_cycle {
            let symbol = self.table.class_mut(class);
            symbol.state = ResolutionState::Cyclic;
            let error = CompilationError::CyclicInheritance {
                class: symbol.name.clone(),
                span: symbol.span,
            };
            self.diagnostics.report(error);
        }
    }

    /// A class inheriting, directly or not, from a broken class cannot be
    /// linearized either.
    fn mark_unresolved(&mut self, graph: &InheritanceGraph) {
        for class in self.table.class_ids() {
            if self.table.class(class).state.is_broken() {
                continue;
            }
            let tainted = graph
                .ancestors(class)
                .into_iter()
                .any(|ancestor| self.table.class(ancestor).state.is_broken());
            if tainted {
                let symbol = self.table.class_mut(class);
                symbol.state = ResolutionState::Unresolved;
                let error = CompilationError::UnresolvedClass {
                    class: symbol.name.clone(),
                    span: symbol.span,
                };
                self.diagnostics.report(error);
            }
        }
    }

    // ==========================================================================
    // Linearization
    // ==========================================================================

    /// Compute and store the linearization of `class`, parents first.
    ///
    /// Intact classes only have intact, acyclic ancestors, so the recursion
    /// terminates.
    fn linearize(&mut self, class: ClassId) -> Vec<ClassId> {
        let symbol = self.table.class(class);
        if !symbol.linearization.is_empty() {
            return symbol.linearization.clone();
        }
        if symbol.state.is_broken() {
            self.table.class_mut(class).linearization = vec![class];
            return vec![class];
        }

        let parents = symbol.resolved_parents.clone();
        let mut order = vec![class];
        for parent in parents {
            for ancestor in self.linearize(parent) {
                if !order.contains(&ancestor) {
                    order.push(ancestor);
                }
            }
        }

        let names: Vec<&str> = order.iter().map(|c| self.table.class(*c).name.as_str()).collect();
        tracing::trace!(class = names[0], linearization = ?names, "linearized");
        let symbol = self.table.class_mut(class);
        symbol.linearization = order.clone();
        symbol.state = ResolutionState::Resolved;
        order
    }

    // ==========================================================================
    // Flattening
    // ==========================================================================

    fn flatten(&mut self, class: ClassId, graph: &InheritanceGraph, done: &mut FxHashSet<ClassId>) {
        if !done.insert(class) {
            return;
        }

        let symbol = self.table.class(class);
        if symbol.state.is_broken() {
            let members = self.own_members(class);
            self.table.class_mut(class).members = members;
            return;
        }
        for parent in symbol.resolved_parents.clone() {
            self.flatten(parent, graph, done);
        }

        let mut members = MemberTable::default();
        let linearization = self.table.linearization(class).to_vec();

        for name in self.member_names(&linearization, |table, c| {
            table.class(c).methods.iter().map(|m| table.method(*m).name.clone()).collect()
        }) {
            if let Some(own) = self.table.declared_method(class, &name) {
                members.methods.insert(name, own);
                continue;
            }
            let candidates = self.maximal(graph, &linearization, |table, c| table.declared_method(c, &name));
            match self.pick_method(&candidates) {
                Some(method) => {
                    members.methods.insert(name, method);
                }
                None => {
                    self.report_ambiguity(class, &name, &candidates);
                    members.ambiguous.insert(name);
                }
            }
        }

        for name in self.member_names(&linearization, |table, c| {
            table.class(c).fields.iter().map(|f| table.variable(*f).name.clone()).collect()
        }) {
            let field = match self.table.declared_field(class, &name) {
                Some(own) => Some(own),
                None => self
                    .maximal(graph, &linearization, |table, c| table.declared_field(c, &name))
                    .first()
                    .map(|(_, field)| *field),
            };
            if let Some(field) = field {
                members.fields.insert(name, field);
            }
        }

        self.table.class_mut(class).members = members;
    }

    fn own_members(&self, class: ClassId) -> MemberTable {
        let symbol = self.table.class(class);
        let mut members = MemberTable::default();
        for method in &symbol.methods {
            members
                .methods
                .insert(self.table.method(*method).name.clone(), *method);
        }
        for field in &symbol.fields {
            members
                .fields
                .insert(self.table.variable(*field).name.clone(), *field);
        }
        members
    }

    /// Distinct member names declared along `linearization`, in order.
    fn member_names(
        &self,
        linearization: &[ClassId],
        declared: impl Fn(&SymbolTable, ClassId) -> Vec<String>,
    ) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut names = Vec::new();
        for class in linearization {
            for name in declared(self.table, *class) {
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Ancestors declaring a member that no other declaring ancestor
    /// overrides, in linearization order.
    fn maximal<T: Copy>(
        &self,
        graph: &InheritanceGraph,
        linearization: &[ClassId],
        declared: impl Fn(&SymbolTable, ClassId) -> Option<T>,
    ) -> Vec<(ClassId, T)> {
        let candidates: Vec<(ClassId, T)> = linearization
            .iter()
            .skip(1)
            .filter_map(|c| declared(self.table, *c).map(|member| (*c, member)))
            .collect();
        candidates
            .iter()
            .filter(|(x, _)| {
                !candidates
                    .iter()
                    .any(|(y, _)| graph.is_subclass_of(*y, *x))
            })
            .copied()
            .collect()
    }

    /// The first candidate, unless unrelated candidates disagree on the
    /// signature.
    fn pick_method(&self, candidates: &[(ClassId, MethodId)]) -> Option<MethodId> {
        let (_, first) = *candidates.first()?;
        candidates
            .iter()
            .all(|(_, other)| self.table.same_signature(first, *other))
            .then_some(first)
    }

    fn report_ambiguity(&mut self, class: ClassId, name: &str, candidates: &[(ClassId, MethodId)]) {
        let symbol = self.table.class(class);
        let inherited = symbol
            .resolved_parents
            .iter()
            .any(|parent| self.table.class(*parent).members.ambiguous.contains(name));
        if inherited {
            return;
        }
        let candidates = candidates
            .iter()
            .map(|(owner, _)| format!("{}.{}", self.table.class(*owner).name, name))
            .collect::<Vec<_>>()
            .join(", ");
        let error = CompilationError::AmbiguousMethodResolution {
            class: symbol.name.clone(),
            method: name.to_string(),
            candidates,
            span: symbol.span,
        };
        self.diagnostics.report(error);
    }
}
