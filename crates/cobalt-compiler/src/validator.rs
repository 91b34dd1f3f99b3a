//! Semantic validation rules.
//!
//! The validator reads the completed symbol table and answers one question
//! per call: does this reference resolve, is this assignment compatible,
//! does this call have the right arity. It never mutates the table and never
//! walks the tree; the translation pass calls it at every construct and
//! records the errors it returns.

use cobalt_core::{ClassId, CompilationError, MethodId, Span, TypeDescriptor, VariableId};
use cobalt_registry::SymbolTable;
use cobalt_syntax::BinaryOp;
use rustc_hash::FxHashSet;

use crate::scope::LocalScope;

type Result<T> = std::result::Result<T, CompilationError>;

/// Outcome of resolving a method name against a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodLookup {
    Found(MethodId),
    /// The name is ambiguous in the class; already reported at the class.
    Ambiguous,
}

pub struct Validator<'t> {
    table: &'t SymbolTable,
}

impl<'t> Validator<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }

    // ==========================================================================
    // Name resolution
    // ==========================================================================

    /// Resolve a bare identifier: visible locals and parameters innermost
    /// first, then the flattened fields of `class`.
    pub fn resolve_variable(
        &self,
        scope: &LocalScope<'_>,
        class: ClassId,
        name: &str,
        span: Span,
    ) -> Result<VariableId> {
        if let Some(id) = scope.lookup(name) {
            return Ok(id);
        }
        if let Some(id) = self.table.find_field(class, name) {
            return Ok(id);
        }
        let symbol = self.table.class(class);
        if symbol.state.is_broken() {
            return Err(CompilationError::UnresolvedClass {
                class: symbol.name.clone(),
                span,
            });
        }
        Err(CompilationError::UndeclaredIdentifier {
            name: name.to_string(),
            span,
        })
    }

    /// Resolve a method through the flattened member table of `class`.
    pub fn resolve_method(&self, class: ClassId, name: &str, span: Span) -> Result<MethodLookup> {
        if let Some(id) = self.table.find_method(class, name) {
            return Ok(MethodLookup::Found(id));
        }
        let symbol = self.table.class(class);
        if symbol.members.ambiguous.contains(name) {
            return Ok(MethodLookup::Ambiguous);
        }
        if symbol.state.is_broken() {
            return Err(CompilationError::UnresolvedClass {
                class: symbol.name.clone(),
                span,
            });
        }
        Err(CompilationError::UnknownMethod {
            method: name.to_string(),
            type_name: symbol.name.clone(),
            span,
        })
    }

    // ==========================================================================
    // Type rules
    // ==========================================================================

    /// A value of type `source` may be stored where `target` is expected.
    pub fn check_assignable(
        &self,
        source: TypeDescriptor,
        target: TypeDescriptor,
        context: &str,
        span: Span,
    ) -> Result<()> {
        if self.table.is_compatible(source, target) {
            return Ok(());
        }
        Err(CompilationError::type_mismatch(
            format!(
                "{context}: expected '{}', found '{}'",
                self.table.type_name(target),
                self.table.type_name(source)
            ),
            span,
        ))
    }

    /// Reject the `void` sentinel where a value is required.
    pub fn check_value(&self, ty: TypeDescriptor, span: Span) -> Result<()> {
        if ty.is_void() {
            return Err(CompilationError::type_mismatch(
                "void value used where a value is required",
                span,
            ));
        }
        Ok(())
    }

    /// Integer literals are emitted as C `int` constants.
    pub fn check_int_literal(&self, value: i64, span: Span) -> Result<()> {
        if i32::try_from(value).is_ok() {
            return Ok(());
        }
        Err(CompilationError::type_mismatch(
            format!("integer literal {value} does not fit in 'int'"),
            span,
        ))
    }

    pub fn check_condition(&self, ty: TypeDescriptor, span: Span) -> Result<()> {
        if ty.is_int() {
            return Ok(());
        }
        Err(CompilationError::type_mismatch(
            format!("condition must be 'int', found '{}'", self.table.type_name(ty)),
            span,
        ))
    }

    pub fn check_operand(&self, op: BinaryOp, ty: TypeDescriptor, span: Span) -> Result<()> {
        if ty.is_int() {
            return Ok(());
        }
        Err(CompilationError::type_mismatch(
            format!(
                "operator '{op}' expects 'int' operands, found '{}'",
                self.table.type_name(ty)
            ),
            span,
        ))
    }

    pub fn check_arity(&self, method: MethodId, got: usize, span: Span) -> Result<()> {
        let symbol = self.table.method(method);
        if symbol.arity() == got {
            return Ok(());
        }
        Err(CompilationError::ArityMismatch {
            name: self.qualified_name(method),
            expected: symbol.arity(),
            got,
            span,
        })
    }

    /// `return;` in `method`.
    pub fn check_bare_return(&self, method: MethodId, span: Span) -> Result<()> {
        let symbol = self.table.method(method);
        match symbol.return_type {
            Some(ty) if !ty.is_void() => Err(CompilationError::type_mismatch(
                format!(
                    "'{}' must return a value of type '{}'",
                    self.qualified_name(method),
                    self.table.type_name(ty)
                ),
                span,
            )),
            _ => Ok(()),
        }
    }

    /// `return <value>;` in `method`.
    pub fn check_value_return(
        &self,
        method: MethodId,
        value: TypeDescriptor,
        span: Span,
    ) -> Result<()> {
        let Some(expected) = self.table.method(method).return_type else {
            return Ok(());
        };
        if expected.is_void() {
            return Err(CompilationError::type_mismatch(
                format!("'{}' returns void but a value was returned", self.qualified_name(method)),
                span,
            ));
        }
        self.check_value(value, span)?;
        self.check_assignable(value, expected, "return value", span)
    }

    /// `Class.method`
    pub fn qualified_name(&self, method: MethodId) -> String {
        let symbol = self.table.method(method);
        format!("{}.{}", self.table.class(symbol.owner).name, symbol.name)
    }

    // ==========================================================================
    // Layout
    // ==========================================================================

    /// Order in which struct definitions must appear: every class after
    /// the parents embedded in it, otherwise in source order.
    ///
    /// Class-typed fields are pointers and impose no order. A class reached
    /// again while its own parents are being placed is on an inheritance
    /// cycle; it is placed once and the cycle is left to the resolver's
    /// diagnostics.
    pub fn struct_order(&self) -> Vec<ClassId> {
        let mut order = Vec::with_capacity(self.table.class_count());
        let mut seen = FxHashSet::default();
        for class in self.table.class_ids() {
            self.visit_layout(class, &mut seen, &mut order);
        }
        order
    }

    fn visit_layout(&self, class: ClassId, seen: &mut FxHashSet<ClassId>, order: &mut Vec<ClassId>) {
        if !seen.insert(class) {
            return;
        }
        for parent in &self.table.class(class).resolved_parents {
            self.visit_layout(*parent, seen, order);
        }
        order.push(class);
    }
}
