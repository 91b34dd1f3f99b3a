//! Local scope tracking for method body translation.
//!
//! The collection pass already registered every local in the scope tree.
//! `LocalScope` replays that tree while the body is translated: it walks into
//! block scopes in the order they were opened and tracks which variables have
//! been declared so far, so a local is only visible after its declaration.

use cobalt_core::{CompilationError, MethodId, ScopeId, Span, VariableId};
use cobalt_registry::SymbolTable;
use rustc_hash::FxHashSet;

type Result<T> = std::result::Result<T, CompilationError>;

#[derive(Debug, Clone, Copy)]
struct Frame {
    scope: ScopeId,
    next_child: usize,
}

/// Scope chain of the method body being translated.
#[derive(Debug)]
pub struct LocalScope<'t> {
    table: &'t SymbolTable,
    frames: Vec<Frame>,
    visible: FxHashSet<VariableId>,
}

impl<'t> LocalScope<'t> {
    /// Start at the method scope with the receiver and parameters visible.
    pub fn new(table: &'t SymbolTable, method: MethodId) -> Self {
        let symbol = table.method(method);
        Self {
            table,
            frames: vec![Frame {
                scope: symbol.scope,
                next_child: 0,
            }],
            visible: symbol.params.iter().copied().collect(),
        }
    }

    /// Enter the next block scope of the current scope.
    pub fn enter_block(&mut self, span: Span) -> Result<ScopeId> {
        let Some(frame) = self.frames.last_mut() else {
            return Err(CompilationError::MalformedTree {
                message: "block outside of a method body".to_string(),
                span,
            });
        };
        let Some(child) = self.table.scope(frame.scope).children.get(frame.next_child).copied()
        else {
            return Err(CompilationError::MalformedTree {
                message: "block has no registered scope".to_string(),
                span,
            });
        };
        frame.next_child += 1;
        self.frames.push(Frame {
            scope: child,
            next_child: 0,
        });
        Ok(child)
    }

    pub fn exit_block(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn current(&self) -> Option<ScopeId> {
        self.frames.last().map(|f| f.scope)
    }

    /// Mark the local `name` of the current scope as declared.
    pub fn declare(&mut self, name: &str) -> Option<VariableId> {
        let scope = self.current()?;
        let id = self.table.lookup_in_scope(scope, name)?;
        self.visible.insert(id);
        Some(id)
    }

    /// Find a visible variable, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<VariableId> {
        self.frames.iter().rev().find_map(|frame| {
            self.table
                .lookup_in_scope(frame.scope, name)
                .filter(|id| self.visible.contains(id))
        })
    }
}
