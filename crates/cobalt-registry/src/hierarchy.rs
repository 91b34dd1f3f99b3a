//! The class inheritance graph.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: one `ClassId` per registered class, node index == class index
//! - Edges: class → each resolved parent

use cobalt_core::ClassId;
use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use crate::SymbolTable;

#[derive(Debug, Clone)]
pub struct InheritanceGraph {
    graph: DiGraph<ClassId, ()>,
}

impl InheritanceGraph {
    /// Build the graph from the resolved parents recorded in `table`.
    pub fn new(table: &SymbolTable) -> Self {
        let mut graph = DiGraph::with_capacity(table.class_count(), table.class_count());
        for class in table.classes() {
            graph.add_node(class.id);
        }
        for class in table.classes() {
            for parent in &class.resolved_parents {
                graph.add_edge(node(class.id), node(*parent), ());
            }
        }
        Self { graph }
    }

    pub fn class_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Groups of classes that inherit from themselves.
    ///
    /// Each group is sorted by class id and groups are ordered by their
    /// first member, so the result follows declaration order.
    pub fn cycles(&self) -> Vec<Vec<ClassId>> {
        let mut cycles: Vec<Vec<ClassId>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut classes: Vec<ClassId> = scc.into_iter().map(|n| self.graph[n]).collect();
                classes.sort();
                classes
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Every class reachable through parent edges, excluding `class` itself
    /// unless it lies on a cycle. Sorted by class id.
    pub fn ancestors(&self, class: ClassId) -> Vec<ClassId> {
        let start = node(class);
        let mut dfs = Dfs::new(&self.graph, start);
        let mut out = Vec::new();
        while let Some(n) = dfs.next(&self.graph) {
            if n != start {
                out.push(self.graph[n]);
            }
        }
        if self.graph.neighbors(start).any(|p| has_path_connecting(&self.graph, p, start, None)) {
            out.push(class);
        }
        out.sort();
        out
    }

    /// Whether `ancestor` is a proper ancestor of `class`.
    pub fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        class != ancestor && has_path_connecting(&self.graph, node(class), node(ancestor), None)
    }
}

fn node(class: ClassId) -> NodeIndex {
    NodeIndex::new(class.index())
}
