//! Topological ordering with explicit cyclic residue.
//!
//! Kahn's algorithm over the dependency orientation: an edge `A -> B` means
//! "A depends on B", so the linear order places B (the dependency) before A
//! (the dependent). Nodes that sit on a cycle, directly or transitively
//! behind one, never become ready; they are reported separately rather than
//! spliced into the order.

use crate::graph::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Result of a topological sort.
///
/// Every node of the graph appears in exactly one of the two sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopoReport {
    /// Linearized node ids, dependencies before dependents. Covers exactly
    /// the acyclic portion of the graph.
    pub order: Vec<NodeId>,

    /// Ids of nodes that participate in a cycle, or depend on one in a way
    /// that can never be satisfied. A set: no duplicates, reported in
    /// first-seen order so serialized forms stay deterministic.
    pub cyclic: Vec<NodeId>,
}

impl TopoReport {
    /// Whether the whole graph was linearized.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cyclic.is_empty()
    }
}

/// Linearize the acyclic portion of a graph.
///
/// Ready nodes (all dependencies already emitted) are emitted lowest
/// first-seen position first, so the order is fully determined by the
/// graph's construction order. Parallel edges count individually: each one
/// must be satisfied, and each is, since they share a target.
///
/// `cyclic` is empty exactly when [`detect_cycles`](crate::detect_cycles)
/// returns no cycles for the same graph.
#[must_use]
pub fn topo_sort(graph: &Graph) -> TopoReport {
    let universe = graph.universe();
    let position: HashMap<&NodeId, usize> = universe
        .iter()
        .enumerate()
        .map(|(pos, id)| (id, pos))
        .collect();

    // pending[n] counts n's unsatisfied dependencies (outgoing edges);
    // dependents[m] lists the nodes to relieve once m is emitted.
    let mut pending = vec![0usize; universe.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); universe.len()];
    for edge in graph.edges() {
        let from = position[&edge.from];
        let to = position[&edge.to];
        pending[from] += 1;
        dependents[to].push(from);
    }

    tracing::debug!(
        node_count = universe.len(),
        edge_count = graph.edge_count(),
        "starting topological sort"
    );

    // Min-heap over universe positions: ties among ready nodes break by
    // first-seen order.
    let mut ready: BinaryHeap<Reverse<usize>> = pending
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == 0)
        .map(|(pos, _)| Reverse(pos))
        .collect();

    let mut order = Vec::with_capacity(universe.len());
    let mut emitted = vec![false; universe.len()];

    while let Some(Reverse(node)) = ready.pop() {
        emitted[node] = true;
        order.push(universe[node].clone());

        for &dependent in &dependents[node] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    let cyclic: Vec<NodeId> = universe
        .iter()
        .enumerate()
        .filter(|&(pos, _)| !emitted[pos])
        .map(|(_, id)| id.clone())
        .collect();

    tracing::debug!(
        ordered = order.len(),
        cyclic = cyclic.len(),
        "topological sort complete"
    );

    TopoReport { order, cyclic }
}
