//! Cycle detection over a [`Graph`].
//!
//! Classic three-color depth-first search: every node is White (unvisited),
//! Gray (on the current traversal path), or Black (fully explored). An edge
//! into a Gray node is a back edge, and the Gray suffix of the current path
//! is one concrete cyclic path.
//!
//! The detector reports exactly one cycle per back edge encountered during
//! its deterministic traversal. That is a witness set: it is empty if and
//! only if the graph is acyclic, but it is not the exhaustive set of all
//! simple cycles (which is exponential in general).
//!
//! The search uses an explicit stack rather than recursion so very large
//! graphs cannot exhaust the call stack; visit order is identical to the
//! recursive formulation.

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::traverse::reaches;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One concrete cyclic path.
///
/// Consecutive ids (and last back to first) are connected by an edge in the
/// graph. A self-edge yields a one-element cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle {
    /// Node ids along the cycle, in traversal order.
    pub nodes: Vec<NodeId>,
}

impl Cycle {
    /// Whether `id` lies on this cycle.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Number of nodes on the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A detected cycle always has at least one node; this exists to
    /// satisfy the `len`/`is_empty` pairing convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Node state during the depth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Detect cycles via deterministic depth-first search.
///
/// DFS starts from every still-White node in first-seen order (node
/// insertion order, then dangling edge ids in edge-appearance order), and
/// follows each node's outgoing edges in declaration order, so the result
/// is fully determined by the graph's construction order. Nodes unreachable
/// from earlier roots still get their own DFS start.
///
/// Returns one [`Cycle`] per back edge, in discovery order; parallel back
/// edges yield one witness each. The result is empty iff the graph is
/// acyclic.
#[must_use]
pub fn detect_cycles(graph: &Graph) -> Vec<Cycle> {
    let universe = graph.universe();
    let position: HashMap<&NodeId, usize> = universe
        .iter()
        .enumerate()
        .map(|(pos, id)| (id, pos))
        .collect();

    // Successor lists in edge-declaration order, as universe positions.
    let successors: Vec<Vec<usize>> = universe
        .iter()
        .map(|id| graph.outgoing(id).map(|edge| position[&edge.to]).collect())
        .collect();

    tracing::debug!(
        node_count = universe.len(),
        edge_count = graph.edge_count(),
        "starting cycle detection with DFS"
    );

    let mut color = vec![Color::White; universe.len()];
    let mut path: Vec<usize> = Vec::new();
    let mut cycles: Vec<Cycle> = Vec::new();

    for root in 0..universe.len() {
        if color[root] != Color::White {
            continue;
        }

        // Explicit-stack DFS. Each frame is (node, next successor offset);
        // `path` mirrors the Gray chain from the root to the current node.
        color[root] = Color::Gray;
        path.push(root);
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            if let Some(&child) = successors[node].get(frame.1) {
                frame.1 += 1;
                match color[child] {
                    Color::White => {
                        color[child] = Color::Gray;
                        path.push(child);
                        stack.push((child, 0));
                    }
                    Color::Gray => {
                        // Back edge: the cycle runs from the Gray child down
                        // the current path to the node that closed the loop.
                        if let Some(start) = path.iter().position(|&pos| pos == child) {
                            cycles.push(Cycle {
                                nodes: path[start..]
                                    .iter()
                                    .map(|&pos| universe[pos].clone())
                                    .collect(),
                            });
                        }
                    }
                    Color::Black => {}
                }
            } else {
                color[node] = Color::Black;
                path.pop();
                stack.pop();
            }
        }
    }

    tracing::debug!(cycle_count = cycles.len(), "cycle detection complete");

    cycles
}

/// Detect cycles that pass through a specific node.
///
/// Filters [`detect_cycles`] to cycles containing `id`.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if `id` is not a registered node.
pub fn cycles_involving(graph: &Graph, id: &NodeId) -> Result<Vec<Cycle>> {
    if !graph.contains(id) {
        return Err(Error::NodeNotFound(id.clone()));
    }

    Ok(detect_cycles(graph)
        .into_iter()
        .filter(|cycle| cycle.contains(id))
        .collect())
}

/// Whether adding an edge `from -> to` would close a cycle.
///
/// True exactly when `to` already reaches `from` (a zero-length path counts,
/// so `from == to` answers true: a self-edge is a cycle). Useful for
/// validating a new dependency before committing it to the entity
/// collection.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if either endpoint is not a registered
/// node.
pub fn would_create_cycle(graph: &Graph, from: &NodeId, to: &NodeId) -> Result<bool> {
    if !graph.contains(from) {
        return Err(Error::NodeNotFound(from.clone()));
    }
    if !graph.contains(to) {
        return Err(Error::NodeNotFound(to.clone()));
    }

    Ok(reaches(graph, to, from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_graph, EntityRecord};

    fn graph_of(entities: &[EntityRecord]) -> Graph {
        let report = build_graph(entities);
        assert!(report.warnings.is_empty(), "unexpected build warnings");
        report.graph
    }

    fn ids(cycle: &Cycle) -> Vec<&str> {
        cycle.nodes.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let graph = graph_of(&[
            EntityRecord::new("a").with_reference("b", "depends-on"),
            EntityRecord::new("b").with_reference("c", "depends-on"),
            EntityRecord::new("c"),
        ]);

        assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn three_cycle_is_reported_once_in_insertion_rotation() {
        let graph = graph_of(&[
            EntityRecord::new("a").with_reference("b", "depends-on"),
            EntityRecord::new("b").with_reference("c", "depends-on"),
            EntityRecord::new("c").with_reference("a", "depends-on"),
        ]);

        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(ids(&cycles[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn self_edge_yields_one_element_cycle() {
        let graph = graph_of(&[EntityRecord::new("a").with_reference("a", "depends-on")]);

        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(ids(&cycles[0]), vec!["a"]);
    }

    #[test]
    fn independent_cycles_are_both_found() {
        let graph = graph_of(&[
            EntityRecord::new("a").with_reference("b", "depends-on"),
            EntityRecord::new("b").with_reference("a", "depends-on"),
            EntityRecord::new("x").with_reference("y", "depends-on"),
            EntityRecord::new("y").with_reference("x", "depends-on"),
        ]);

        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 2);
        assert_eq!(ids(&cycles[0]), vec!["a", "b"]);
        assert_eq!(ids(&cycles[1]), vec!["x", "y"]);
    }

    #[test]
    fn figure_eight_yields_one_witness_per_back_edge() {
        // Two loops through "a": a->b->a and a->c->a.
        let graph = graph_of(&[
            EntityRecord::new("a")
                .with_reference("b", "relates-to")
                .with_reference("c", "relates-to"),
            EntityRecord::new("b").with_reference("a", "relates-to"),
            EntityRecord::new("c").with_reference("a", "relates-to"),
        ]);

        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 2);
        assert_eq!(ids(&cycles[0]), vec!["a", "b"]);
        assert_eq!(ids(&cycles[1]), vec!["a", "c"]);
    }

    #[test]
    fn parallel_back_edges_each_yield_a_witness() {
        let graph = graph_of(&[
            EntityRecord::new("a").with_reference("b", "imports"),
            EntityRecord::new("b")
                .with_reference("a", "imports")
                .with_reference("a", "depends-on"),
        ]);

        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 2);
        assert_eq!(ids(&cycles[0]), vec!["a", "b"]);
        assert_eq!(ids(&cycles[1]), vec!["a", "b"]);
    }

    #[test]
    fn diamond_sharing_is_not_a_cycle() {
        // a->b->d, a->c->d: d is reached twice but never while Gray.
        let graph = graph_of(&[
            EntityRecord::new("a")
                .with_reference("b", "depends-on")
                .with_reference("c", "depends-on"),
            EntityRecord::new("b").with_reference("d", "depends-on"),
            EntityRecord::new("c").with_reference("d", "depends-on"),
            EntityRecord::new("d"),
        ]);

        assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn disconnected_component_gets_its_own_dfs_start() {
        let graph = graph_of(&[
            EntityRecord::new("a"),
            EntityRecord::new("x").with_reference("y", "depends-on"),
            EntityRecord::new("y").with_reference("x", "depends-on"),
        ]);

        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(ids(&cycles[0]), vec!["x", "y"]);
    }

    #[test]
    fn dangling_edges_participate_in_detection() {
        // Neither endpoint registered as a node; edges alone form the cycle.
        let mut graph = Graph::new();
        graph.add_edge("p", "q", "relates-to");
        graph.add_edge("q", "p", "relates-to");

        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(ids(&cycles[0]), vec!["p", "q"]);
    }

    #[test]
    fn empty_graph_has_no_cycles() {
        assert!(detect_cycles(&Graph::new()).is_empty());
    }

    mod involving {
        use super::*;

        #[test]
        fn filters_to_cycles_containing_the_node() {
            let graph = graph_of(&[
                EntityRecord::new("a").with_reference("b", "depends-on"),
                EntityRecord::new("b").with_reference("a", "depends-on"),
                EntityRecord::new("x").with_reference("y", "depends-on"),
                EntityRecord::new("y").with_reference("x", "depends-on"),
            ]);

            let cycles = cycles_involving(&graph, &"x".into()).expect("x is registered");
            assert_eq!(cycles.len(), 1);
            assert_eq!(ids(&cycles[0]), vec!["x", "y"]);
        }

        #[test]
        fn acyclic_node_has_no_involving_cycles() {
            let graph = graph_of(&[
                EntityRecord::new("a").with_reference("b", "depends-on"),
                EntityRecord::new("b"),
            ]);

            let cycles = cycles_involving(&graph, &"a".into()).expect("a is registered");
            assert!(cycles.is_empty());
        }

        #[test]
        fn unknown_node_is_an_error() {
            let graph = graph_of(&[EntityRecord::new("a")]);

            let err = cycles_involving(&graph, &"ghost".into()).unwrap_err();
            assert_eq!(err, Error::NodeNotFound("ghost".into()));
        }
    }

    mod would_create {
        use super::*;

        #[test]
        fn true_when_target_reaches_source() {
            let graph = graph_of(&[
                EntityRecord::new("a").with_reference("b", "depends-on"),
                EntityRecord::new("b").with_reference("c", "depends-on"),
                EntityRecord::new("c"),
            ]);

            // c -> a would close c <- b <- a.
            assert!(would_create_cycle(&graph, &"c".into(), &"a".into()).unwrap());
        }

        #[test]
        fn false_when_no_return_path_exists() {
            let graph = graph_of(&[
                EntityRecord::new("a").with_reference("b", "depends-on"),
                EntityRecord::new("b"),
                EntityRecord::new("c"),
            ]);

            assert!(!would_create_cycle(&graph, &"a".into(), &"c".into()).unwrap());
        }

        #[test]
        fn self_edge_would_be_a_cycle() {
            let graph = graph_of(&[EntityRecord::new("a")]);

            assert!(would_create_cycle(&graph, &"a".into(), &"a".into()).unwrap());
        }

        #[test]
        fn unknown_endpoint_is_an_error() {
            let graph = graph_of(&[EntityRecord::new("a")]);

            let err = would_create_cycle(&graph, &"a".into(), &"ghost".into()).unwrap_err();
            assert_eq!(err, Error::NodeNotFound("ghost".into()));
        }
    }
}
