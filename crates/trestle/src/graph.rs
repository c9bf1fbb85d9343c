//! The graph model consumed by all analyses.
//!
//! A [`Graph`] is a set of [`Node`]s deduplicated by id plus an
//! append-ordered sequence of directed, typed [`Edge`]s. Determinism of
//! every analysis depends on insertion order, so nodes are stored in the
//! order they were first inserted and edges in the order they were declared;
//! neither collection is ever reordered.
//!
//! Dangling endpoints are legal: an edge may reference an id that was never
//! registered as a node (an import of a file that was never indexed, say).
//! Such edges are preserved, never dropped, because callers need to see
//! unresolved dependencies. Analyses cover them through
//! [`Graph::universe`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Unique identifier for a graph node.
///
/// Identity is the string id; two nodes with the same id are the same node.
///
/// # Examples
///
/// ```
/// use trestle::NodeId;
///
/// let id = NodeId::new("src/auth.rs");
/// assert_eq!(id.to_string(), "src/auth.rs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A vertex in the relationship graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier. Nodes are deduplicated by id within a graph.
    pub id: NodeId,

    /// Opaque reference back to the owning domain entity, if any.
    ///
    /// `None` for nodes that exist only as dangling reference targets.
    /// The engine never interprets the payload.
    pub payload: Option<String>,
}

/// A directed, typed relation between two node ids.
///
/// Edges are stored as an append-ordered sequence and are not deduplicated:
/// parallel edges between the same pair are permitted and meaningful
/// (multiple reasons to depend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id (the dependent).
    pub from: NodeId,

    /// Target node id (the dependency).
    pub to: NodeId,

    /// Relation type tag, e.g. `"depends-on"`, `"imports"`, `"relates-to"`.
    pub relation: String,
}

/// Summary counts for a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of registered nodes.
    pub node_count: usize,

    /// Number of edges, parallel edges counted individually.
    pub edge_count: usize,

    /// Edge counts per relation type, keyed by tag.
    pub by_relation: BTreeMap<String, usize>,
}

/// An immutable-once-built directed multigraph with insertion-ordered nodes
/// and edges.
///
/// A graph is constructed fresh on each analysis request from the current
/// entity collection (normally via [`build_graph`](crate::build_graph)); the
/// analyses never mutate it and it has no identity or persistence of its
/// own.
///
/// # Examples
///
/// ```
/// use trestle::Graph;
///
/// let mut graph = Graph::new();
/// graph.add_node("a", Some("task-a".to_string()));
/// graph.add_edge("a", "b", "depends-on");
///
/// assert_eq!(graph.node_count(), 1);
/// assert_eq!(graph.edge_count(), 1);
/// // "b" was never registered but the edge is preserved:
/// assert!(!graph.contains(&"b".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Nodes in first-insertion order.
    nodes: Vec<Node>,
    /// Node id to position in `nodes`.
    index: HashMap<NodeId, usize>,
    /// Edges in declaration order.
    edges: Vec<Edge>,
    /// Outgoing edge indices per source id, in declaration order.
    ///
    /// Keyed by id rather than node position so edges from unregistered
    /// ids are traversable too.
    outgoing: HashMap<NodeId, Vec<usize>>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, deduplicating by id.
    ///
    /// The first insertion fixes the node's position in iteration order.
    /// Re-inserting an existing id never moves the node; a `None` payload
    /// left by an earlier placeholder insertion (a node first seen as a
    /// reference target) is filled in by a later `Some` payload, but an
    /// existing payload is never overwritten.
    ///
    /// Returns `true` if the id was not previously registered.
    pub fn add_node(&mut self, id: impl Into<NodeId>, payload: Option<String>) -> bool {
        let id = id.into();
        if let Some(&pos) = self.index.get(&id) {
            if self.nodes[pos].payload.is_none() {
                self.nodes[pos].payload = payload;
            }
            return false;
        }
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(Node { id, payload });
        true
    }

    /// Append a directed edge.
    ///
    /// Endpoints are not required to be registered nodes and the edge is
    /// never deduplicated.
    pub fn add_edge(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        relation: impl Into<String>,
    ) {
        let edge = Edge {
            from: from.into(),
            to: to.into(),
            relation: relation.into(),
        };
        self.outgoing
            .entry(edge.from.clone())
            .or_default()
            .push(self.edges.len());
        self.edges.push(edge);
    }

    /// Whether `id` is a registered node.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a registered node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    /// Registered nodes in first-insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in declaration order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of `id` in declaration order.
    ///
    /// Yields edges for unregistered source ids as well, since edges with
    /// dangling endpoints are legal.
    pub fn outgoing(&self, id: &NodeId) -> impl Iterator<Item = &Edge> {
        self.outgoing
            .get(id)
            .into_iter()
            .flatten()
            .map(|&pos| &self.edges[pos])
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, parallel edges counted individually.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes and no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Every id the analyses must cover, in deterministic first-seen order:
    /// registered nodes in insertion order, then ids that appear only in
    /// edges, in first edge-appearance order (`from` before `to` within an
    /// edge).
    ///
    /// For graphs produced by the builder this equals the registered node
    /// set, since the builder registers every referenced id. The universe
    /// exists so the analyses stay total over hand-built graphs with
    /// dangling endpoints.
    #[must_use]
    pub fn universe(&self) -> Vec<NodeId> {
        let mut seen: HashSet<&NodeId> = self.nodes.iter().map(|n| &n.id).collect();
        let mut ids: Vec<NodeId> = self.nodes.iter().map(|n| n.id.clone()).collect();
        for edge in &self.edges {
            for id in [&edge.from, &edge.to] {
                if seen.insert(id) {
                    ids.push(id.clone());
                }
            }
        }
        ids
    }

    /// Summary counts: nodes, edges, and edges per relation type.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let mut by_relation: BTreeMap<String, usize> = BTreeMap::new();
        for edge in &self.edges {
            *by_relation.entry(edge.relation.clone()).or_insert(0) += 1;
        }
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            by_relation,
        }
    }
}
