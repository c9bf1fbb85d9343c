//! Adapts an entity collection into a [`Graph`].
//!
//! The builder is the only place malformed input can surface: it skips bad
//! records with a [`Warning`] and never aborts (see [`crate::warning`]).
//! Everything downstream is a total function over the resulting graph.

use crate::graph::Graph;
use crate::warning::Warning;
use serde::{Deserialize, Serialize};

/// A single outgoing reference declared by an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Id of the referenced entity. May name an entity that does not exist
    /// in the collection (a dangling reference); that is valid input.
    pub target: String,

    /// Relation type tag for the resulting edge, e.g. `"depends-on"`.
    pub relation: String,
}

impl Reference {
    /// Create a reference to `target` tagged with `relation`.
    pub fn new(target: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            relation: relation.into(),
        }
    }
}

/// One entity of the caller's collection, reduced to what the graph engine
/// needs: a stable id and its ordered outgoing references.
///
/// Entity-specific collaborators (symbol extraction, task parsing,
/// knowledge-node registration) produce these; the engine never sees the
/// full domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Stable entity id; becomes the node id.
    pub id: String,

    /// Outgoing references in declaration order.
    pub references: Vec<Reference>,

    /// Opaque handle back to the owning domain entity (a storage key, say),
    /// carried onto the node's payload. Not interpreted by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl EntityRecord {
    /// Create a record with no references and no payload.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            references: Vec::new(),
            payload: None,
        }
    }

    /// Append a reference, builder-style.
    #[must_use]
    pub fn with_reference(mut self, target: impl Into<String>, relation: impl Into<String>) -> Self {
        self.references.push(Reference::new(target, relation));
        self
    }
}

/// The outcome of a build: the graph plus any non-fatal warnings.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// The constructed graph.
    pub graph: Graph,

    /// Warnings for skipped entities or references, in input order.
    pub warnings: Vec<Warning>,
}

/// Build a [`Graph`] from an ordered entity collection.
///
/// The node set is the union of all entity ids and all referenced ids, so
/// dangling references still appear as (payload-less) nodes. One edge is
/// appended per declared reference, in declaration order, entities processed
/// in input order; that order is what makes cycle detection and topological
/// sorting deterministic.
///
/// A duplicate entity id merges the later occurrence's references into the
/// existing node (union of edges) rather than overwriting it; the first
/// occurrence's payload wins.
///
/// # Examples
///
/// ```
/// use trestle::build_graph;
/// use trestle::EntityRecord;
///
/// let entities = vec![
///     EntityRecord::new("a").with_reference("b", "depends-on"),
///     EntityRecord::new("b"),
/// ];
///
/// let report = build_graph(&entities);
/// assert!(report.warnings.is_empty());
/// assert_eq!(report.graph.node_count(), 2);
/// assert_eq!(report.graph.edge_count(), 1);
/// ```
#[must_use]
pub fn build_graph(entities: &[EntityRecord]) -> BuildReport {
    tracing::debug!(entity_count = entities.len(), "building relationship graph");

    let mut graph = Graph::new();
    let mut warnings = Vec::new();

    for (position, entity) in entities.iter().enumerate() {
        if entity.id.is_empty() {
            warnings.push(Warning::MissingId { position });
            continue;
        }

        // Registers the node, or fills the payload of a placeholder node
        // created earlier by a reference to this id.
        graph.add_node(entity.id.as_str(), entity.payload.clone());

        for (ref_position, reference) in entity.references.iter().enumerate() {
            if reference.target.is_empty() {
                warnings.push(Warning::EmptyReferenceTarget {
                    entity: entity.id.clone(),
                    position: ref_position,
                });
                continue;
            }

            // Dangling targets become payload-less nodes, never dropped.
            graph.add_node(reference.target.as_str(), None);
            graph.add_edge(
                entity.id.as_str(),
                reference.target.as_str(),
                reference.relation.as_str(),
            );
        }
    }

    tracing::debug!(
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        warning_count = warnings.len(),
        "graph build complete"
    );

    BuildReport { graph, warnings }
}
