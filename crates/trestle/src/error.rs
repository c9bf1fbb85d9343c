//! Error types for trestle graph queries.

use crate::graph::NodeId;
use thiserror::Error;

/// The error type for trestle graph queries.
///
/// The core analyses ([`detect_cycles`](crate::detect_cycles),
/// [`topo_sort`](crate::topo_sort), [`related_within`](crate::related_within))
/// are total over any well-formed [`Graph`](crate::Graph) and never fail.
/// Only the by-id queries that require a known node can return an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The queried node id is not registered in the graph.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
}

/// A specialized Result type for trestle operations.
pub type Result<T> = std::result::Result<T, Error>;
