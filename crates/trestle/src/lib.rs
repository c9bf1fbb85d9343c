//! Trestle - a relationship-graph engine for entity registries.
//!
//! Trestle turns an ordered collection of domain entities (source-code
//! symbols, project tasks, knowledge-graph concepts) into a directed graph
//! and answers structural questions about it:
//!
//! - Does it contain a cycle? ([`detect_cycles`])
//! - In what order can the entities be processed? ([`topo_sort`])
//! - What is reachable from a node within a bounded number of hops?
//!   ([`related_within`])
//!
//! All analyses are pure, synchronous functions over an immutable [`Graph`]
//! value built fresh for each request by [`build_graph`]. The engine keeps
//! no state between calls; persistence, request dispatch, and entity
//! extraction belong to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod cycles;
pub mod error;
pub mod graph;
pub mod topo;
pub mod traverse;
pub mod warning;

pub use builder::{build_graph, BuildReport, EntityRecord, Reference};
pub use cycles::{cycles_involving, detect_cycles, would_create_cycle, Cycle};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, GraphStats, Node, NodeId};
pub use topo::{topo_sort, TopoReport};
pub use traverse::{reaches, related_within, Related};
pub use warning::Warning;
