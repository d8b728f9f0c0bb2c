//! Graph data model: the persisted node/edge/group records and their
//! integrity rules.
//!
//! The editor creates and destroys [`NodeData`], [`EdgeData`] and
//! [`GroupData`] records in response to user actions; the compiler only
//! reads a snapshot. Edges reference ports by (node id, port name) pairs so
//! the graph serializes independently of live node objects; [`GraphData`]
//! round-trips through JSON preserving node ids, edge endpoints and group
//! memberships.
//!
//! Structural integrity (exactly one Enter node, every kind resolvable)
//! is checked at save/compile time by [`validate`], never during editing.
//! A node whose kind cannot be resolved degrades to a
//! [`ResolvedKind::Placeholder`] that keeps the graph editable but blocks
//! compilation.
//!
//! # Example
//!
//! ```rust
//! use flowgraph::graph::{GraphData, NodeData, PortRef};
//! use flowgraph::nodes;
//!
//! let mut graph = GraphData::new("intro");
//! let enter = graph.add_node(NodeData::new(nodes::ENTER_KIND));
//! let branch = graph.add_node(NodeData::new(nodes::IF_KIND));
//! graph.add_edge(
//!     PortRef::new(enter.clone(), "on_enter"),
//!     PortRef::new(branch.clone(), "condition"),
//! );
//!
//! let json = graph.to_json().unwrap();
//! let restored = GraphData::from_json(&json).unwrap();
//! assert_eq!(graph, restored);
//! ```

mod data;
mod resolve;
mod validate;

#[cfg(test)]
mod tests;

pub use data::{EdgeData, GraphData, GraphFormatError, GroupData, NodeData, PortRef, Position};
pub use resolve::{ResolvedKind, resolve_kind};
pub use validate::{GraphValidationError, StructuralProblem, ValidatedGraph, validate};
