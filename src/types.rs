//! Core identifier types for the flowgraph system.
//!
//! This module defines the fundamental types used to identify nodes and wire
//! types throughout a flow graph. These are the core domain concepts the rest
//! of the crate builds on:
//!
//! - [`NodeId`]: stable, process-wide-unique identifier for a graph node
//! - [`GroupId`]: identifier for a visual node group
//! - [`ValueType`]: descriptor for the parameter/result type carried by a port
//!
//! # Examples
//!
//! ```rust
//! use flowgraph::types::{NodeId, ValueType};
//!
//! // Node ids are generated once and never reused.
//! let id = NodeId::generate();
//! assert_ne!(id, NodeId::generate());
//!
//! // Wire types are compared by their full path.
//! let ty = ValueType::of::<bool>();
//! assert_eq!(ty.full_name(), "bool");
//! assert!(ValueType::unit().is_unit());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a node within a graph.
///
/// Ids are generated once (UUID v4) when a node is created by the editor and
/// are never reused. Edges reference nodes by id rather than by live object
/// identity, which keeps the persisted graph independent of instantiated
/// node objects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generate a fresh, process-wide-unique node id.
    #[must_use]
    pub fn generate() -> Self {
        NodeId(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id, e.g. when deserializing editor data.
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

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

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

/// Identifier for a visual node group. Shares the UUID namespace with
/// [`NodeId`] but is a distinct type so the two cannot be mixed up.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Generate a fresh group id.
    #[must_use]
    pub fn generate() -> Self {
        GroupId(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        GroupId(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptor for a type carried across a port connection.
///
/// A `ValueType` identifies the parameter or result type of a port by its
/// full Rust path. Two ports are connectable only when their parameter and
/// result types are identical, so equality here is the foundation of the
/// connectability rule. The full path is also what the code generator writes
/// into injected-value expressions, which is why the descriptor stores the
/// path verbatim rather than a hashed token.
///
/// # Examples
///
/// ```rust
/// use flowgraph::types::ValueType;
///
/// let a = ValueType::of::<bool>();
/// let b = ValueType::named("bool");
/// assert_eq!(a, b);
/// assert_eq!(ValueType::named("demo::Weather").name(), "Weather");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueType {
    full_name: String,
}

impl ValueType {
    /// Describe the type `T` by its full path.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        ValueType {
            full_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Describe a type by an explicit full path.
    ///
    /// Use this when the path visible to generated code differs from what
    /// `std::any::type_name` reports (e.g. re-exported types).
    pub fn named(full_name: impl Into<String>) -> Self {
        ValueType {
            full_name: full_name.into(),
        }
    }

    /// The unit type `()`, used by ports that carry no information.
    #[must_use]
    pub fn unit() -> Self {
        ValueType::of::<()>()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.full_name == "()"
    }

    /// Full Rust path of the type, as written into generated code.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Short display name: the last path segment, keeping any generic tail.
    #[must_use]
    pub fn name(&self) -> &str {
        let end = self.full_name.find('<').unwrap_or(self.full_name.len());
        let start = self.full_name[..end].rfind("::").map_or(0, |idx| idx + 2);
        &self.full_name[start..]
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_are_unique() {
        assert_ne!(NodeId::generate(), NodeId::generate());
    }

    #[test]
    fn value_type_short_name_strips_path() {
        assert_eq!(ValueType::named("demo::weather::Weather").name(), "Weather");
        assert_eq!(ValueType::named("bool").name(), "bool");
        assert_eq!(ValueType::unit().name(), "()");
    }

    #[test]
    fn value_type_short_name_keeps_generic_tail() {
        let ty = ValueType::named("flowgraph::nodes::SwitchNode<demo::Weather>");
        assert_eq!(ty.name(), "SwitchNode<demo::Weather>");
    }

    #[test]
    fn value_type_serde_is_transparent() {
        let ty = ValueType::of::<bool>();
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(json, "\"bool\"");
        let back: ValueType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ty);
    }
}
