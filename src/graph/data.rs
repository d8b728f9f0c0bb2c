//! Persisted graph records: nodes, edges, groups.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{GroupId, NodeId};

/// 2-D layout position of a node in the editor canvas. Owned by the editor;
/// irrelevant to compilation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Persisted record for one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Stable unique identifier, generated once and never reused.
    pub id: NodeId,
    /// Full kind name, possibly a constructed generic such as
    /// `flowgraph::nodes::SwitchNode<demo::Weather>`.
    pub kind: String,
    #[serde(default)]
    pub position: Position,
    /// Expanded/collapsed display flag.
    #[serde(default = "default_expanded")]
    pub expanded: bool,
}

fn default_expanded() -> bool {
    true
}

impl NodeData {
    /// Create a node record with a fresh id for the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        NodeData {
            id: NodeId::generate(),
            kind: kind.into(),
            position: Position::default(),
            expanded: true,
        }
    }
}

/// Persisted record for a named visual grouping of nodes.
///
/// Groups are purely organizational and carry no compilation semantics. The
/// editor recomputes membership each time a group's contents change; nothing
/// in the data model prevents a node from appearing in several groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupData {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub contained_nodes: Vec<NodeId>,
}

impl GroupData {
    pub fn new(name: impl Into<String>) -> Self {
        GroupData {
            id: GroupId::generate(),
            name: name.into(),
            contained_nodes: Vec::new(),
        }
    }
}

/// Reference to one port of one node, by (node id, port name), never by
/// live object identity, so the graph serializes independently of
/// instantiated node objects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub node: NodeId,
    pub port: String,
    /// Persisted wiring-hook override for the source port, kept on the edge
    /// so a graph with unresolvable kinds still round-trips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiring_hook: Option<String>,
}

impl PortRef {
    pub fn new(node: NodeId, port: impl Into<String>) -> Self {
        PortRef {
            node,
            port: port.into(),
            wiring_hook: None,
        }
    }

    #[must_use]
    pub fn with_wiring_hook(mut self, hook: impl Into<String>) -> Self {
        self.wiring_hook = Some(hook.into());
        self
    }
}

/// Directed connection from one output port to one input port.
///
/// Endpoint connectability (opposite directions, identical type pairs) is
/// enforced by the editor when the edge is created; the compiler assumes a
/// well-formed graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub from: PortRef,
    pub to: PortRef,
}

impl EdgeData {
    pub fn new(from: PortRef, to: PortRef) -> Self {
        EdgeData { from, to }
    }
}

/// A persisted flow graph: the aggregate the editor produces and the
/// compiler consumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Stable identifier, also used to name the generated source file.
    pub id: String,
    /// Human-readable name; the generated type name derives from it.
    pub name: String,
    /// Name of the generated implementation type this graph is associated
    /// with, set by the code generator. `None` until first generation, or
    /// when the association was lost and the code must be rebuilt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<String>,
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub groups: Vec<GroupData>,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
}

impl GraphData {
    /// Create an empty graph with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        GraphData {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            flow_type: None,
            nodes: Vec::new(),
            groups: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Add a node record, returning its id.
    pub fn add_node(&mut self, node: NodeData) -> NodeId {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Add an edge between two port references.
    pub fn add_edge(&mut self, from: PortRef, to: PortRef) {
        self.edges.push(EdgeData::new(from, to));
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&NodeData> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Outgoing edges of a node, in edge declaration order.
    pub fn edges_from<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a EdgeData> {
        self.edges.iter().filter(move |edge| &edge.from.node == id)
    }

    /// Serialize to the reference JSON persistence format.
    pub fn to_json(&self) -> Result<String, GraphFormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from the reference JSON persistence format.
    pub fn from_json(json: &str) -> Result<Self, GraphFormatError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Error wrapping a malformed persisted graph payload.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("invalid graph persistence payload")]
#[diagnostic(code(flowgraph::graph::format))]
pub struct GraphFormatError(#[from] serde_json::Error);
