//! Kind resolution for persisted nodes: concrete kinds and placeholders.

use std::sync::Arc;

use crate::registry::{DescriptorRegistry, KindRegistration, PortDescriptor};
use crate::types::ValueType;

use super::data::{EdgeData, NodeData};

/// The resolved kind of a persisted node.
///
/// A node whose kind name is not present in the registry degrades to a
/// placeholder that preserves its previously known ports, reconstructed from
/// incident edges, so the graph remains structurally valid and editable.
/// Placeholders block compilation; they exist so a missing kind never
/// corrupts the persisted graph.
#[derive(Clone, Debug)]
pub enum ResolvedKind {
    /// The kind is registered; all metadata comes from the registry.
    Concrete(Arc<KindRegistration>),
    /// The kind could not be resolved; ports are reconstructed from edges.
    Placeholder {
        kind_name: String,
        ports: Vec<PortDescriptor>,
    },
}

impl ResolvedKind {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ResolvedKind::Placeholder { .. })
    }

    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            ResolvedKind::Concrete(kind) => &kind.kind_name,
            ResolvedKind::Placeholder { kind_name, .. } => kind_name,
        }
    }

    #[must_use]
    pub fn ports(&self) -> &[PortDescriptor] {
        match self {
            ResolvedKind::Concrete(kind) => &kind.ports,
            ResolvedKind::Placeholder { ports, .. } => ports,
        }
    }
}

/// Resolve one persisted node against the registry, degrading to a
/// placeholder when the kind is unknown.
#[must_use]
pub fn resolve_kind(
    node: &NodeData,
    edges: &[EdgeData],
    registry: &DescriptorRegistry,
) -> ResolvedKind {
    match registry.resolve(&node.kind) {
        Some(kind) => ResolvedKind::Concrete(kind),
        None => {
            tracing::warn!(node = %node.id, kind = %node.kind, "unresolved node kind; using placeholder");
            ResolvedKind::Placeholder {
                kind_name: node.kind.clone(),
                ports: reconstruct_ports(node, edges),
            }
        }
    }
}

/// Rebuild a placeholder's port list from its incident edges.
///
/// Every reconstructed port is unit/unit: the original types are unknown,
/// but direction and name survive, which is enough for the editor to keep
/// the node's existing connections on screen. The persisted wiring hook of
/// source endpoints is carried over. First sighting of a port name wins.
fn reconstruct_ports(node: &NodeData, edges: &[EdgeData]) -> Vec<PortDescriptor> {
    let mut ports: Vec<PortDescriptor> = Vec::new();
    let mut seen = rustc_hash::FxHashSet::default();

    for edge in edges {
        if edge.from.node == node.id {
            if seen.insert(edge.from.port.clone()) {
                let mut port = PortDescriptor::output(
                    edge.from.port.clone(),
                    ValueType::unit(),
                    ValueType::unit(),
                );
                if let Some(hook) = &edge.from.wiring_hook {
                    port = port.with_wiring_hook(hook.clone());
                }
                ports.push(port);
            }
        } else if edge.to.node == node.id && seen.insert(edge.to.port.clone()) {
            ports.push(PortDescriptor::input(
                edge.to.port.clone(),
                ValueType::unit(),
                ValueType::unit(),
            ));
        }
    }

    ports
}
