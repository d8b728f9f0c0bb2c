//! Structural validation: the save/compile-time gate.

use std::sync::Arc;

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::nodes;
use crate::registry::{DescriptorRegistry, KindRegistration};
use crate::types::NodeId;

use super::data::GraphData;

/// One structural problem found during validation.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum StructuralProblem {
    /// No node of the Enter kind exists.
    #[error("graph has no Enter node")]
    #[diagnostic(code(flowgraph::graph::missing_enter))]
    MissingEnter,

    /// More than one node of the Enter kind exists.
    #[error("graph has {} Enter nodes: {}", .nodes.len(), join_ids(.nodes))]
    #[diagnostic(code(flowgraph::graph::multiple_enter))]
    MultipleEnter { nodes: Vec<NodeId> },

    /// A node references a kind that cannot be resolved.
    #[error("node {node} references unresolved kind '{kind}'")]
    #[diagnostic(code(flowgraph::graph::unresolved_kind))]
    UnresolvedKind { node: NodeId, kind: String },
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Blocking diagnostic raised when a graph fails structural validation.
///
/// Every problem found in one pass is listed (not just the first) so the
/// user can fix them all before retrying. Persistence and compilation are
/// refused until the graph validates.
#[derive(Debug, Error, Diagnostic)]
#[error("graph '{graph}' failed structural validation with {} problem(s)", .problems.len())]
#[diagnostic(
    code(flowgraph::graph::structural),
    help("Fix every listed node before saving or compiling the graph.")
)]
pub struct GraphValidationError {
    pub graph: String,
    #[related]
    pub problems: Vec<StructuralProblem>,
}

/// A validated snapshot of a graph, ready for code generation.
///
/// Holds the resolved registration for every node plus the unique Enter
/// node's id. The compiler reads this snapshot only; it never re-validates.
#[derive(Debug)]
pub struct ValidatedGraph<'a> {
    graph: &'a GraphData,
    resolved: FxHashMap<NodeId, Arc<KindRegistration>>,
    enter: NodeId,
}

impl<'a> ValidatedGraph<'a> {
    #[must_use]
    pub fn graph(&self) -> &'a GraphData {
        self.graph
    }

    /// The unique Enter node's id.
    #[must_use]
    pub fn enter_id(&self) -> &NodeId {
        &self.enter
    }

    /// Resolved registration for a node of this graph.
    #[must_use]
    pub fn registration(&self, id: &NodeId) -> Option<&Arc<KindRegistration>> {
        self.resolved.get(id)
    }
}

/// Validate a graph snapshot against the registry.
///
/// Checks, in one pass over all nodes:
/// - every node's kind resolves (directly or as a constructed generic),
/// - exactly one node of the Enter kind exists.
///
/// Unconnected ports are not an error: a port with zero continuation
/// targets is a valid, inert no-op at run time.
pub fn validate<'a>(
    graph: &'a GraphData,
    registry: &DescriptorRegistry,
) -> Result<ValidatedGraph<'a>, GraphValidationError> {
    let mut problems = Vec::new();
    let mut resolved = FxHashMap::default();
    let mut enter_nodes = Vec::new();

    for node in &graph.nodes {
        match registry.resolve(&node.kind) {
            Some(kind) => {
                if kind.kind_name == nodes::ENTER_KIND {
                    enter_nodes.push(node.id.clone());
                }
                resolved.insert(node.id.clone(), kind);
            }
            None => problems.push(StructuralProblem::UnresolvedKind {
                node: node.id.clone(),
                kind: node.kind.clone(),
            }),
        }
    }

    match enter_nodes.len() {
        0 => problems.push(StructuralProblem::MissingEnter),
        1 => {}
        _ => problems.push(StructuralProblem::MultipleEnter {
            nodes: enter_nodes.clone(),
        }),
    }

    if !problems.is_empty() {
        tracing::warn!(
            graph = %graph.name,
            problem_count = problems.len(),
            "graph failed structural validation"
        );
        return Err(GraphValidationError {
            graph: graph.name.clone(),
            problems,
        });
    }

    let enter = enter_nodes.remove(0);
    Ok(ValidatedGraph {
        graph,
        resolved,
        enter,
    })
}
