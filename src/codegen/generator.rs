//! Depth-first code generation over a validated graph.

use miette::Diagnostic;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::instrument;

use crate::graph::{EdgeData, ValidatedGraph};
use crate::types::NodeId;

use super::names::{NameAllocator, type_name_for};
use super::program::{GeneratedProgram, Statement};

/// Errors raised while emitting code for a validated graph.
#[derive(Debug, Error, Diagnostic)]
pub enum CodegenError {
    /// The Enter kind declares no output port to start execution from.
    #[error("enter kind '{kind}' declares no output port")]
    #[diagnostic(code(flowgraph::codegen::missing_entry_output))]
    MissingEntryOutput { kind: String },

    /// An edge references a node absent from the validated snapshot. The
    /// editor enforces edge integrity, so this indicates a corrupted graph.
    #[error("edge references node '{node}' missing from the graph snapshot")]
    #[diagnostic(code(flowgraph::codegen::unknown_node))]
    UnknownNode { node: NodeId },
}

/// Generate the program for a validated graph snapshot.
///
/// The traversal is depth-first with memoization, starting from the unique
/// Enter node:
///
/// - a node already visited returns its assigned variable name without
///   re-emitting its construction, so shared nodes and cycles stay finite
///   and single-instance: every node is constructed exactly once
///   regardless of in-degree;
/// - first visits emit one construction statement, then walk outgoing edges
///   in declaration order, recursing into each destination before emitting
///   the wiring statement for that edge;
/// - after the traversal one final statement invokes the Enter node's sole
///   output.
///
/// Output is deterministic for a given graph: same input, same statements,
/// same names.
#[instrument(skip_all, fields(graph = %validated.graph().name))]
pub fn generate(validated: &ValidatedGraph<'_>) -> Result<GeneratedProgram, CodegenError> {
    let graph = validated.graph();
    let mut emitter = Emitter {
        validated,
        names: NameAllocator::new(),
        visited: FxHashSet::default(),
        assigned: FxHashMap::default(),
        statements: Vec::new(),
    };

    let enter_name = emitter.visit(validated.enter_id())?;
    let enter_kind = validated
        .registration(validated.enter_id())
        .ok_or_else(|| CodegenError::UnknownNode {
            node: validated.enter_id().clone(),
        })?;
    let entry_port = enter_kind
        .outputs()
        .next()
        .ok_or_else(|| CodegenError::MissingEntryOutput {
            kind: enter_kind.kind_name.clone(),
        })?;
    emitter.statements.push(Statement::Invoke {
        node: enter_name,
        port: entry_port.name.clone(),
    });

    tracing::debug!(
        statements = emitter.statements.len(),
        "generated flow program"
    );
    Ok(GeneratedProgram {
        graph_id: graph.id.clone(),
        graph_name: graph.name.clone(),
        type_name: type_name_for(&graph.name),
        statements: emitter.statements,
    })
}

struct Emitter<'a, 'g> {
    validated: &'a ValidatedGraph<'g>,
    names: NameAllocator,
    visited: FxHashSet<NodeId>,
    assigned: FxHashMap<NodeId, String>,
    statements: Vec<Statement>,
}

impl Emitter<'_, '_> {
    /// Visit a node, returning its variable name. Emits the construction
    /// statement and the wiring for its outgoing edges on first visit only;
    /// re-entry (shared nodes, cycles) returns the memoized name.
    fn visit(&mut self, id: &NodeId) -> Result<String, CodegenError> {
        if !self.visited.insert(id.clone()) {
            return Ok(self
                .assigned
                .get(id)
                .cloned()
                .expect("visited node always has an assigned name"));
        }

        let kind = self
            .validated
            .registration(id)
            .cloned()
            .ok_or_else(|| CodegenError::UnknownNode { node: id.clone() })?;

        let name = self.names.allocate(kind.short_name());
        self.assigned.insert(id.clone(), name.clone());

        let args = kind
            .constructor_params
            .iter()
            .map(|param| match &param.inject_key {
                Some(key) => format!(
                    "inject.get::<{}>(Some({:?}))",
                    param.value_type.full_name(),
                    key
                ),
                None => format!("inject.get::<{}>(None)", param.value_type.full_name()),
            })
            .collect();
        self.statements.push(Statement::Construct {
            name: name.clone(),
            rust_path: kind.rust_path.clone(),
            args,
        });

        let outgoing: Vec<EdgeData> = self.validated.graph().edges_from(id).cloned().collect();
        for edge in outgoing {
            let to_name = self.visit(&edge.to.node)?;
            // The registry's descriptor is authoritative for the wiring
            // hook; the persisted edge carries it only for placeholders.
            let hook = kind
                .port(&edge.from.port)
                .and_then(|port| port.wiring_hook.clone())
                .or(edge.from.wiring_hook);
            self.statements.push(Statement::Wire {
                from_node: name.clone(),
                from_port: edge.from.port,
                hook,
                to_node: to_name,
                to_port: edge.to.port,
            });
        }

        Ok(name)
    }
}
