//! Entry-point node: where graph execution starts.

use std::sync::Arc;

use crate::ports::FlowOutput;
use crate::registry::{KindRegistration, PortDescriptor, folders};
use crate::types::ValueType;

use super::ENTER_KIND;

/// The entry point of a flow graph. Generated code invokes
/// [`on_enter`](Self::on_enter) once the graph is wired; exactly one Enter
/// node must exist per graph.
#[derive(Debug)]
pub struct EnterNode {
    /// Triggered when the graph starts.
    pub on_enter: FlowOutput<(), ()>,
}

impl EnterNode {
    pub fn new() -> Arc<Self> {
        Arc::new(EnterNode {
            on_enter: FlowOutput::new(),
        })
    }
}

/// Registration installed by [`register_builtins`](super::register_builtins).
pub(super) fn registration() -> KindRegistration {
    KindRegistration::new(ENTER_KIND, "Enter")
        .in_folder(folders::APPLICATION)
        .with_port(PortDescriptor::output(
            "on_enter",
            ValueType::unit(),
            ValueType::unit(),
        ))
}
