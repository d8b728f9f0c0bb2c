//! Failure type surfaced by port invocation strategies.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced by continuation targets during flow execution.
///
/// The port runtime never catches or logs these itself; whichever invocation
/// strategy is in use surfaces the failure to its caller, and the enclosing
/// node or host decides between recovery and propagation.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum FlowError {
    /// The cooperative cancellation token was triggered and the target
    /// stopped in response.
    #[error("flow invocation cancelled")]
    #[diagnostic(code(flowgraph::ports::cancelled))]
    Cancelled,

    /// A continuation target failed.
    #[error("flow node failed: {message}")]
    #[diagnostic(code(flowgraph::ports::node))]
    Node { message: String },

    /// An input port's method was invoked after its node was dropped.
    #[error("flow node dropped before its input port was invoked")]
    #[diagnostic(
        code(flowgraph::ports::node_dropped),
        help("Keep every node of a running graph alive for the duration of the run.")
    )]
    NodeDropped,
}

impl FlowError {
    /// Convenience constructor for a node failure.
    pub fn node(message: impl Into<String>) -> Self {
        FlowError::Node {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_constructor_carries_message() {
        let err = FlowError::node("boom");
        assert!(matches!(err, FlowError::Node { message } if message == "boom"));
    }
}
