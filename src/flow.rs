//! The interface implemented by generated flow programs.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::inject::Injector;
use crate::ports::FlowError;

/// A compiled flow graph: one top-level callable type per graph.
///
/// The code generator emits exactly one implementation of this trait per
/// graph. Running it constructs one instance per reachable node, wires every
/// output port to its connected input methods, and invokes the Enter node's
/// output to start execution.
///
/// Cancellation is cooperative: the token is threaded through every port
/// invocation and nodes are expected to observe it at their own suspension
/// points.
///
/// ```rust
/// use flowgraph::{CompiledFlow, FlowError, Injector};
/// use tokio_util::sync::CancellationToken;
///
/// struct EmptyFlow;
///
/// #[async_trait::async_trait]
/// impl CompiledFlow for EmptyFlow {
///     async fn run(
///         &self,
///         _inject: &Injector,
///         _cancel: CancellationToken,
///     ) -> Result<(), FlowError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait CompiledFlow: Send + Sync {
    /// Run this graph to completion given an injected-value provider and a
    /// cooperative cancellation token.
    async fn run(&self, inject: &Injector, cancel: CancellationToken) -> Result<(), FlowError>;
}
