//! Output ports and their invocation strategies.

use std::sync::{Arc, RwLock};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;

use super::error::FlowError;

/// A continuation target: the callable entry point of a connected input port.
///
/// Targets are cheaply clonable closures so one input can be wired to any
/// number of outputs.
pub type InvokeTarget<P, R> =
    Arc<dyn Fn(P, CancellationToken) -> BoxFuture<'static, Result<R, FlowError>> + Send + Sync>;

/// An output port holding an ordered list of continuation targets.
///
/// Targets are appended during graph wiring, a single-threaded,
/// pre-execution phase, and the list is treated as read-only once the graph
/// runs. Connection order is preserved and is the result order of the
/// all-targets strategies.
///
/// `P` is the parameter type passed to every target; `R` is the result type
/// each target produces. Flow-only ports use `()` for both.
pub struct FlowOutput<P = (), R = ()> {
    name: Option<String>,
    targets: RwLock<Vec<InvokeTarget<P, R>>>,
}

impl<P, R> Default for FlowOutput<P, R> {
    fn default() -> Self {
        FlowOutput {
            name: None,
            targets: RwLock::new(Vec::new()),
        }
    }
}

impl<P, R> FlowOutput<P, R>
where
    P: Clone + Send + 'static,
    R: Send + 'static,
{
    /// Create an unnamed output port with no targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an output port with an explicit display name, e.g. one case
    /// port per enum variant on a switch node.
    pub fn with_name(name: impl Into<String>) -> Self {
        FlowOutput {
            name: Some(name.into()),
            targets: RwLock::new(Vec::new()),
        }
    }

    /// Display name override, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Append a continuation target. Called once per connected input port
    /// while the graph is being wired.
    pub fn add_target(&self, target: InvokeTarget<P, R>) {
        self.targets
            .write()
            .expect("port target list lock poisoned")
            .push(target);
    }

    /// Number of connected targets.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets
            .read()
            .expect("port target list lock poisoned")
            .len()
    }

    /// Start every target with a clone of `param` and the given token,
    /// returning the in-flight futures in connection order.
    fn start_all(
        &self,
        param: &P,
        cancel: &CancellationToken,
    ) -> Vec<BoxFuture<'static, Result<R, FlowError>>> {
        self.targets
            .read()
            .expect("port target list lock poisoned")
            .iter()
            .map(|target| target(param.clone(), cancel.clone()))
            .collect()
    }

    /// Fire every target concurrently, wait until all complete, discard
    /// results.
    ///
    /// On failure, the remaining targets still run to completion before the
    /// first failure (in connection order) is propagated. The strategy never
    /// cancels on its own; cancellation is driven only by the passed-in
    /// token. Zero connected targets return immediately.
    pub async fn invoke(&self, param: P, cancel: &CancellationToken) -> Result<(), FlowError> {
        let started = self.start_all(&param, cancel);
        if started.is_empty() {
            return Ok(());
        }
        for result in join_all(started).await {
            result?;
        }
        Ok(())
    }

    /// Fire every target concurrently and collect each typed result into a
    /// sequence matching connection order.
    ///
    /// Zero connected targets yield an empty sequence. Failure handling
    /// matches [`invoke`](Self::invoke): all targets run to completion, then
    /// the first failure in connection order is propagated.
    pub async fn invoke_all(
        &self,
        param: P,
        cancel: &CancellationToken,
    ) -> Result<Vec<R>, FlowError> {
        let started = self.start_all(&param, cancel);
        if started.is_empty() {
            return Ok(Vec::new());
        }
        join_all(started).await.into_iter().collect()
    }

    /// Race every target and return the first completion, success or
    /// failure.
    ///
    /// All targets share one child token derived from `cancel`; once a
    /// winner resolves, the child token is cancelled so the remaining
    /// targets are asked to stop. Cancellation is advisory: losers stop
    /// cooperatively, not preemptively.
    ///
    /// Zero connected targets yield `R::default()`, not a failure. A caller
    /// cannot distinguish that case from a target legitimately returning the
    /// default value.
    pub async fn invoke_any(&self, param: P, cancel: &CancellationToken) -> Result<R, FlowError>
    where
        R: Default,
    {
        let shared = cancel.child_token();
        let mut in_flight: FuturesUnordered<_> = self
            .targets
            .read()
            .expect("port target list lock poisoned")
            .iter()
            .map(|target| target(param.clone(), shared.clone()))
            .collect();

        match in_flight.next().await {
            None => Ok(R::default()),
            Some(first) => {
                shared.cancel();
                first
            }
        }
    }

    /// Fire every target concurrently and stream results as each target
    /// completes, in completion order (not connection order).
    ///
    /// The stream is lazy, finite and non-restartable: targets make progress
    /// only while the stream is polled. Stopping enumeration early does not
    /// signal cancellation to outstanding targets; cancel the shared token
    /// yourself to ask them to stop. Zero connected targets produce an
    /// empty, already-finished stream.
    pub fn invoke_each(
        &self,
        param: P,
        cancel: &CancellationToken,
    ) -> FuturesUnordered<BoxFuture<'static, Result<R, FlowError>>> {
        self.start_all(&param, cancel).into_iter().collect()
    }
}

impl<P, R> std::fmt::Debug for FlowOutput<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowOutput")
            .field("name", &self.name)
            .field(
                "targets",
                &self
                    .targets
                    .read()
                    .map(|targets| targets.len())
                    .unwrap_or(0),
            )
            .finish()
    }
}

/// Wrap an async closure into an [`InvokeTarget`].
///
/// This is the building block [`FlowInput`](super::FlowInput) uses for its
/// method, exposed for tests and hand-wired graphs.
pub fn target<P, R, F, Fut>(method: F) -> InvokeTarget<P, R>
where
    P: Send + 'static,
    R: Send + 'static,
    F: Fn(P, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, FlowError>> + Send + 'static,
{
    Arc::new(move |param, cancel| method(param, cancel).boxed())
}
