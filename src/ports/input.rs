//! Input ports: the single callable entry point of a node.

use tokio_util::sync::CancellationToken;

use super::error::FlowError;
use super::output::{InvokeTarget, target};

/// An input port wrapping the async method a node runs when triggered.
///
/// Every input port exposes exactly one callable entry point, its
/// [`method`](Self::method), which output strategies invoke. Ports without a
/// parameter or result use `()` so all ports share one generic shape.
pub struct FlowInput<P = (), R = ()> {
    name: Option<String>,
    method: InvokeTarget<P, R>,
}

impl<P, R> FlowInput<P, R>
where
    P: Send + 'static,
    R: Send + 'static,
{
    /// Create an input port from an async method.
    ///
    /// ```rust
    /// use flowgraph::ports::FlowInput;
    ///
    /// let negate = FlowInput::new(|value: bool, _cancel| async move { Ok(!value) });
    /// assert!(negate.name().is_none());
    /// ```
    pub fn new<F, Fut>(method: F) -> Self
    where
        F: Fn(P, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, FlowError>> + Send + 'static,
    {
        FlowInput {
            name: None,
            method: target(method),
        }
    }

    /// Create a named input port, e.g. when the display name differs from
    /// the field name.
    pub fn with_name<F, Fut>(name: impl Into<String>, method: F) -> Self
    where
        F: Fn(P, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, FlowError>> + Send + 'static,
    {
        FlowInput {
            name: Some(name.into()),
            method: target(method),
        }
    }

    /// Wrap an existing continuation target as an input port.
    pub fn from_target(method: InvokeTarget<P, R>) -> Self {
        FlowInput { name: None, method }
    }

    /// Display name override, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The callable entry point of this port. Cloning is cheap; wiring hands
    /// one clone to each connected output.
    #[must_use]
    pub fn method(&self) -> InvokeTarget<P, R> {
        self.method.clone()
    }

    /// Invoke the port's method directly.
    pub async fn call(&self, param: P, cancel: &CancellationToken) -> Result<R, FlowError> {
        (self.method)(param, cancel.clone()).await
    }
}

impl<P, R> std::fmt::Debug for FlowInput<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowInput").field("name", &self.name).finish()
    }
}
