//! Port invocation runtime: the asynchronous fan-out/fan-in primitives that
//! generated flow code is wired with.
//!
//! A node exposes its connection points as ports. An output port
//! ([`FlowOutput`]) holds an ordered list of continuation targets, one per
//! connected input port, in connection order. An input port ([`FlowInput`])
//! exposes exactly one callable entry point, its *method*, which output
//! strategies invoke. Ports that carry no parameter or result use the unit
//! type `()` so every port shares one generic shape.
//!
//! # Invocation strategies
//!
//! All four strategies take a parameter value and a cooperative
//! [`CancellationToken`](tokio_util::sync::CancellationToken):
//!
//! - [`FlowOutput::invoke`]: fire every target, wait for all, discard
//!   results. The first failure in connection order is propagated after all
//!   targets have run to completion.
//! - [`FlowOutput::invoke_all`]: same discipline, collecting each target's
//!   typed result into a sequence matching connection order.
//! - [`FlowOutput::invoke_any`]: race every target on a derived child
//!   token; the first completion wins, the child token is cancelled, and the
//!   winner's result is returned.
//! - [`FlowOutput::invoke_each`]: a lazy stream of results in completion
//!   order.
//!
//! A port with zero continuation targets is a valid, inert no-op; see each
//! strategy for its zero-target behavior.
//!
//! # Example
//!
//! ```rust
//! use flowgraph::ports::{FlowInput, FlowOutput};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn demo() -> Result<(), flowgraph::FlowError> {
//!     let output: FlowOutput<i32, i32> = FlowOutput::new();
//!     let double = FlowInput::new(|value: i32, _cancel| async move { Ok(value * 2) });
//!     output.add_target(double.method());
//!
//!     let results = output.invoke_all(21, &CancellationToken::new()).await?;
//!     assert_eq!(results, vec![42]);
//!     Ok(())
//! }
//! ```

mod error;
mod input;
mod output;

pub use error::FlowError;
pub use input::FlowInput;
pub use output::{FlowOutput, InvokeTarget, target};
