//! Boolean branch node.

use std::sync::{Arc, Weak};

use crate::ports::{FlowError, FlowInput, FlowOutput};
use crate::registry::{KindRegistration, PortDescriptor, folders};
use crate::types::ValueType;

use super::IF_KIND;

/// Branches execution on a boolean condition: `on_true` when the received
/// value is true, `on_false` otherwise. Branching happens at run time by
/// selectively invoking one of the two outputs; it is not a compiler-level
/// construct.
#[derive(Debug)]
pub struct IfNode {
    /// Receives the condition to check.
    pub condition: FlowInput<bool, ()>,
    /// Triggered when the condition is true.
    pub on_true: FlowOutput<(), ()>,
    /// Triggered when the condition is false.
    pub on_false: FlowOutput<(), ()>,
}

impl IfNode {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|node: &Weak<Self>| {
            let weak = node.clone();
            IfNode {
                condition: FlowInput::new(move |condition: bool, cancel| {
                    let weak = weak.clone();
                    async move {
                        let node = weak.upgrade().ok_or(FlowError::NodeDropped)?;
                        if condition {
                            node.on_true.invoke((), &cancel).await
                        } else {
                            node.on_false.invoke((), &cancel).await
                        }
                    }
                }),
                on_true: FlowOutput::new(),
                on_false: FlowOutput::new(),
            }
        })
    }
}

/// Registration installed by [`register_builtins`](super::register_builtins).
pub(super) fn registration() -> KindRegistration {
    KindRegistration::new(IF_KIND, "If")
        .in_folder(folders::CONTROL_FLOW)
        .with_port(PortDescriptor::input(
            "condition",
            ValueType::of::<bool>(),
            ValueType::unit(),
        ))
        .with_port(PortDescriptor::output(
            "on_true",
            ValueType::unit(),
            ValueType::unit(),
        ))
        .with_port(PortDescriptor::output(
            "on_false",
            ValueType::unit(),
            ValueType::unit(),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::target;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn true_condition_fires_only_on_true() {
        let hits = Arc::new(AtomicUsize::new(0));
        let misses = Arc::new(AtomicUsize::new(0));

        let node = IfNode::new();
        let hits_in = hits.clone();
        node.on_true.add_target(target(move |(), _| {
            let hits = hits_in.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }));
        let misses_in = misses.clone();
        node.on_false.add_target(target(move |(), _| {
            let misses = misses_in.clone();
            async move {
                misses.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }));

        node.condition
            .call(true, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(misses.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unwired_branch_is_a_no_op() {
        let node = IfNode::new();
        // Neither output is wired; both conditions are inert.
        node.condition
            .call(false, &CancellationToken::new())
            .await
            .unwrap();
    }
}
