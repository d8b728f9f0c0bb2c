//! Executes a hand-expanded version of what the code generator emits,
//! pinning the contract between generated programs and the port runtime.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use flowgraph::ports::{FlowError, FlowInput, FlowOutput};
use flowgraph::{CompiledFlow, Injector};
use tokio_util::sync::CancellationToken;

/// Emits a boolean read from its injected configuration when triggered.
struct ProbeNode {
    run: FlowInput<(), ()>,
    on_probe: FlowOutput<bool, ()>,
}

impl ProbeNode {
    fn new(flag: bool) -> Arc<Self> {
        Arc::new_cyclic(|node: &Weak<Self>| {
            let weak = node.clone();
            ProbeNode {
                run: FlowInput::new(move |(), cancel| {
                    let weak = weak.clone();
                    async move {
                        let node = weak.upgrade().ok_or(FlowError::NodeDropped)?;
                        node.on_probe.invoke(flag, &cancel).await
                    }
                }),
                on_probe: FlowOutput::new(),
            }
        })
    }
}

/// Counts how many times it was triggered.
struct TallyNode {
    bump: FlowInput<(), ()>,
    #[allow(dead_code)]
    count: Arc<AtomicUsize>,
}

impl TallyNode {
    fn new(count: Arc<AtomicUsize>) -> Arc<Self> {
        let counter = count.clone();
        Arc::new(TallyNode {
            bump: FlowInput::new(move |(), _cancel| {
                let count = counter.clone();
                async move {
                    count.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }),
            count,
        })
    }
}

/// The shape the generator emits for:
/// Enter -> Probe -> If -> (on_true) Tally
struct BranchingFlow;

#[async_trait::async_trait]
impl CompiledFlow for BranchingFlow {
    #[allow(unused_variables)]
    async fn run(&self, inject: &Injector, cancel: CancellationToken) -> Result<(), FlowError> {
        let enternode = flowgraph::nodes::EnterNode::new();
        let probenode = ProbeNode::new(inject.get::<bool>(None));
        let ifnode = flowgraph::nodes::IfNode::new();
        let tallynode = TallyNode::new(inject.get::<Arc<AtomicUsize>>(Some("tally")));
        enternode.on_enter.add_target(probenode.run.method());
        probenode.on_probe.add_target(ifnode.condition.method());
        ifnode.on_true.add_target(tallynode.bump.method());
        enternode.on_enter.invoke((), &cancel).await?;
        Ok(())
    }
}

#[tokio::test]
async fn a_true_probe_reaches_the_tally() {
    flowgraph::telemetry::init();
    let count = Arc::new(AtomicUsize::new(0));
    let inject = Injector::new()
        .with(true)
        .with_keyed("tally", count.clone());

    BranchingFlow
        .run(&inject, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_false_probe_is_inert_on_the_unwired_branch() {
    let count = Arc::new(AtomicUsize::new(0));
    // No boolean binding: the injector's permissive default (false) routes
    // execution to the unwired on_false output, which is a no-op.
    let inject = Injector::new().with_keyed("tally", count.clone());

    BranchingFlow
        .run(&inject, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
