//! # Flowgraph: node-and-port control flow, compiled to Rust
//!
//! Flowgraph lets users author executable control-flow logic as a
//! node-and-port graph and turns that graph into runnable sequential code.
//! Two tightly coupled pieces form the core: the **graph compiler**, which
//! walks a possibly-shared, possibly-cyclic directed graph and emits a
//! deterministic, deduplicated sequence of instantiation and wiring
//! statements; and the **port invocation runtime**, the asynchronous
//! fan-out/fan-in semantics that the generated code is wired with.
//!
//! ## Core Concepts
//!
//! - **Node kinds**: self-registered descriptions of constructible nodes:
//!   ports, constructor shape, menu metadata
//! - **Ports**: typed connection points; outputs hold continuation targets,
//!   inputs expose one callable method
//! - **Graph**: the persisted node/edge/group records an editor produces
//! - **Compiler**: DFS-with-memoization code generation from the Enter node
//! - **Injection**: generated constructors pull their parameters from a
//!   type-indexed provider
//!
//! ## Quick Start
//!
//! ### Describing and compiling a graph
//!
//! ```rust
//! use flowgraph::codegen::generate;
//! use flowgraph::graph::{GraphData, NodeData, PortRef, validate};
//! use flowgraph::nodes;
//! use flowgraph::registry::{DescriptorRegistry, KindRegistration, PortDescriptor};
//! use flowgraph::types::ValueType;
//!
//! // Register the kinds this graph uses. The process-wide registry
//! // (`DescriptorRegistry::global()`) carries the built-ins already.
//! let registry = DescriptorRegistry::new();
//! nodes::register_builtins(&registry);
//! registry
//!     .register(
//!         KindRegistration::new("demo::QuestNode", "Quest")
//!             .with_constructor_param(ValueType::of::<String>(), Some("quest_id"))
//!             .with_port(PortDescriptor::input("start", ValueType::unit(), ValueType::unit())),
//!     )
//!     .unwrap();
//!
//! // Author a graph the way the editor would.
//! let mut graph = GraphData::new("intro quest");
//! let enter = graph.add_node(NodeData::new(nodes::ENTER_KIND));
//! let quest = graph.add_node(NodeData::new("demo::QuestNode"));
//! graph.add_edge(
//!     PortRef::new(enter, "on_enter"),
//!     PortRef::new(quest, "start"),
//! );
//!
//! // Validate, then emit the program.
//! let validated = validate(&graph, &registry).unwrap();
//! let program = generate(&validated).unwrap();
//! assert!(program.source().contains("inject.get::<alloc::string::String>(Some(\"quest_id\"))"));
//! ```
//!
//! ### Wiring ports by hand
//!
//! The same primitives generated code uses are available directly:
//!
//! ```rust
//! use flowgraph::ports::{FlowInput, FlowOutput};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn fan_out() -> Result<(), flowgraph::FlowError> {
//!     let output: FlowOutput<i32, i32> = FlowOutput::new();
//!     let double = FlowInput::new(|v: i32, _| async move { Ok(v * 2) });
//!     let square = FlowInput::new(|v: i32, _| async move { Ok(v * v) });
//!     output.add_target(double.method());
//!     output.add_target(square.method());
//!
//!     // Results arrive in connection order, independent of timing.
//!     let results = output.invoke_all(3, &CancellationToken::new()).await?;
//!     assert_eq!(results, vec![6, 9]);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Guide
//!
//! - [`types`] - Node ids and wire-type descriptors
//! - [`ports`] - The four invocation strategies and port primitives
//! - [`registry`] - Kind/type registration, discovery, generic instantiation
//! - [`graph`] - Persisted records, placeholder resolution, validation
//! - [`codegen`] - Code generation and generated-file lifecycle
//! - [`nodes`] - Built-in kinds: Enter, If, Switch
//! - [`inject`] - The injected-value provider generated constructors use
//! - [`flow`] - The [`CompiledFlow`] interface generated programs implement

pub mod codegen;
pub mod flow;
pub mod graph;
pub mod inject;
pub mod nodes;
pub mod ports;
pub mod registry;
pub mod telemetry;
pub mod types;

pub use flow::CompiledFlow;
pub use inject::Injector;
pub use ports::{FlowError, FlowInput, FlowOutput, InvokeTarget};
