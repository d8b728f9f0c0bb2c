//! Graph compiler: turns a validated graph snapshot into a flat Rust
//! program.
//!
//! The generator performs a dependency-aware depth-first traversal from the
//! unique Enter node and emits a deterministic, deduplicated sequence of
//! instantiation and wiring statements. Sharing and cycles are handled by
//! memoization: every reachable node is constructed exactly once regardless
//! of its in-degree, and a cycle is cut the second time its entry node is
//! reached.
//!
//! The emitted program is flat and linear, with no conditionals beyond what
//! individual node kinds implement internally. Branching nodes are ordinary
//! nodes whose output ports are selectively invoked at run time.
//!
//! [`OutputDir`] owns the generated files' lifecycle: regeneration on graph
//! change, deletion of files for removed graphs, and rebuilding graphs that
//! lost their implementation-type association.
//!
//! # Example
//!
//! ```rust
//! use flowgraph::codegen::generate;
//! use flowgraph::graph::{GraphData, NodeData, PortRef, validate};
//! use flowgraph::nodes;
//! use flowgraph::registry::{DescriptorRegistry, KindRegistration, PortDescriptor};
//! use flowgraph::types::ValueType;
//!
//! let registry = DescriptorRegistry::new();
//! nodes::register_builtins(&registry);
//! registry
//!     .register(
//!         KindRegistration::new("demo::GreetNode", "Greet").with_port(
//!             PortDescriptor::input("greet", ValueType::unit(), ValueType::unit()),
//!         ),
//!     )
//!     .unwrap();
//!
//! let mut graph = GraphData::new("greeting");
//! let enter = graph.add_node(NodeData::new(nodes::ENTER_KIND));
//! let greet = graph.add_node(NodeData::new("demo::GreetNode"));
//! graph.add_edge(
//!     PortRef::new(enter, "on_enter"),
//!     PortRef::new(greet, "greet"),
//! );
//!
//! let validated = validate(&graph, &registry).unwrap();
//! let program = generate(&validated).unwrap();
//! assert_eq!(program.constructs().count(), 2);
//! assert!(program.source().contains("demo::GreetNode::new()"));
//! ```

mod generator;
mod names;
mod output;
mod program;

pub use generator::{CodegenError, generate};
pub use output::{
    CodegenConfig, CodegenDiagnostic, GENERATED_EXTENSION, OutputDir, OutputError,
    RegenerateError, SyncReport,
};
pub use program::{GeneratedProgram, Statement};
