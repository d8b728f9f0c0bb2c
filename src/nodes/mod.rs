//! Built-in node kinds and their registrations.
//!
//! Three kinds ship with the crate:
//!
//! - [`EnterNode`]: the entry point every graph starts from
//! - [`IfNode`]: boolean branch
//! - [`SwitchNode`]: enum-keyed branch over any registered enum (generic)
//!
//! Each kind self-registers its port list and constructor shape into the
//! [`DescriptorRegistry`](crate::registry::DescriptorRegistry);
//! [`register_builtins`] installs all of them and is invoked automatically
//! for the process-wide registry.
//!
//! User-defined kinds follow the same pattern: a struct holding
//! [`FlowInput`](crate::ports::FlowInput)/[`FlowOutput`](crate::ports::FlowOutput)
//! fields, a `new` constructor returning `Arc<Self>`, and a
//! [`KindRegistration`](crate::registry::KindRegistration) describing ports
//! and constructor parameters.

mod branch;
mod enter;
mod switch;

pub use branch::IfNode;
pub use enter::EnterNode;
pub use switch::SwitchNode;

use crate::registry::DescriptorRegistry;

/// Kind name of the entry-point node.
pub const ENTER_KIND: &str = "flowgraph::nodes::EnterNode";
/// Kind name of the boolean branch node.
pub const IF_KIND: &str = "flowgraph::nodes::IfNode";
/// Unconstructed kind name of the enum-keyed branch node.
pub const SWITCH_KIND: &str = "flowgraph::nodes::SwitchNode";

/// Register the built-in kinds into a registry. Call once per registry; the
/// process-wide registry does this on first access.
pub fn register_builtins(registry: &DescriptorRegistry) {
    registry
        .register(enter::registration())
        .expect("Enter kind registers once");
    registry
        .register(branch::registration())
        .expect("If kind registers once");
    registry
        .register_generic(switch::generic_registration())
        .expect("Switch kind registers once");
}
