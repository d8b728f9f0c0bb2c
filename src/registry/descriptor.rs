//! Port and kind descriptors: the registered shape of a node kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::ValueType;

/// Standard folder names used to organize kinds in the node creation menu.
pub mod folders {
    /// Application-level kinds (entry points, host hooks).
    pub const APPLICATION: &str = "Application";
    /// Kinds that manage the flow of execution.
    pub const CONTROL_FLOW: &str = "Control Flow";
    /// Default folder for user-defined kinds.
    pub const CUSTOM: &str = "Custom";
}

/// Direction of a port: whether it receives or drives invocations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// Metadata about one port of a node kind.
///
/// The `name` is the Rust field name used in generated wiring statements and
/// is unique within its kind; `display_name` is what the editor shows. A
/// port may declare a [`wiring_hook`](Self::wiring_hook): the name of a
/// method on the node that replaces the default connect operation, used by
/// fan-out ports that are logically one named output backed by multiple
/// physical outputs (one case per enum value).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescriptor {
    pub name: String,
    pub display_name: String,
    pub direction: PortDirection,
    pub parameter: ValueType,
    pub result: ValueType,
    pub wiring_hook: Option<String>,
}

impl PortDescriptor {
    /// Describe an input port.
    pub fn input(name: impl Into<String>, parameter: ValueType, result: ValueType) -> Self {
        let name = name.into();
        PortDescriptor {
            display_name: name.clone(),
            name,
            direction: PortDirection::Input,
            parameter,
            result,
            wiring_hook: None,
        }
    }

    /// Describe an output port.
    pub fn output(name: impl Into<String>, parameter: ValueType, result: ValueType) -> Self {
        let name = name.into();
        PortDescriptor {
            display_name: name.clone(),
            name,
            direction: PortDirection::Output,
            parameter,
            result,
            wiring_hook: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_wiring_hook(mut self, hook: impl Into<String>) -> Self {
        self.wiring_hook = Some(hook.into());
        self
    }

    /// Two ports are connectable iff they have opposite directions and
    /// identical (parameter type, result type) pairs.
    #[must_use]
    pub fn connectable_with(&self, other: &PortDescriptor) -> bool {
        self.direction != other.direction
            && self.parameter == other.parameter
            && self.result == other.result
    }
}

/// One constructor parameter of a node kind, resolved against the
/// injected-value provider by generated code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorParam {
    pub value_type: ValueType,
    /// Optional string key narrowing the injected binding, the constructor
    /// parameter's injection-key annotation.
    pub inject_key: Option<String>,
}

/// The registered shape of a node kind: identity, menu placement, ordered
/// ports, and the constructor the code generator emits.
///
/// Kinds self-register into the [`DescriptorRegistry`](super::DescriptorRegistry)
/// at start-up; there is no runtime type introspection. Registrations are
/// immutable once stored and cached for the process lifetime.
///
/// # Examples
///
/// ```rust
/// use flowgraph::registry::{KindRegistration, PortDescriptor, folders};
/// use flowgraph::types::ValueType;
///
/// let kind = KindRegistration::new("demo::QuestNode", "Quest")
///     .in_folder(folders::CUSTOM)
///     .with_constructor_param(ValueType::named("demo::QuestLog"), None)
///     .with_constructor_param(ValueType::of::<String>(), Some("quest_id"))
///     .with_port(PortDescriptor::input("start", ValueType::unit(), ValueType::unit()))
///     .with_port(PortDescriptor::output("on_done", ValueType::unit(), ValueType::unit()));
///
/// assert_eq!(kind.short_name(), "QuestNode");
/// assert_eq!(kind.outputs().count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindRegistration {
    /// Unique kind name, e.g. `flowgraph::nodes::IfNode` or the constructed
    /// `flowgraph::nodes::SwitchNode<demo::Weather>`.
    pub kind_name: String,
    /// Display name shown by the editor.
    pub display_name: String,
    /// Node creation menu folder.
    pub folder: String,
    /// Hidden kinds are excluded from discovery listings but stay
    /// resolvable by direct reference, so existing graphs keep compiling.
    pub hidden: bool,
    /// Path emitted by the code generator for construction statements.
    /// Usually equals `kind_name`; constructed generics insert a turbofish.
    pub rust_path: String,
    /// Constructor parameters in declaration order.
    pub constructor_params: Vec<ConstructorParam>,
    /// Ports in declaration order.
    pub ports: Vec<PortDescriptor>,
}

impl KindRegistration {
    pub fn new(kind_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        let kind_name = kind_name.into();
        KindRegistration {
            rust_path: kind_name.clone(),
            kind_name,
            display_name: display_name.into(),
            folder: folders::CUSTOM.to_string(),
            hidden: false,
            constructor_params: Vec::new(),
            ports: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn with_rust_path(mut self, rust_path: impl Into<String>) -> Self {
        self.rust_path = rust_path.into();
        self
    }

    #[must_use]
    pub fn with_constructor_param(
        mut self,
        value_type: ValueType,
        inject_key: Option<&str>,
    ) -> Self {
        self.constructor_params.push(ConstructorParam {
            value_type,
            inject_key: inject_key.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: PortDescriptor) -> Self {
        self.ports.push(port);
        self
    }

    /// Look up a port by name.
    #[must_use]
    pub fn port(&self, name: &str) -> Option<&PortDescriptor> {
        self.ports.iter().find(|port| port.name == name)
    }

    /// Input ports in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &PortDescriptor> {
        self.ports
            .iter()
            .filter(|port| port.direction == PortDirection::Input)
    }

    /// Output ports in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &PortDescriptor> {
        self.ports
            .iter()
            .filter(|port| port.direction == PortDirection::Output)
    }

    /// Short name: the last path segment of the kind name, with any generic
    /// tail. Used to derive variable names in generated code.
    #[must_use]
    pub fn short_name(&self) -> &str {
        let end = self.kind_name.find('<').unwrap_or(self.kind_name.len());
        let start = self.kind_name[..end].rfind("::").map_or(0, |idx| idx + 2);
        &self.kind_name[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectability_requires_opposite_direction_and_equal_types() {
        let out = PortDescriptor::output("on_done", ValueType::of::<bool>(), ValueType::unit());
        let matching = PortDescriptor::input("go", ValueType::of::<bool>(), ValueType::unit());
        let wrong_type = PortDescriptor::input("go", ValueType::of::<i32>(), ValueType::unit());
        let same_direction =
            PortDescriptor::output("other", ValueType::of::<bool>(), ValueType::unit());

        assert!(out.connectable_with(&matching));
        assert!(!out.connectable_with(&wrong_type));
        assert!(!out.connectable_with(&same_direction));
    }

    #[test]
    fn short_name_handles_constructed_generics() {
        let kind = KindRegistration::new("flowgraph::nodes::SwitchNode<demo::Weather>", "Switch");
        assert_eq!(kind.short_name(), "SwitchNode<demo::Weather>");
    }
}
