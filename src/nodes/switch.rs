//! Enum-keyed branch node: one output case per enum variant.

use std::sync::{Arc, Weak};

use strum::{IntoEnumIterator, VariantNames};

use crate::ports::{FlowError, FlowInput, FlowOutput, InvokeTarget};
use crate::registry::{
    GenericKindRegistration, KindRegistration, PortDescriptor, RegistryError, TypeBase, folders,
};
use crate::types::ValueType;

use super::SWITCH_KIND;

/// Routes execution to one of its case outputs based on the received enum
/// value.
///
/// The cases are logically one named fan-out port backed by one physical
/// output per variant, which is why wiring goes through the
/// [`add_case`](Self::add_case) hook with the case's literal name instead of
/// the default connect operation. Invoking with a value whose case is
/// unwired is a no-op.
///
/// `E` must be an enum registered with the type registry (deriving
/// `strum::EnumIter` and `strum::VariantNames`); only unit-variant enums are
/// supported, matching what an enum-keyed branch can express.
#[derive(Debug)]
pub struct SwitchNode<E: 'static> {
    /// Receives the enum value to switch on.
    pub switch: FlowInput<E, ()>,
    cases: Vec<FlowOutput<(), ()>>,
}

impl<E> SwitchNode<E>
where
    E: IntoEnumIterator + VariantNames + PartialEq + Send + Sync + 'static,
{
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|node: &Weak<Self>| {
            let weak = node.clone();
            SwitchNode {
                switch: FlowInput::new(move |value: E, cancel| {
                    let weak = weak.clone();
                    async move {
                        let node = weak.upgrade().ok_or(FlowError::NodeDropped)?;
                        let matched = E::iter().position(|variant| variant == value);
                        match matched {
                            Some(index) => node.cases[index].invoke((), &cancel).await,
                            // Data-carrying variants are not enumerable; treat
                            // them as unwired.
                            None => Ok(()),
                        }
                    }
                }),
                cases: E::VARIANTS
                    .iter()
                    .map(|name| FlowOutput::with_name(*name))
                    .collect(),
            }
        })
    }

    /// Wiring hook: connect a target to the case named `case`.
    ///
    /// Unknown case names are ignored with a warning; the compiler only
    /// emits names taken from the registered variant list.
    pub fn add_case(&self, case: &str, target: InvokeTarget<(), ()>) {
        match E::VARIANTS.iter().position(|name| *name == case) {
            Some(index) => self.cases[index].add_target(target),
            None => tracing::warn!(
                case,
                kind = std::any::type_name::<E>(),
                "unknown switch case; target ignored"
            ),
        }
    }

    /// The physical output backing the case named `name`.
    #[must_use]
    pub fn case(&self, name: &str) -> Option<&FlowOutput<(), ()>> {
        E::VARIANTS
            .iter()
            .position(|case| *case == name)
            .map(|index| &self.cases[index])
    }
}

/// Generic registration installed by
/// [`register_builtins`](super::register_builtins): a single type parameter
/// constrained to registered enums.
pub(super) fn generic_registration() -> GenericKindRegistration {
    GenericKindRegistration::new(
        SWITCH_KIND,
        "Switch",
        1,
        Arc::new(|types, parameter, _result| {
            let record =
                types
                    .record(parameter)
                    .ok_or_else(|| RegistryError::UnregisteredType {
                        type_name: parameter.full_name().to_string(),
                    })?;

            let mut kind = KindRegistration::new(
                format!("{SWITCH_KIND}<{}>", parameter.full_name()),
                format!("Switch<{}>", parameter.name()),
            )
            .in_folder(folders::CONTROL_FLOW)
            .with_rust_path(format!("{SWITCH_KIND}::<{}>", parameter.full_name()))
            .with_port(
                PortDescriptor::input("switch", parameter.clone(), ValueType::unit())
                    .with_display_name(parameter.name()),
            );
            for variant in &record.variants {
                kind = kind.with_port(
                    PortDescriptor::output(variant, ValueType::unit(), ValueType::unit())
                        .with_wiring_hook("add_case"),
                );
            }
            Ok(kind)
        }),
    )
    .with_parameter_base(TypeBase::ENUM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::target;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_util::sync::CancellationToken;

    #[derive(Debug, PartialEq, strum::EnumIter, strum::VariantNames)]
    enum Signal {
        Red,
        Green,
    }

    #[tokio::test]
    async fn switch_routes_to_the_matching_case() {
        let reds = Arc::new(AtomicUsize::new(0));

        let node = SwitchNode::<Signal>::new();
        let reds_in = reds.clone();
        node.add_case(
            "Red",
            target(move |(), _| {
                let reds = reds_in.clone();
                async move {
                    reds.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }),
        );

        let cancel = CancellationToken::new();
        node.switch.call(Signal::Red, &cancel).await.unwrap();
        assert_eq!(reds.load(Ordering::SeqCst), 1);

        // The Green case is unwired: invoking it is a no-op, not an error.
        node.switch.call(Signal::Green, &cancel).await.unwrap();
        assert_eq!(reds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_case_names_are_ignored() {
        let node = SwitchNode::<Signal>::new();
        node.add_case("Blue", target(|(), _| async move { Ok(()) }));
        assert_eq!(node.case("Red").unwrap().target_count(), 0);
        assert!(node.case("Blue").is_none());
    }
}
