//! Descriptor registry: the process-wide catalog of node kinds, wire types,
//! and constructed generic kinds.
//!
//! Node kinds self-register a [`KindRegistration`] (ports, constructor
//! shape, menu metadata) at start-up: a static registration table instead
//! of runtime type introspection. The registry is write-once per key,
//! idempotent to read, and safe to call concurrently from the editor UI and
//! the compiler. Kinds marked hidden are excluded from discovery listings
//! but remain resolvable by direct reference, so existing graphs that
//! mention them still compile.
//!
//! Generic kinds register a [`GenericKindRegistration`] with base
//! constraints; [`DescriptorRegistry::construct_generic`] instantiates them
//! against observed type pairs and caches the result by (kind, arguments).
//!
//! # Example
//!
//! ```rust
//! use flowgraph::registry::{DescriptorRegistry, KindRegistration, PortDescriptor};
//! use flowgraph::types::ValueType;
//!
//! let registry = DescriptorRegistry::new();
//! registry
//!     .register(
//!         KindRegistration::new("demo::LogNode", "Log")
//!             .with_port(PortDescriptor::input("write", ValueType::unit(), ValueType::unit())),
//!     )
//!     .unwrap();
//!
//! let kind = registry.resolve("demo::LogNode").unwrap();
//! assert_eq!(kind.display_name, "Log");
//! ```

mod descriptor;
mod error;
mod generic;
mod types;

pub use descriptor::{
    ConstructorParam, KindRegistration, PortDescriptor, PortDirection, folders,
};
pub use error::RegistryError;
pub use generic::{GenericKindRegistration, InstantiateFn};
pub use types::{TypeBase, TypeRecord, TypeRegistry};

use std::sync::{Arc, OnceLock, RwLock};

use rustc_hash::FxHashMap;

use crate::types::ValueType;

/// Cache key for a constructed generic kind: the generic kind name plus its
/// concrete type arguments in declaration order.
type ConstructedKey = (String, Vec<ValueType>);

/// Process-wide registry of node kind descriptors.
///
/// A single global instance backs the running process (see
/// [`DescriptorRegistry::global`]); fresh instances exist for tests and
/// tools that need isolation.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    kinds: RwLock<FxHashMap<String, Arc<KindRegistration>>>,
    generics: RwLock<FxHashMap<String, Arc<GenericKindRegistration>>>,
    constructed: RwLock<FxHashMap<ConstructedKey, Arc<KindRegistration>>>,
    types: TypeRegistry,
}

static GLOBAL: OnceLock<DescriptorRegistry> = OnceLock::new();

impl DescriptorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, initialized once with the built-in kinds
    /// on first access. Safe under concurrent first access.
    pub fn global() -> &'static DescriptorRegistry {
        GLOBAL.get_or_init(|| {
            let registry = DescriptorRegistry::new();
            crate::nodes::register_builtins(&registry);
            registry
        })
    }

    /// Wire-type registry used for generic-kind constraints.
    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Register a concrete node kind. Registrations are write-once per key.
    pub fn register(&self, registration: KindRegistration) -> Result<(), RegistryError> {
        let mut kinds = self.kinds.write().expect("kind registry lock poisoned");
        if kinds.contains_key(&registration.kind_name) {
            return Err(RegistryError::AlreadyRegistered {
                kind: registration.kind_name,
            });
        }
        tracing::debug!(kind = %registration.kind_name, "registered node kind");
        kinds.insert(registration.kind_name.clone(), Arc::new(registration));
        Ok(())
    }

    /// Register a generic node kind. The declared arity must be 1 or 2 and
    /// every declared type parameter must carry a base constraint.
    pub fn register_generic(
        &self,
        registration: GenericKindRegistration,
    ) -> Result<(), RegistryError> {
        registration.validate()?;
        let mut generics = self
            .generics
            .write()
            .expect("generic kind registry lock poisoned");
        if generics.contains_key(&registration.kind_name) {
            return Err(RegistryError::AlreadyRegistered {
                kind: registration.kind_name,
            });
        }
        tracing::debug!(kind = %registration.kind_name, "registered generic node kind");
        generics.insert(registration.kind_name.clone(), Arc::new(registration));
        Ok(())
    }

    /// Resolve a kind by direct reference, including hidden kinds and
    /// constructed generic names such as
    /// `flowgraph::nodes::SwitchNode<demo::Weather>`.
    #[must_use]
    pub fn resolve(&self, kind_name: &str) -> Option<Arc<KindRegistration>> {
        if let Some(kind) = self
            .kinds
            .read()
            .expect("kind registry lock poisoned")
            .get(kind_name)
        {
            return Some(kind.clone());
        }
        self.resolve_constructed(kind_name)
    }

    /// Instantiate a generic kind for an observed type pair, constructing it
    /// on first use and serving the cached registration afterwards.
    pub fn construct_generic(
        &self,
        kind_name: &str,
        parameter: &ValueType,
        result: &ValueType,
    ) -> Result<Arc<KindRegistration>, RegistryError> {
        let generic = self
            .generics
            .read()
            .expect("generic kind registry lock poisoned")
            .get(kind_name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownGenericKind {
                kind: kind_name.to_string(),
            })?;

        let key = (kind_name.to_string(), generic.cache_args(parameter, result));
        if let Some(cached) = self
            .constructed
            .read()
            .expect("constructed kind cache lock poisoned")
            .get(&key)
        {
            return Ok(cached.clone());
        }

        let constructed = Arc::new(generic.construct(&self.types, parameter, result)?);
        let mut cache = self
            .constructed
            .write()
            .expect("constructed kind cache lock poisoned");
        // First write wins under concurrent construction.
        Ok(cache.entry(key).or_insert(constructed).clone())
    }

    /// Enumerate all concrete, constructible node kinds, excluding kinds
    /// marked hidden. Sorted by kind name for deterministic listings.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<KindRegistration>> {
        let mut kinds: Vec<_> = self
            .kinds
            .read()
            .expect("kind registry lock poisoned")
            .values()
            .filter(|kind| !kind.hidden)
            .cloned()
            .collect();
        kinds.sort_by(|a, b| a.kind_name.cmp(&b.kind_name));
        kinds
    }

    /// Kinds that can be offered for a connection to a port with the
    /// observed (parameter type, result type) pair.
    ///
    /// Returns every non-hidden concrete kind owning a `seeking`-direction
    /// port with exactly those types, plus every satisfiable generic kind,
    /// constructed for the pair. Generic kinds whose constraints cannot be
    /// satisfied are simply omitted; an individual construction failure
    /// never fails the whole query.
    #[must_use]
    pub fn offer_for(
        &self,
        parameter: &ValueType,
        result: &ValueType,
        seeking: PortDirection,
    ) -> Vec<Arc<KindRegistration>> {
        let has_matching_port = |kind: &KindRegistration| {
            kind.ports.iter().any(|port| {
                port.direction == seeking && port.parameter == *parameter && port.result == *result
            })
        };

        let mut offered: Vec<Arc<KindRegistration>> = self
            .kinds
            .read()
            .expect("kind registry lock poisoned")
            .values()
            .filter(|kind| !kind.hidden && has_matching_port(kind))
            .cloned()
            .collect();

        let generics: Vec<_> = self
            .generics
            .read()
            .expect("generic kind registry lock poisoned")
            .values()
            .filter(|generic| !generic.hidden)
            .cloned()
            .collect();
        for generic in generics {
            if !generic.offered_for(&self.types, parameter, result) {
                continue;
            }
            match self.construct_generic(&generic.kind_name, parameter, result) {
                Ok(kind) if has_matching_port(&kind) => offered.push(kind),
                Ok(_) => {}
                Err(error) => {
                    tracing::debug!(
                        kind = %generic.kind_name,
                        %error,
                        "generic kind omitted from discovery"
                    );
                }
            }
        }

        offered.sort_by(|a, b| a.kind_name.cmp(&b.kind_name));
        offered
    }

    /// Resolve a constructed generic name like `Base<Arg>` or
    /// `Base<Param, Result>` by parsing it and constructing the kind.
    fn resolve_constructed(&self, kind_name: &str) -> Option<Arc<KindRegistration>> {
        let (base, args) = parse_constructed_name(kind_name)?;
        let generic = self
            .generics
            .read()
            .expect("generic kind registry lock poisoned")
            .get(base)
            .cloned()?;

        let unit = ValueType::unit();
        let (parameter, result) = match (generic.parameter_base, generic.result_base, args.len()) {
            (Some(_), Some(_), 2) => (args[0].clone(), args[1].clone()),
            (Some(_), None, 1) => (args[0].clone(), unit),
            (None, Some(_), 1) => (unit, args[0].clone()),
            _ => return None,
        };

        match self.construct_generic(base, &parameter, &result) {
            Ok(kind) => Some(kind),
            Err(error) => {
                tracing::debug!(kind = kind_name, %error, "constructed kind resolution failed");
                None
            }
        }
    }
}

/// Split `Base<A, B>` into the base name and its top-level type arguments.
fn parse_constructed_name(name: &str) -> Option<(&str, Vec<ValueType>)> {
    let open = name.find('<')?;
    if !name.ends_with('>') {
        return None;
    }
    let base = &name[..open];
    let inner = &name[open + 1..name.len() - 1];
    if base.is_empty() || inner.is_empty() {
        return None;
    }

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                args.push(ValueType::named(inner[start..idx].trim()));
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    args.push(ValueType::named(inner[start..].trim()));
    Some((base, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(strum::VariantNames)]
    enum Mood {
        Happy,
        Grumpy,
    }

    fn case_kind(types: &TypeRegistry, parameter: &ValueType) -> KindRegistration {
        let record = types.record(parameter).expect("registered enum");
        let mut kind = KindRegistration::new(
            format!("demo::CaseNode<{}>", parameter.full_name()),
            format!("Case<{}>", parameter.name()),
        )
        .with_port(PortDescriptor::input(
            "select",
            parameter.clone(),
            ValueType::unit(),
        ));
        for variant in &record.variants {
            kind = kind.with_port(
                PortDescriptor::output(variant, ValueType::unit(), ValueType::unit())
                    .with_wiring_hook("add_case"),
            );
        }
        kind
    }

    fn generic_case_registration() -> GenericKindRegistration {
        GenericKindRegistration::new(
            "demo::CaseNode",
            "Case",
            1,
            Arc::new(|types, parameter, _result| {
                types
                    .record(parameter)
                    .ok_or_else(|| RegistryError::UnregisteredType {
                        type_name: parameter.full_name().to_string(),
                    })?;
                Ok(case_kind(types, parameter))
            }),
        )
        .with_parameter_base(TypeBase::ENUM)
    }

    #[test]
    fn global_registry_carries_the_builtin_kinds() {
        let registry = DescriptorRegistry::global();
        assert!(registry.resolve(crate::nodes::ENTER_KIND).is_some());
        assert!(registry.resolve(crate::nodes::IF_KIND).is_some());
        assert!(
            registry
                .list()
                .iter()
                .any(|kind| kind.kind_name == crate::nodes::ENTER_KIND)
        );
    }

    #[test]
    fn kind_registration_is_write_once() {
        let registry = DescriptorRegistry::new();
        let kind = || KindRegistration::new("demo::A", "A");
        registry.register(kind()).unwrap();
        assert!(matches!(
            registry.register(kind()),
            Err(RegistryError::AlreadyRegistered { .. })
        ));
    }

    #[test]
    fn hidden_kinds_are_listable_by_reference_only() {
        let registry = DescriptorRegistry::new();
        registry
            .register(KindRegistration::new("demo::Secret", "Secret").hidden())
            .unwrap();
        registry
            .register(KindRegistration::new("demo::Public", "Public"))
            .unwrap();

        let listed: Vec<_> = registry
            .list()
            .iter()
            .map(|kind| kind.kind_name.clone())
            .collect();
        assert_eq!(listed, ["demo::Public"]);
        assert!(registry.resolve("demo::Secret").is_some());
    }

    #[test]
    fn constructed_generic_kinds_are_cached() {
        let registry = DescriptorRegistry::new();
        registry.types().register_enum::<Mood>().unwrap();
        registry.register_generic(generic_case_registration()).unwrap();

        let mood = ValueType::of::<Mood>();
        let first = registry
            .construct_generic("demo::CaseNode", &mood, &ValueType::unit())
            .unwrap();
        let second = registry
            .construct_generic("demo::CaseNode", &mood, &ValueType::unit())
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.outputs().count(), 2);
    }

    #[test]
    fn constructed_names_resolve_by_direct_reference() {
        let registry = DescriptorRegistry::new();
        registry.types().register_enum::<Mood>().unwrap();
        registry.register_generic(generic_case_registration()).unwrap();

        let name = format!("demo::CaseNode<{}>", ValueType::of::<Mood>().full_name());
        let kind = registry.resolve(&name).expect("constructed kind resolves");
        assert_eq!(kind.kind_name, name);
    }

    #[test]
    fn unsatisfied_constraints_are_omitted_not_fatal() {
        let registry = DescriptorRegistry::new();
        registry.register_generic(generic_case_registration()).unwrap();

        // bool is not a registered enum, so the generic kind is not offered.
        let offered = registry.offer_for(
            &ValueType::of::<bool>(),
            &ValueType::unit(),
            PortDirection::Input,
        );
        assert!(offered.is_empty());
    }

    #[test]
    fn offer_for_matches_exact_port_types() {
        let registry = DescriptorRegistry::new();
        registry.types().register_enum::<Mood>().unwrap();
        registry.register_generic(generic_case_registration()).unwrap();

        let mood = ValueType::of::<Mood>();
        let offered = registry.offer_for(&mood, &ValueType::unit(), PortDirection::Input);
        assert_eq!(offered.len(), 1);
        assert!(offered[0].kind_name.starts_with("demo::CaseNode<"));

        // Seeking an output of (Mood, ()) finds nothing: cases are unit ports.
        let offered = registry.offer_for(&mood, &ValueType::unit(), PortDirection::Output);
        assert!(offered.is_empty());
    }

    #[test]
    fn generic_arity_is_validated() {
        let registry = DescriptorRegistry::new();
        let noop: InstantiateFn =
            Arc::new(|_, _, _| Ok(KindRegistration::new("demo::X<..>", "X")));

        let unconstrained = GenericKindRegistration::new("demo::X", "X", 1, noop.clone());
        assert!(matches!(
            registry.register_generic(unconstrained),
            Err(RegistryError::MissingConstraint { .. })
        ));

        let too_many = GenericKindRegistration::new("demo::Y", "Y", 3, noop)
            .with_parameter_base(TypeBase::ENUM)
            .with_result_base(TypeBase::ENUM);
        assert!(matches!(
            registry.register_generic(too_many),
            Err(RegistryError::UnsupportedArity { arity: 3, .. })
        ));
    }
}
