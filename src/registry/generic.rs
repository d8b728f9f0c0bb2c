//! Generic node kinds and their instantiation against concrete type pairs.
//!
//! A generic kind (e.g. "switch over any enum") declares which of its one or
//! two type parameters are constrained by a parameter-type base and/or a
//! result-type base. Given the concrete (parameter type, result type)
//! observed at a candidate connection site, [`GenericKindRegistration::construct`]
//! substitutes the constrained parameters and produces a fully-instantiated
//! [`KindRegistration`]. Constructed registrations are cached by the
//! [`DescriptorRegistry`](super::DescriptorRegistry) so repeated connection
//! queries pay the construction cost once.

use std::sync::Arc;

use super::descriptor::KindRegistration;
use super::error::RegistryError;
use super::types::{TypeBase, TypeRegistry};
use crate::types::ValueType;

/// Factory producing a concrete registration for substituted type arguments.
///
/// Receives the type registry (for variant names and base checks) and the
/// observed parameter/result types. Only the constrained positions are
/// meaningful; an arity-1 parameter-constrained kind ignores the result
/// type.
pub type InstantiateFn = Arc<
    dyn Fn(&TypeRegistry, &ValueType, &ValueType) -> Result<KindRegistration, RegistryError>
        + Send
        + Sync,
>;

/// Registration for a generic node kind.
///
/// Supports one or two type parameters; anything else is rejected when the
/// registration is added to the registry.
#[derive(Clone)]
pub struct GenericKindRegistration {
    /// Unconstructed kind name, e.g. `flowgraph::nodes::SwitchNode`.
    pub kind_name: String,
    pub display_name: String,
    pub hidden: bool,
    /// Number of type parameters (1 or 2).
    pub arity: usize,
    /// Base constraint on the parameter-type position, if constrained.
    pub parameter_base: Option<TypeBase>,
    /// Base constraint on the result-type position, if constrained.
    pub result_base: Option<TypeBase>,
    instantiate: InstantiateFn,
}

impl GenericKindRegistration {
    pub fn new(
        kind_name: impl Into<String>,
        display_name: impl Into<String>,
        arity: usize,
        instantiate: InstantiateFn,
    ) -> Self {
        GenericKindRegistration {
            kind_name: kind_name.into(),
            display_name: display_name.into(),
            hidden: false,
            arity,
            parameter_base: None,
            result_base: None,
            instantiate,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn with_parameter_base(mut self, base: TypeBase) -> Self {
        self.parameter_base = Some(base);
        self
    }

    #[must_use]
    pub fn with_result_base(mut self, base: TypeBase) -> Self {
        self.result_base = Some(base);
        self
    }

    /// Validate the declared arity against the declared constraints.
    pub(super) fn validate(&self) -> Result<(), RegistryError> {
        match self.arity {
            1 if self.parameter_base.is_some() || self.result_base.is_some() => Ok(()),
            2 if self.parameter_base.is_some() && self.result_base.is_some() => Ok(()),
            1 | 2 => Err(RegistryError::MissingConstraint {
                kind: self.kind_name.clone(),
            }),
            arity => Err(RegistryError::UnsupportedArity {
                kind: self.kind_name.clone(),
                arity,
            }),
        }
    }

    /// Whether this kind can be offered for the observed type pair.
    ///
    /// Every declared constraint must be satisfied; a two-parameter kind is
    /// only offered when both constraints hold simultaneously.
    #[must_use]
    pub fn offered_for(
        &self,
        types: &TypeRegistry,
        parameter: &ValueType,
        result: &ValueType,
    ) -> bool {
        let parameter_ok = self
            .parameter_base
            .is_none_or(|base| types.satisfies(parameter, base));
        let result_ok = self
            .result_base
            .is_none_or(|base| types.satisfies(result, base));
        parameter_ok && result_ok
    }

    /// Instantiate the concrete kind for the observed type pair.
    pub fn construct(
        &self,
        types: &TypeRegistry,
        parameter: &ValueType,
        result: &ValueType,
    ) -> Result<KindRegistration, RegistryError> {
        if !self.offered_for(types, parameter, result) {
            return Err(RegistryError::ConstraintUnsatisfied {
                kind: self.kind_name.clone(),
                parameter: parameter.clone(),
                result: result.clone(),
            });
        }
        (self.instantiate)(types, parameter, result)
    }

    /// The concrete type arguments, in declaration order, for the observed
    /// pair. Used as the constructed-kind cache key.
    #[must_use]
    pub(super) fn cache_args(&self, parameter: &ValueType, result: &ValueType) -> Vec<ValueType> {
        match (self.parameter_base, self.result_base) {
            (Some(_), Some(_)) => vec![parameter.clone(), result.clone()],
            (Some(_), None) => vec![parameter.clone()],
            (None, Some(_)) => vec![result.clone()],
            (None, None) => Vec::new(),
        }
    }
}

impl std::fmt::Debug for GenericKindRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericKindRegistration")
            .field("kind_name", &self.kind_name)
            .field("arity", &self.arity)
            .field("parameter_base", &self.parameter_base)
            .field("result_base", &self.result_base)
            .finish()
    }
}
