//! Errors produced by kind and type registration.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::ValueType;

/// Errors raised while registering or resolving node kinds.
///
/// Descriptor resolution failures are fatal for the one kind involved (the
/// kind is omitted from listings), never a global failure.
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    /// A kind with this name was already registered. Registrations are
    /// write-once per key.
    #[error("node kind '{kind}' is already registered")]
    #[diagnostic(code(flowgraph::registry::already_registered))]
    AlreadyRegistered { kind: String },

    /// A wire type with this name was already registered.
    #[error("wire type '{type_name}' is already registered")]
    #[diagnostic(code(flowgraph::registry::type_already_registered))]
    TypeAlreadyRegistered { type_name: String },

    /// Generic kinds support one or two constrained type parameters only.
    #[error("generic kind '{kind}' declares {arity} type parameters; only 1 or 2 are supported")]
    #[diagnostic(code(flowgraph::registry::unsupported_arity))]
    UnsupportedArity { kind: String, arity: usize },

    /// A generic kind must constrain every type parameter it declares.
    #[error("generic kind '{kind}' is missing a base constraint for one of its type parameters")]
    #[diagnostic(
        code(flowgraph::registry::missing_constraint),
        help("Declare a parameter-type base and/or result-type base matching the kind's arity.")
    )]
    MissingConstraint { kind: String },

    /// No generic kind is registered under this name.
    #[error("unknown generic kind '{kind}'")]
    #[diagnostic(code(flowgraph::registry::unknown_generic))]
    UnknownGenericKind { kind: String },

    /// The observed type pair does not satisfy the kind's base constraints.
    #[error("kind '{kind}' cannot be constructed for ({parameter}, {result})")]
    #[diagnostic(code(flowgraph::registry::constraint_unsatisfied))]
    ConstraintUnsatisfied {
        kind: String,
        parameter: ValueType,
        result: ValueType,
    },

    /// A constructed kind references a wire type that was never registered.
    #[error("wire type '{type_name}' is not registered")]
    #[diagnostic(
        code(flowgraph::registry::unregistered_type),
        help("Register the type (e.g. via TypeRegistry::register_enum) before constructing kinds over it.")
    )]
    UnregisteredType { type_name: String },

    /// A constructed kind name could not be parsed into base and arguments.
    #[error("malformed constructed kind name '{name}'")]
    #[diagnostic(code(flowgraph::registry::malformed_kind_name))]
    MalformedKindName { name: String },
}
