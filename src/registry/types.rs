//! Wire-type registry: the explicit replacement for runtime type
//! introspection.
//!
//! Generic node kinds constrain their type parameters by a *base* (for
//! example "any enum"). With no reflection available, types declare the
//! bases they satisfy by registering a [`TypeRecord`] up front; a constraint
//! admits a type iff the type's record lists that base. Registered enums
//! also carry their ordered variant names, which constructed switch kinds
//! turn into one case port per variant.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;
use strum::VariantNames;

use super::error::RegistryError;
use crate::types::ValueType;

/// A named base constraint a wire type can satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeBase(pub &'static str);

impl TypeBase {
    /// The base satisfied by every registered enum.
    pub const ENUM: TypeBase = TypeBase("enum");
}

impl std::fmt::Display for TypeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered metadata for one wire type.
#[derive(Clone, Debug)]
pub struct TypeRecord {
    pub value_type: ValueType,
    /// Bases this type satisfies, used by generic-kind constraints.
    pub bases: Vec<TypeBase>,
    /// Ordered variant names for registered enums; empty otherwise.
    pub variants: Vec<String>,
}

/// Process-wide registry of wire types, keyed by full type path.
///
/// Write-once per key and safe for concurrent reads; registration happens
/// during start-up, lookups happen from both the editor and the compiler.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    records: RwLock<FxHashMap<String, Arc<TypeRecord>>>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wire type record. Registrations are write-once per key.
    pub fn register(&self, record: TypeRecord) -> Result<(), RegistryError> {
        let mut records = self.records.write().expect("type registry lock poisoned");
        let key = record.value_type.full_name().to_string();
        if records.contains_key(&key) {
            return Err(RegistryError::TypeAlreadyRegistered { type_name: key });
        }
        records.insert(key, Arc::new(record));
        Ok(())
    }

    /// Register an enum type together with its variant names.
    ///
    /// ```rust
    /// use flowgraph::registry::TypeRegistry;
    ///
    /// #[derive(strum::VariantNames)]
    /// enum Weather { Sunny, Rainy }
    ///
    /// let types = TypeRegistry::new();
    /// types.register_enum::<Weather>().unwrap();
    /// ```
    pub fn register_enum<E: VariantNames + 'static>(&self) -> Result<(), RegistryError> {
        self.register(TypeRecord {
            value_type: ValueType::of::<E>(),
            bases: vec![TypeBase::ENUM],
            variants: E::VARIANTS.iter().map(|name| name.to_string()).collect(),
        })
    }

    /// Look up the record for a wire type.
    #[must_use]
    pub fn record(&self, value_type: &ValueType) -> Option<Arc<TypeRecord>> {
        self.records
            .read()
            .expect("type registry lock poisoned")
            .get(value_type.full_name())
            .cloned()
    }

    /// Whether a wire type satisfies a base constraint. Unregistered types
    /// satisfy nothing.
    #[must_use]
    pub fn satisfies(&self, value_type: &ValueType, base: TypeBase) -> bool {
        self.record(value_type)
            .is_some_and(|record| record.bases.contains(&base))
    }
}
