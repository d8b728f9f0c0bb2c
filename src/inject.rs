//! Injected-value provider consumed by generated flow code.
//!
//! Generated construction statements request every constructor parameter
//! from an [`Injector`]: "get a value of type `T`, optionally by string
//! key". Bindings live in a runtime type-indexed map; there is no
//! reflection involved.
//!
//! Missing bindings deliberately yield `T::default()` rather than failing.
//! This permissive behavior means a misconfigured binding shows up as a
//! default value at run time instead of an error, a documented trade-off
//! observable through the `tracing` debug event emitted on every miss.
//!
//! # Example
//!
//! ```rust
//! use flowgraph::Injector;
//!
//! let inject = Injector::new()
//!     .with(5_u32)
//!     .with_keyed::<&str>("player_name", "Alice");
//!
//! assert_eq!(inject.get::<u32>(None), 5);
//! assert_eq!(inject.get::<&str>(Some("player_name")), "Alice");
//! // Missing bindings fall back to the type's default.
//! assert_eq!(inject.get::<u32>(Some("lives")), 0);
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;

use rustc_hash::FxHashMap;

type BindingKey = (TypeId, Option<String>);

/// Type-indexed map of values injected into generated node constructors.
#[derive(Clone, Default)]
pub struct Injector {
    values: FxHashMap<BindingKey, Arc<dyn Any + Send + Sync>>,
}

impl Injector {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty provider; every lookup yields the type's default.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bind an unkeyed value of type `T`.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.values
            .insert((TypeId::of::<T>(), None), Arc::new(value));
        self
    }

    /// Bind a value of type `T` under a string key.
    #[must_use]
    pub fn with_keyed<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.values
            .insert((TypeId::of::<T>(), Some(key.into())), Arc::new(value));
        self
    }

    /// Fetch a value of type `T`, optionally narrowed by key.
    ///
    /// Absence of a binding yields `T::default()` rather than an error; the
    /// miss is recorded as a `tracing` debug event.
    #[must_use]
    pub fn get<T: Any + Clone + Default>(&self, key: Option<&str>) -> T {
        let binding = (TypeId::of::<T>(), key.map(str::to_string));
        match self.values.get(&binding).and_then(|v| v.downcast_ref::<T>()) {
            Some(value) => value.clone(),
            None => {
                tracing::debug!(
                    requested = std::any::type_name::<T>(),
                    key = ?key,
                    "no injected binding; using default"
                );
                T::default()
            }
        }
    }

    /// Number of bindings held by this provider.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("bindings", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_and_unkeyed_bindings_are_distinct() {
        let inject = Injector::new().with(1_i64).with_keyed("alt", 2_i64);
        assert_eq!(inject.get::<i64>(None), 1);
        assert_eq!(inject.get::<i64>(Some("alt")), 2);
    }

    #[test]
    fn missing_binding_yields_default() {
        let inject = Injector::empty();
        assert_eq!(inject.get::<String>(None), String::new());
        assert_eq!(inject.get::<i32>(Some("anything")), 0);
    }

    #[test]
    fn bindings_are_type_scoped() {
        let inject = Injector::new().with(7_i32);
        // Same key space, different type: falls back to default.
        assert_eq!(inject.get::<i64>(None), 0);
    }
}
