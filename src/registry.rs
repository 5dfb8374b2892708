//! Per-service-type method registry.
//!
//! Each concrete service type owns one [`ServiceRegistry`] mapping method
//! names to [`MethodDescriptor`]s. The table is populated at definition
//! time and is read-only for the lifetime of request serving: all
//! registration must complete before the first dispatch.
//!
//! Registries are not inherited. A derived service type starts with an
//! empty table unless it re-registers methods itself.
//!
//! # Example
//!
//! ```
//! use callwire::{ServiceRegistry, TypeDescriptor};
//! use serde_json::json;
//!
//! let mut registry = ServiceRegistry::new();
//! registry.register(
//!     "find",
//!     TypeDescriptor::new("FindRequest", json!({"name": ""})),
//!     TypeDescriptor::new("FindResponse", json!({"name": ""})),
//! );
//!
//! assert!(registry.is_known("find"));
//! assert!(!registry.is_known("destroy"));
//! ```

use std::collections::HashMap;

use crate::descriptor::{MethodDescriptor, TypeDescriptor};

/// Registry mapping method names to descriptors for one service type.
///
/// Absence is a valid, checkable outcome, not a failure: no operation on
/// the registry returns an error.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    methods: HashMap<String, MethodDescriptor>,
}

impl ServiceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Register a method, inserting or overwriting its descriptor.
    ///
    /// Re-registering an existing name is last-write-wins, not an error.
    pub fn register(
        &mut self,
        name: &str,
        request_type: TypeDescriptor,
        response_type: TypeDescriptor,
    ) {
        let descriptor = MethodDescriptor::new(name, request_type, response_type);
        self.methods.insert(name.to_string(), descriptor);
    }

    /// Look up the descriptor for a method name.
    pub fn lookup(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    /// Check whether a method name is registered.
    pub fn is_known(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Snapshot of all registered descriptors.
    pub fn descriptors(&self) -> Vec<MethodDescriptor> {
        self.methods.values().cloned().collect()
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the registry has no methods.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
