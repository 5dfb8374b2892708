//! Method and type descriptors.
//!
//! A [`MethodDescriptor`] is the immutable record of a method's name plus
//! its request and response type descriptors. A [`TypeDescriptor`] names a
//! message type and carries the zero-valued instance used when a handler
//! finishes without writing a response.
//!
//! # Example
//!
//! ```
//! use callwire::{MethodDescriptor, TypeDescriptor};
//! use serde_json::json;
//!
//! let request = TypeDescriptor::new("FindRequest", json!({"name": ""}));
//! let response = TypeDescriptor::new("FindResponse", json!({"name": ""}));
//! let descriptor = MethodDescriptor::new("find", request, response);
//!
//! assert_eq!(descriptor.name(), "find");
//! assert_eq!(descriptor.response_type().zero_value(), json!({"name": ""}));
//! ```

use serde::Serialize;
use serde_json::Value;

/// Runtime descriptor of a request or response message type.
///
/// Carries the type name and a zero-value template. The template is what
/// a response slot lazily materializes to when a handler never responds.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    name: String,
    zero: Value,
}

impl TypeDescriptor {
    /// Create a descriptor with an explicit zero-value template.
    pub fn new(name: impl Into<String>, zero: Value) -> Self {
        Self {
            name: name.into(),
            zero,
        }
    }

    /// Create a descriptor whose zero value is `T::default()`.
    ///
    /// Falls back to `Value::Null` for the rare type whose default cannot
    /// be represented as JSON.
    pub fn of<T: Default + Serialize>(name: &str) -> Self {
        let zero = serde_json::to_value(T::default()).unwrap_or(Value::Null);
        Self::new(name, zero)
    }

    /// Create a descriptor for an empty message (zero value is null).
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }

    /// Get the type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a fresh copy of the zero-valued instance.
    pub fn zero_value(&self) -> Value {
        self.zero.clone()
    }
}

/// Immutable record of a method's identifier and its request/response types.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    name: String,
    request_type: TypeDescriptor,
    response_type: TypeDescriptor,
}

impl MethodDescriptor {
    /// Create a new method descriptor.
    pub fn new(
        name: impl Into<String>,
        request_type: TypeDescriptor,
        response_type: TypeDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            request_type,
            response_type,
        }
    }

    /// Get the method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the request type descriptor.
    pub fn request_type(&self) -> &TypeDescriptor {
        &self.request_type
    }

    /// Get the response type descriptor.
    pub fn response_type(&self) -> &TypeDescriptor {
        &self.response_type
    }
}
