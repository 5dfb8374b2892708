//! Error types for callwire.
//!
//! The taxonomy distinguishes "the method is unknown" from "the method
//! crashed": only [`CallwireError::MethodNotFound`] is raised by the
//! dispatcher itself; every other variant originates inside a handler,
//! an interceptor, or the serde bridge and crosses the dispatcher
//! boundary unmodified.

use thiserror::Error;

/// Main error type for all callwire operations.
#[derive(Debug, Error)]
pub enum CallwireError {
    /// The requested method has no entry in the service type's registry.
    ///
    /// Raised synchronously by the dispatcher before any handler code
    /// runs. Always recoverable: the transport maps it to a protocol
    /// level "unknown method" response.
    #[error("method not found: {service}.{method}")]
    MethodNotFound {
        /// Service name from the call context.
        service: String,
        /// Requested method name.
        method: String,
    },

    /// The method is registered but the service type has no handler body.
    #[error("handler not implemented: {service}.{method}")]
    HandlerNotImplemented {
        /// Service name from the call context.
        service: String,
        /// Registered method name.
        method: String,
    },

    /// Domain failure raised by handler code via
    /// [`ServiceInstance::fail_deliberately`](crate::ServiceInstance::fail_deliberately).
    ///
    /// Display is the bare message so outer layers can format a clean
    /// protocol error rather than an internal crash report.
    #[error("{0}")]
    Deliberate(String),

    /// JSON bridging error (typed request access, typed response writes).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other runtime fault surfaced by a handler or interceptor.
    #[error("unexpected fault: {0}")]
    Fault(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CallwireError {
    /// Wrap an arbitrary error as an unexpected runtime fault.
    pub fn fault(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Fault(error.into())
    }
}

/// Result type alias using CallwireError.
pub type Result<T> = std::result::Result<T, CallwireError>;

/// Capability for values that can produce a deliberate-failure message.
///
/// Accepts plain strings out of the box; domain error types opt in by
/// implementing the trait.
pub trait FailureMessage {
    /// Produce the human-readable message carried by the failure.
    fn failure_message(&self) -> String;
}

impl FailureMessage for &str {
    fn failure_message(&self) -> String {
        (*self).to_string()
    }
}

impl FailureMessage for String {
    fn failure_message(&self) -> String {
        self.clone()
    }
}

impl FailureMessage for std::borrow::Cow<'_, str> {
    fn failure_message(&self) -> String {
        self.to_string()
    }
}
