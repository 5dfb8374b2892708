//! Per-call context ("Env").
//!
//! A [`CallContext`] carries the method name, decoded request, target
//! service type, and service name for one in-flight call, plus the
//! eventual response. Contexts are value-like: they are duplicated at
//! hand-off points so that downstream mutation never leaks back to the
//! caller until the dispatcher explicitly merges the response.

use std::sync::Arc;

use serde_json::Value;

use crate::service::ServiceType;

/// Carrier for one in-flight call.
///
/// The service type reference is shared (`Arc`) but frozen at definition
/// time, so a duplicate shares no mutable substructure with the original.
#[derive(Debug, Clone)]
pub struct CallContext {
    method_name: String,
    request: Value,
    service: Arc<ServiceType>,
    service_name: String,
    response: Option<Value>,
}

impl CallContext {
    /// Create a context from (method name, request, service type, service name).
    pub fn new(
        method_name: impl Into<String>,
        request: Value,
        service: Arc<ServiceType>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            request,
            service,
            service_name: service_name.into(),
            response: None,
        }
    }

    /// Create a context using the service type's own name as service name.
    pub fn for_service(service: &Arc<ServiceType>, method_name: impl Into<String>, request: Value) -> Self {
        let service_name = service.name().to_string();
        Self::new(method_name, request, Arc::clone(service), service_name)
    }

    /// Get the method name.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Get the decoded request.
    pub fn request(&self) -> &Value {
        &self.request
    }

    /// Get the target service type.
    pub fn service_type(&self) -> &Arc<ServiceType> {
        &self.service
    }

    /// Get the service name.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Get the response, if one has been merged in.
    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    /// Return an independent copy of this context.
    ///
    /// Writes to the copy's response are invisible to the original.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Return a new context with the response set, leaving `self` unchanged.
    pub fn with_response(&self, response: Value) -> Self {
        let mut context = self.clone();
        context.response = Some(response);
        context
    }
}
