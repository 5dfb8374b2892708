//! Service-type definition.
//!
//! A [`ServiceType`] bundles the method registry, the handler bodies, and
//! the filter chain for one concrete service. It is built once at
//! definition time through [`ServiceTypeBuilder`] and frozen behind an
//! `Arc` before serving begins; dispatch only ever reads it.
//!
//! # Example
//!
//! ```
//! use callwire::{ServiceInstance, ServiceType, TypeDescriptor};
//! use serde_json::Value;
//!
//! let service = ServiceType::builder("EchoService")
//!     .method(
//!         "echo",
//!         TypeDescriptor::unit("Raw"),
//!         TypeDescriptor::unit("Raw"),
//!         |req: Value, instance: &ServiceInstance| {
//!             instance.respond_with_value(req);
//!             Ok(())
//!         },
//!     )
//!     .build();
//!
//! assert!(service.registry().is_known("echo"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::handler::{Handler, HandlerResult, TypedHandler};
use super::instance::ServiceInstance;
use crate::descriptor::TypeDescriptor;
use crate::filter::{Filter, FilterPipeline};
use crate::registry::ServiceRegistry;

/// Frozen definition of one concrete service type.
pub struct ServiceType {
    name: String,
    registry: ServiceRegistry,
    handlers: HashMap<String, Arc<dyn Handler>>,
    filters: FilterPipeline,
}

impl ServiceType {
    /// Start building a service type with the given name.
    pub fn builder(name: impl Into<String>) -> ServiceTypeBuilder {
        ServiceTypeBuilder {
            name: name.into(),
            registry: ServiceRegistry::new(),
            handlers: HashMap::new(),
            filters: FilterPipeline::new(),
        }
    }

    /// Get the service type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the method registry.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Get the handler body for a method, if one was attached.
    pub fn handler(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    /// Get the filter chain.
    pub fn filters(&self) -> &FilterPipeline {
        &self.filters
    }
}

impl fmt::Debug for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceType")
            .field("name", &self.name)
            .field("methods", &self.registry.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Builder for configuring a [`ServiceType`].
///
/// Registration happens at process start-up, before any dispatch; the
/// builder is consumed by [`build`](ServiceTypeBuilder::build), which
/// freezes the definition. Registries are per-type and never inherited:
/// build each service type's table explicitly.
pub struct ServiceTypeBuilder {
    name: String,
    registry: ServiceRegistry,
    handlers: HashMap<String, Arc<dyn Handler>>,
    filters: FilterPipeline,
}

impl ServiceTypeBuilder {
    /// Register a method descriptor and attach a typed handler body.
    ///
    /// The request is deserialized into `T` before `handler` runs.
    /// Registering the same name again overwrites both descriptor and
    /// body (last-write-wins).
    pub fn method<F, T>(
        mut self,
        name: &str,
        request_type: TypeDescriptor,
        response_type: TypeDescriptor,
        handler: F,
    ) -> Self
    where
        F: Fn(T, &ServiceInstance) -> HandlerResult + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        self.registry.register(name, request_type, response_type);
        self.handlers
            .insert(name.to_string(), Arc::new(TypedHandler::new(handler)));
        self
    }

    /// Register a method descriptor and attach a raw [`Handler`].
    pub fn raw_method<H: Handler>(
        mut self,
        name: &str,
        request_type: TypeDescriptor,
        response_type: TypeDescriptor,
        handler: H,
    ) -> Self {
        self.registry.register(name, request_type, response_type);
        self.handlers.insert(name.to_string(), Arc::new(handler));
        self
    }

    /// Register a method descriptor with no handler body.
    ///
    /// Invoking the method later fails with `HandlerNotImplemented`. Any
    /// body previously attached under this name is removed.
    pub fn declare(
        mut self,
        name: &str,
        request_type: TypeDescriptor,
        response_type: TypeDescriptor,
    ) -> Self {
        self.registry.register(name, request_type, response_type);
        self.handlers.remove(name);
        self
    }

    /// Append a filter to the service's interceptor chain.
    pub fn filter<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Freeze the definition.
    pub fn build(self) -> Arc<ServiceType> {
        debug!(
            service = self.name.as_str(),
            methods = self.registry.len(),
            "service type frozen"
        );
        Arc::new(ServiceType {
            name: self.name,
            registry: self.registry,
            handlers: self.handlers,
            filters: self.filters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn unit_pair() -> (TypeDescriptor, TypeDescriptor) {
        (TypeDescriptor::unit("Empty"), TypeDescriptor::unit("Empty"))
    }

    #[test]
    fn test_method_registers_descriptor_and_body() {
        let (req, resp) = unit_pair();
        let service = ServiceType::builder("PingService")
            .method("ping", req, resp, |_: Value, _: &ServiceInstance| Ok(()))
            .build();

        assert_eq!(service.name(), "PingService");
        assert!(service.registry().is_known("ping"));
        assert!(service.handler("ping").is_some());
    }

    #[test]
    fn test_declare_registers_descriptor_without_body() {
        let (req, resp) = unit_pair();
        let service = ServiceType::builder("PingService").declare("ping", req, resp).build();

        assert!(service.registry().is_known("ping"));
        assert!(service.handler("ping").is_none());
    }

    #[test]
    fn test_declare_after_method_drops_body() {
        let (req, resp) = unit_pair();
        let service = ServiceType::builder("PingService")
            .method("ping", req.clone(), resp.clone(), |_: Value, _: &ServiceInstance| Ok(()))
            .declare("ping", req, resp)
            .build();

        assert!(service.registry().is_known("ping"));
        assert!(service.handler("ping").is_none());
    }

    #[test]
    fn test_method_overwrite_is_last_write_wins() {
        let service = ServiceType::builder("ResourceService")
            .method(
                "find",
                TypeDescriptor::new("FindRequest", json!({"name": ""})),
                TypeDescriptor::new("FindResponse", json!({"name": ""})),
                |_: Value, instance: &ServiceInstance| {
                    instance.respond_with_value(json!("old"));
                    Ok(())
                },
            )
            .method(
                "find",
                TypeDescriptor::new("FindRequestV2", json!({"name": ""})),
                TypeDescriptor::new("FindResponseV2", json!({"names": []})),
                |_: Value, instance: &ServiceInstance| {
                    instance.respond_with_value(json!("new"));
                    Ok(())
                },
            )
            .build();

        let descriptor = service.registry().lookup("find").unwrap();
        assert_eq!(descriptor.request_type().name(), "FindRequestV2");
        assert_eq!(service.registry().len(), 1);
    }

    #[test]
    fn test_unregistered_method_is_unknown() {
        let service = ServiceType::builder("EmptyService").build();
        assert!(!service.registry().is_known("anything"));
        assert!(service.handler("anything").is_none());
    }
}
