//! Service module - service-type definition and per-call binding.
//!
//! Provides:
//! - [`ServiceType`] / [`ServiceTypeBuilder`] - frozen per-type method table,
//!   handler bodies, and filter chain
//! - [`Handler`] / [`TypedHandler`] - handler trait and its deserializing
//!   wrapper
//! - [`ServiceInstance`] / [`BoundCall`] - per-call binding with the
//!   response slot and the deferred invokable
//!
//! # Example
//!
//! ```ignore
//! let service = ServiceType::builder("ResourceService")
//!     .method("find", request_type, response_type, |req: FindRequest, instance| {
//!         instance.respond_with(&FindResponse { name: req.name })
//!     })
//!     .build();
//! ```

mod definition;
mod handler;
mod instance;

pub use definition::{ServiceType, ServiceTypeBuilder};
pub use handler::{Handler, HandlerResult, TypedHandler};
pub use instance::{BoundCall, ServiceInstance};
