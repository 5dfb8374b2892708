//! # callwire
//!
//! In-process request-dispatch core for RPC servers.
//!
//! Given a decoded inbound call (method name, request, target service
//! type), callwire resolves the concrete handler, executes it through an
//! ordered filter pipeline, and produces a response or a classified
//! failure. Wire encoding, transports, and client-side connections are
//! external collaborators: this crate starts where bytes have already
//! been decoded and stops where the response is handed back for encoding.
//!
//! ## Architecture
//!
//! - [`ServiceType`] - frozen per-type method registry, handler bodies,
//!   and filter chain, built once at start-up
//! - [`CallContext`] - value-like per-call carrier, duplicated at
//!   hand-off points
//! - [`ServiceInstance`] - per-call binding exposing the request, the
//!   response slot, and the deliberate-failure helper
//! - [`Dispatcher`] - resolves, validates, and invokes one call,
//!   translating registry misses into [`CallwireError::MethodNotFound`]
//!   and leaving every other fault untouched
//!
//! ## Example
//!
//! ```
//! use callwire::{CallContext, Dispatcher, ServiceInstance, ServiceType, TypeDescriptor};
//! use serde_json::{json, Value};
//!
//! let service = ServiceType::builder("ResourceService")
//!     .method(
//!         "find",
//!         TypeDescriptor::new("FindRequest", json!({"name": ""})),
//!         TypeDescriptor::new("FindResponse", json!({"name": ""})),
//!         |req: Value, instance: &ServiceInstance| {
//!             instance.respond_with_value(req);
//!             Ok(())
//!         },
//!     )
//!     .build();
//!
//! let context = CallContext::for_service(&service, "find", json!({"name": "required"}));
//! let done = Dispatcher::new().process(context).unwrap();
//! assert_eq!(done.response(), Some(&json!({"name": "required"})));
//! ```

pub mod context;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod filter;
pub mod registry;
pub mod service;

pub use context::CallContext;
pub use descriptor::{MethodDescriptor, TypeDescriptor};
pub use dispatcher::Dispatcher;
pub use error::{CallwireError, FailureMessage, Result};
pub use filter::{Filter, FilterPipeline, Next};
pub use registry::ServiceRegistry;
pub use service::{
    BoundCall, Handler, HandlerResult, ServiceInstance, ServiceType, ServiceTypeBuilder,
    TypedHandler,
};
