//! Dispatcher - resolves, validates, and executes one call.
//!
//! [`Dispatcher::process`] consumes a [`CallContext`], checks the method
//! against the service type's registry, binds a [`ServiceInstance`],
//! invokes the handler through the filter pipeline, and merges the
//! response back into the context.
//!
//! The dispatcher guards exactly one condition itself: the existence
//! check. Every other fault raised during invocation crosses `process`
//! unmodified, so upstream transport and logging layers see the true
//! fault kind.
//!
//! One call moves through `Received → Resolved → Bound → Invoking →
//! {Responded | Faulted}`; there is no retry, timeout, or cancellation in
//! this stage.

use tracing::{debug, warn};

use crate::context::CallContext;
use crate::error::{CallwireError, Result};
use crate::service::ServiceInstance;

/// Top-level dispatch stage.
///
/// Stateless; a hosting server may share one dispatcher across threads
/// or construct one per connection, whichever is convenient.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Create a new dispatcher.
    pub fn new() -> Self {
        Self
    }

    /// Dispatch one call, returning the context with the response merged.
    ///
    /// # Errors
    ///
    /// Returns `MethodNotFound` when the method has no registry entry.
    /// All other faults (deliberate failures, missing handler bodies,
    /// unexpected faults from handlers or interceptors) are propagated
    /// without translation.
    pub fn process(&self, context: CallContext) -> Result<CallContext> {
        let service = context.service_type();

        if !service.registry().is_known(context.method_name()) {
            warn!(
                service = context.service_name(),
                method = context.method_name(),
                "method not found"
            );
            return Err(CallwireError::MethodNotFound {
                service: context.service_name().to_string(),
                method: context.method_name().to_string(),
            });
        }

        debug!(
            service = context.service_name(),
            method = context.method_name(),
            "dispatching"
        );

        let instance = ServiceInstance::bind(&context);
        let callable = instance.callable_for(context.method_name());
        callable.invoke()?;

        let response = instance.response();
        Ok(context.with_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeDescriptor;
    use crate::service::ServiceType;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_unknown_method_fails_before_any_handler_runs() {
        let invocations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invocations);

        let service = ServiceType::builder("ResourceService")
            .method(
                "find",
                TypeDescriptor::unit("Empty"),
                TypeDescriptor::unit("Empty"),
                move |_: Value, _: &ServiceInstance| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
            )
            .build();

        let context = CallContext::for_service(&service, "find_not_implemented", json!({}));
        let result = Dispatcher::new().process(context);

        match result {
            Err(CallwireError::MethodNotFound { service, method }) => {
                assert_eq!(service, "ResourceService");
                assert_eq!(method, "find_not_implemented");
            }
            other => panic!("expected MethodNotFound, got {:?}", other),
        }
        assert_eq!(invocations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_explicit_response_is_merged_into_context() {
        let service = ServiceType::builder("ResourceService")
            .method(
                "find",
                TypeDescriptor::new("FindRequest", json!({"name": ""})),
                TypeDescriptor::new("FindResponse", json!({"name": ""})),
                |req: Value, instance: &ServiceInstance| {
                    instance.respond_with_value(req);
                    Ok(())
                },
            )
            .build();

        let context = CallContext::for_service(&service, "find", json!({"name": "required"}));
        let done = Dispatcher::new().process(context).unwrap();

        assert_eq!(done.response(), Some(&json!({"name": "required"})));
        assert_eq!(done.method_name(), "find");
    }

    #[test]
    fn test_silent_handler_yields_zero_response() {
        let service = ServiceType::builder("ResourceService")
            .method(
                "touch",
                TypeDescriptor::unit("Empty"),
                TypeDescriptor::new("TouchResponse", json!({"touched": false})),
                |_: Value, _: &ServiceInstance| Ok(()),
            )
            .build();

        let context = CallContext::for_service(&service, "touch", json!(null));
        let done = Dispatcher::new().process(context).unwrap();

        assert_eq!(done.response(), Some(&json!({"touched": false})));
    }

    #[test]
    fn test_declared_without_body_is_not_implemented_not_not_found() {
        let service = ServiceType::builder("ResourceService")
            .declare(
                "find",
                TypeDescriptor::unit("Empty"),
                TypeDescriptor::unit("Empty"),
            )
            .build();

        let context = CallContext::for_service(&service, "find", json!({}));
        let result = Dispatcher::new().process(context);

        assert!(matches!(
            result,
            Err(CallwireError::HandlerNotImplemented { .. })
        ));
    }

    #[test]
    fn test_deliberate_failure_propagates_with_message() {
        let service = ServiceType::builder("ResourceService")
            .method(
                "explode",
                TypeDescriptor::unit("Empty"),
                TypeDescriptor::unit("Empty"),
                |_: Value, instance: &ServiceInstance| Err(instance.fail_deliberately("boom")),
            )
            .build();

        let context = CallContext::for_service(&service, "explode", json!({}));
        let result = Dispatcher::new().process(context);

        match result {
            Err(CallwireError::Deliberate(message)) => assert_eq!(message, "boom"),
            other => panic!("expected deliberate failure, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_fault_propagates_untranslated() {
        let service = ServiceType::builder("ResourceService")
            .method(
                "crash",
                TypeDescriptor::unit("Empty"),
                TypeDescriptor::unit("Empty"),
                |_: Value, _: &ServiceInstance| {
                    Err(CallwireError::fault(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "backing store unavailable",
                    )))
                },
            )
            .build();

        let context = CallContext::for_service(&service, "crash", json!({}));
        let result = Dispatcher::new().process(context);

        match result {
            Err(CallwireError::Fault(source)) => {
                assert_eq!(source.to_string(), "backing store unavailable");
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_caller_context_is_unchanged_on_success() {
        let service = ServiceType::builder("ResourceService")
            .method(
                "find",
                TypeDescriptor::unit("Empty"),
                TypeDescriptor::unit("Empty"),
                |_: Value, instance: &ServiceInstance| {
                    instance.respond_with_value(json!("done"));
                    Ok(())
                },
            )
            .build();

        let context = CallContext::for_service(&service, "find", json!({}));
        let kept = context.duplicate();
        let done = Dispatcher::new().process(context).unwrap();

        assert!(kept.response().is_none());
        assert_eq!(done.response(), Some(&json!("done")));
    }
}
