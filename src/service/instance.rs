//! Per-call service binding.
//!
//! A [`ServiceInstance`] is bound to exactly one [`CallContext`]: it takes
//! a private duplicate at construction so later external mutation of the
//! caller's context cannot affect in-flight processing. It owns the single
//! mutable response slot a handler communicates through, and hands the
//! dispatcher a deferred invokable ([`BoundCall`]) that runs the service's
//! filter pipeline around the handler.
//!
//! Instances are created per inbound call and never shared across
//! concurrent calls; the response slot uses a `RefCell` accordingly.

use std::cell::RefCell;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::definition::ServiceType;
use super::handler::Handler;
use crate::context::CallContext;
use crate::error::{CallwireError, FailureMessage, Result};

/// Per-call object exposing the request, the response slot, and the
/// deliberate-failure helper to handler code.
pub struct ServiceInstance {
    env: CallContext,
    request: Value,
    response: RefCell<Option<Value>>,
}

impl ServiceInstance {
    /// Bind a new instance to `context`, taking a private duplicate.
    pub fn bind(context: &CallContext) -> Self {
        let env = context.duplicate();
        let request = env.request().clone();
        Self {
            env,
            request,
            response: RefCell::new(None),
        }
    }

    /// Get the private context copy this instance is bound to.
    pub fn env(&self) -> &CallContext {
        &self.env
    }

    /// Get the method name of the bound call.
    pub fn method_name(&self) -> &str {
        self.env.method_name()
    }

    /// Get the target service type.
    pub fn service_type(&self) -> &Arc<ServiceType> {
        self.env.service_type()
    }

    /// Get the decoded request carried by the private context.
    pub fn request_raw(&self) -> &Value {
        &self.request
    }

    /// Deserialize the request into `T`.
    pub fn request<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.request.clone())?)
    }

    /// Read the current response slot.
    ///
    /// If the slot was never written, it lazily initializes to the zero
    /// value of the method's declared response type and caches it, so
    /// repeated reads observe the same value.
    pub fn response(&self) -> Value {
        self.response
            .borrow_mut()
            .get_or_insert_with(|| self.zero_response())
            .clone()
    }

    /// Serialize `value` into the response slot, overwriting any previous
    /// write (last-write-wins).
    pub fn respond_with<T: Serialize>(&self, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.respond_with_value(value);
        Ok(())
    }

    /// Write an already-decoded value into the response slot.
    pub fn respond_with_value(&self, value: Value) {
        *self.response.borrow_mut() = Some(value);
    }

    /// Build a classified domain failure carrying `message`.
    ///
    /// The sanctioned way for a handler to abort its own call:
    ///
    /// ```ignore
    /// return Err(instance.fail_deliberately("no such resource"));
    /// ```
    pub fn fail_deliberately<M: FailureMessage>(&self, message: M) -> CallwireError {
        CallwireError::Deliberate(message.failure_message())
    }

    /// Build a deferred zero-argument invokable for the named method.
    ///
    /// The handler body is resolved once, now; building has no side
    /// effects. Only [`BoundCall::invoke`] runs the filter pipeline and
    /// the handler.
    pub fn callable_for(&self, method_name: &str) -> BoundCall<'_> {
        BoundCall {
            instance: self,
            method: method_name.to_string(),
            handler: self.service_type().handler(method_name),
        }
    }

    fn zero_response(&self) -> Value {
        self.env
            .service_type()
            .registry()
            .lookup(self.env.method_name())
            .map(|descriptor| descriptor.response_type().zero_value())
            .unwrap_or(Value::Null)
    }
}

/// Deferred invokable wrapping one handler invocation.
///
/// Produced by [`ServiceInstance::callable_for`]; invoking it runs the
/// service's filter pipeline around the resolved handler.
pub struct BoundCall<'a> {
    instance: &'a ServiceInstance,
    method: String,
    handler: Option<Arc<dyn Handler>>,
}

impl BoundCall<'_> {
    /// Get the method name this call is bound to.
    pub fn method_name(&self) -> &str {
        &self.method
    }

    /// Run the filter pipeline around the handler.
    ///
    /// Fails with `HandlerNotImplemented` when the method has a registry
    /// entry but no body; every fault propagates unmodified.
    pub fn invoke(self) -> Result<()> {
        let BoundCall {
            instance,
            method,
            handler,
        } = self;

        let handler = match handler {
            Some(handler) => handler,
            None => {
                return Err(CallwireError::HandlerNotImplemented {
                    service: instance.env().service_name().to_string(),
                    method,
                })
            }
        };

        instance
            .service_type()
            .filters()
            .run(&method, instance, handler.as_ref())
    }
}
