//! Handler trait and typed wrapper.
//!
//! A [`Handler`] receives the per-call [`ServiceInstance`] and reports its
//! result through the instance's response slot. [`TypedHandler`] wraps a
//! plain closure, deserializing the decoded request into the closure's
//! parameter type before calling it.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::instance::ServiceInstance;
use crate::error::Result;

/// Result type for handler functions.
pub type HandlerResult = Result<()>;

/// Trait for handler bodies.
pub trait Handler: Send + Sync + 'static {
    /// Handle one call bound to `instance`.
    fn call(&self, instance: &ServiceInstance) -> HandlerResult;
}

/// Wrapper that deserializes the request before calling the handler.
pub struct TypedHandler<F, T>
where
    F: Fn(T, &ServiceInstance) -> HandlerResult + Send + Sync + 'static,
    T: DeserializeOwned + 'static,
{
    handler: F,
    _phantom: PhantomData<fn(T)>,
}

impl<F, T> TypedHandler<F, T>
where
    F: Fn(T, &ServiceInstance) -> HandlerResult + Send + Sync + 'static,
    T: DeserializeOwned + 'static,
{
    /// Create a new typed handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, T> Handler for TypedHandler<F, T>
where
    F: Fn(T, &ServiceInstance) -> HandlerResult + Send + Sync + 'static,
    T: DeserializeOwned + 'static,
{
    fn call(&self, instance: &ServiceInstance) -> HandlerResult {
        let parsed: T = instance.request()?;
        (self.handler)(parsed, instance)
    }
}
