//! Filter pipeline - ordered interceptors around handler invocation.
//!
//! A [`FilterPipeline`] is an ordered sequence of [`Filter`]s wrapping the
//! call to a handler. Execution order for filters `[f1, f2]`:
//!
//! ```text
//! f1.before → f2.before → f1.around( f2.around( handler ) ) → f2.after → f1.after
//! ```
//!
//! Faults inside any hook or the wrapped handler propagate through the
//! pipeline unmodified. `after` hooks run only when the call succeeded.
//!
//! # Example
//!
//! ```ignore
//! struct Timing;
//!
//! impl Filter for Timing {
//!     fn around(&self, method: &str, instance: &ServiceInstance, next: Next<'_>) -> Result<()> {
//!         let start = std::time::Instant::now();
//!         let result = next.run();
//!         tracing::debug!(method, elapsed = ?start.elapsed(), "handled");
//!         result
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::error::Result;
use crate::service::{Handler, ServiceInstance};

/// Continuation handed to [`Filter::around`].
///
/// Calling [`run`](Next::run) proceeds to the next filter (or the handler
/// itself, for the innermost filter). Dropping it without calling skips
/// the rest of the chain.
pub struct Next<'a> {
    run: Box<dyn FnOnce() -> Result<()> + 'a>,
}

impl<'a> Next<'a> {
    fn new(run: impl FnOnce() -> Result<()> + 'a) -> Self {
        Self { run: Box::new(run) }
    }

    /// Proceed down the chain.
    pub fn run(self) -> Result<()> {
        (self.run)()
    }
}

/// Interceptor with before/around/after hooks.
///
/// All hooks default to pass-through; implement only what you need.
pub trait Filter: Send + Sync {
    /// Runs before the around chain, in registration order.
    fn before(&self, _method: &str, _instance: &ServiceInstance) -> Result<()> {
        Ok(())
    }

    /// Wraps the rest of the chain. Call `next.run()` to proceed.
    fn around(&self, _method: &str, _instance: &ServiceInstance, next: Next<'_>) -> Result<()> {
        next.run()
    }

    /// Runs after a successful call, in reverse registration order.
    fn after(&self, _method: &str, _instance: &ServiceInstance) -> Result<()> {
        Ok(())
    }
}

/// Ordered interceptor chain for one service type.
#[derive(Clone, Default)]
pub struct FilterPipeline {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter to the end of the chain.
    pub fn push(&mut self, filter: Arc<dyn Filter>) {
        self.filters.push(filter);
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the pipeline has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run the pipeline around `handler` for the named method.
    pub fn run(
        &self,
        method: &str,
        instance: &ServiceInstance,
        handler: &dyn Handler,
    ) -> Result<()> {
        for filter in &self.filters {
            filter.before(method, instance)?;
        }

        self.run_around(0, method, instance, handler)?;

        for filter in self.filters.iter().rev() {
            filter.after(method, instance)?;
        }
        Ok(())
    }

    fn run_around(
        &self,
        depth: usize,
        method: &str,
        instance: &ServiceInstance,
        handler: &dyn Handler,
    ) -> Result<()> {
        match self.filters.get(depth) {
            Some(filter) => {
                let next = Next::new(move || self.run_around(depth + 1, method, instance, handler));
                filter.around(method, instance, next)
            }
            None => handler.call(instance),
        }
    }
}
