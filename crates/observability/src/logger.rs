//! Injectable logging capability.
//!
//! Services take a `Logger` at construction instead of reaching for a global.
//! The production implementation forwards to `tracing`, so records still flow
//! through the subscriber installed by [`crate::init`].

use std::sync::Arc;

/// Minimal logging contract.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);

    fn warn(&self, message: &str) {
        self.log(message);
    }
}

impl<L> Logger for Arc<L>
where
    L: Logger + ?Sized,
{
    fn log(&self, message: &str) {
        (**self).log(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }
}

/// Logger that emits `tracing` events tagged with a component name.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn component(&self) -> &'static str {
        self.component
    }
}

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        ::tracing::info!(component = self.component, "{message}");
    }

    fn warn(&self, message: &str) {
        ::tracing::warn!(component = self.component, "{message}");
    }
}

/// Logger that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}
}
