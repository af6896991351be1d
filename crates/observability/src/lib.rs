//! Tracing and logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Logging capability handed to services at construction.
pub mod logger;

pub use logger::{Logger, NoopLogger, TracingLogger};
pub use tracing::LogFormat;
