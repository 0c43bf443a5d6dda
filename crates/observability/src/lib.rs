//! Tracing and logging setup shared by the binaries.

pub use crate::tracing::{LogConfig, LogFormat};

/// Initialize process-wide tracing/logging for `service`, configured from
/// the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(service: &'static str) {
    tracing::init(LogConfig::from_env(service));
}

/// Subscriber configuration (filters, output format, service tagging).
pub mod tracing;
