//! Subscriber installation.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Selects the output format: `json` (default) or `pretty` for local runs.
pub const LOG_FORMAT_VAR: &str = "MEDIMART_LOG_FORMAT";

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Unknown values fall back to JSON so production output never changes shape.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Reported as the `service` field of the startup event.
    pub service: &'static str,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn from_env(service: &'static str) -> Self {
        Self::from_lookup(service, |var| std::env::var(var).ok())
    }

    pub fn from_lookup(service: &'static str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service,
            format: lookup(LOG_FORMAT_VAR)
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG` and tag the process with
/// its service name.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init()
            .is_ok(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .with_target(false)
            .try_init()
            .is_ok(),
    };

    if installed {
        ::tracing::info!(service = config.service, format = ?config.format, "logging initialised");
    }
}
