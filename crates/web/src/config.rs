//! Environment configuration for the web edge.

use std::net::SocketAddr;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "MEDIMART_BIND_ADDR";
pub const SECURE_COOKIES_VAR: &str = "MEDIMART_SECURE_COOKIES";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebConfigError {
    #[error("{var} is not a socket address: '{value}'")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var} must be 'true' or 'false', got '{value}'")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub bind_addr: SocketAddr,
    /// Mark session cookies `Secure` (HTTPS deployments).
    pub secure_cookies: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            secure_cookies: false,
        }
    }
}

impl WebConfig {
    pub fn from_env() -> Result<Self, WebConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup (used by `from_env` and tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WebConfigError> {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| WebConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: raw_addr.clone(),
            })?;

        let secure_cookies = match lookup(SECURE_COOKIES_VAR) {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" | "" => false,
                _ => {
                    return Err(WebConfigError::InvalidFlag {
                        var: SECURE_COOKIES_VAR,
                        value,
                    });
                }
            },
        };

        Ok(Self {
            bind_addr,
            secure_cookies,
        })
    }
}
