//! Service configuration.

use std::net::SocketAddr;

use thiserror::Error;

/// Default bind address when `OPENFORM_ADDR` is unset.
const DEFAULT_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);

/// Fallback signing secret for development setups.
const DEV_SECRET: &str = "openform-dev-secret";

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `OPENFORM_ADDR` did not parse as a socket address.
    #[error("invalid OPENFORM_ADDR `{0}`")]
    InvalidAddr(String),
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// HS256 secret used to sign and verify bearer tokens.
    pub auth_secret: String,
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to
    /// development defaults where a variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = match std::env::var("OPENFORM_ADDR") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidAddr(raw))?,
            Err(_) => SocketAddr::from(DEFAULT_ADDR),
        };
        let auth_secret = match std::env::var("OPENFORM_AUTH_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("OPENFORM_AUTH_SECRET not set, using development secret");
                DEV_SECRET.to_string()
            }
        };
        Ok(Self { bind_addr, auth_secret })
    }
}
