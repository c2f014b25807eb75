//! Configuration validation.

use std::net::{SocketAddr, ToSocketAddrs};
use thiserror::Error;

/// Errors in command line configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address '{address}': {reason}")]
    InvalidListenAddress { address: String, reason: String },

    #[error("invalid metrics path '{0}': must start with '/' and must not be '/'")]
    InvalidMetricsPath(String),
}

/// Resolve a listen address.
///
/// Accepts `host:port`, `ip:port` and the bare `:port` form, which binds
/// every IPv4 interface.
pub fn parse_listen_address(address: &str) -> Result<SocketAddr, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidListenAddress {
        address: address.to_string(),
        reason,
    };

    let candidate = match address.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => address.to_string(),
    };

    if let Ok(addr) = candidate.parse::<SocketAddr>() {
        return Ok(addr);
    }

    candidate
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no addresses resolved".to_string()))
}

/// The root path is reserved for the landing page.
pub fn validate_metrics_path(path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') || path == "/" {
        return Err(ConfigError::InvalidMetricsPath(path.to_string()));
    }
    Ok(())
}
