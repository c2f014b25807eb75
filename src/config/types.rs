//! Configuration data types.

use crate::pingdom::Credentials;
use clap::ValueEnum;
use std::net::SocketAddr;
use std::time::Duration;

/// Fully resolved exporter configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the metrics server binds to.
    pub listen_address: SocketAddr,

    /// Path serving the metrics exposition.
    pub metrics_path: String,

    /// Log level: trace, debug, info, warn, error
    pub log_level: String,

    /// Log format: json or pretty
    pub log_format: LogFormat,

    /// Upstream API settings
    pub pingdom: PingdomConfig,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Pingdom API access.
#[derive(Debug, Clone)]
pub struct PingdomConfig {
    /// API root, without the trailing `/checks`.
    pub base_url: String,

    /// Per-request timeout enforced by the HTTP client.
    pub timeout: Duration,

    /// Account credentials, passed through untouched.
    pub credentials: Credentials,
}
