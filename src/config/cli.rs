//! Command line surface.

use crate::config::{
    Config, ConfigError, LogFormat, PingdomConfig, parse_listen_address, validate_metrics_path,
};
use crate::pingdom::{Credentials, DEFAULT_BASE_URL};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Prometheus exporter for Pingdom check status.
#[derive(Parser, Debug)]
#[command(name = "pingdom-exporter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on for web interface and telemetry
    #[arg(long = "web.listen-address", value_name = "ADDR", default_value = ":8000", global = true)]
    pub listen_address: String,

    /// Path under which to expose metrics
    #[arg(long = "web.metrics-path", value_name = "PATH", default_value = "/metrics", global = true)]
    pub metrics_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log.level", value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long = "log.format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// Pingdom API root
    #[arg(long = "pingdom.url", value_name = "URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub pingdom_url: String,

    /// Timeout for each Pingdom API request (e.g. 10s, 1m)
    #[arg(
        long = "pingdom.timeout",
        value_name = "DURATION",
        default_value = "10s",
        value_parser = humantime::parse_duration,
        global = true
    )]
    pub pingdom_timeout: Duration,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve metrics for a Pingdom account
    Server(ServerArgs),
}

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Username for the Pingdom account
    #[arg(value_name = "pingdom.username")]
    pub username: String,

    /// Password for the Pingdom account
    #[arg(value_name = "pingdom.password")]
    pub password: String,

    /// API key
    #[arg(value_name = "pingdom.key")]
    pub api_key: String,
}

impl Cli {
    /// Validate the parsed arguments and resolve them into a [`Config`].
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let listen_address = parse_listen_address(&self.listen_address)?;
        validate_metrics_path(&self.metrics_path)?;

        let Command::Server(server) = self.command;

        Ok(Config {
            listen_address,
            metrics_path: self.metrics_path,
            log_level: self.log_level,
            log_format: self.log_format,
            pingdom: PingdomConfig {
                base_url: self.pingdom_url,
                timeout: self.pingdom_timeout,
                credentials: Credentials {
                    username: server.username,
                    password: server.password,
                    api_key: server.api_key,
                },
            },
        })
    }
}
