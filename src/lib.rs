//! pingdom-exporter - Prometheus exporter for Pingdom checks
//!
//! On every scrape the exporter lists the account's checks through the
//! Pingdom API and reports, per check:
//! - status as one indicator gauge per known state
//! - last response time in milliseconds
//! - check resolution in minutes
//!
//! plus `pingdom_up`, which drops to 0 when the API call fails.

pub mod config;
pub mod metrics;
pub mod pingdom;
pub mod util;

pub use config::Config;
pub use metrics::{MetricsServer, PingdomExporter};
