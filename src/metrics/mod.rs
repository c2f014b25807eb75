//! Metric schema, scrape-time collection and exposition.

mod build_info;
mod exporter;
pub mod schema;
mod server;

pub use build_info::{BuildInfoLabels, register_build_info};
pub use exporter::{PingdomExporter, Scrape};
pub use schema::{CheckStatus, Descriptor, Sample, describe};
pub use server::{MetricsServer, OPENMETRICS_CONTENT_TYPE};
