//! Pingdom API client.
//!
//! Only the check listing endpoint is covered; it is the single upstream
//! call the exporter makes per scrape.

mod client;
mod types;

pub use client::{ChecksApi, Credentials, DEFAULT_BASE_URL, PingdomClient, PingdomError};
pub use types::{ApiError, Check, CheckList, ErrorEnvelope};
