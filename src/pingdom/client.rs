//! HTTP client for the Pingdom check listing endpoint.

use crate::pingdom::{Check, CheckList, ErrorEnvelope};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default Pingdom API root.
pub const DEFAULT_BASE_URL: &str = "https://api.pingdom.com/api/2.0";

/// Errors returned by the Pingdom client.
#[derive(Debug, Error)]
pub enum PingdomError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Source of the account's check list.
///
/// Implementations must be safe to call concurrently; the exporter may
/// serve overlapping scrapes against the same instance.
#[async_trait]
pub trait ChecksApi: Send + Sync {
    /// List every check on the account.
    async fn list_checks(&self) -> Result<Vec<Check>, PingdomError>;
}

/// Account credentials, passed through to the API untouched.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Pingdom 2.0 REST client.
#[derive(Debug, Clone)]
pub struct PingdomClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl PingdomClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, PingdomError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pingdom-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn checks_url(&self) -> String {
        format!("{}/checks", self.base_url)
    }
}

#[async_trait]
impl ChecksApi for PingdomClient {
    async fn list_checks(&self) -> Result<Vec<Check>, PingdomError> {
        let url = self.checks_url();
        debug!(url = %url, "listing pingdom checks");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header("App-Key", &self.credentials.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(status = %status, error = %e, "failed to read error response body");
                    String::new()
                }
            };
            return Err(PingdomError::Api {
                status,
                message: error_message(status, &body),
            });
        }

        let list: CheckList = response.json().await?;
        Ok(list.checks)
    }
}

/// Extract a readable message from an error response body, falling back to
/// the status reason when the body has nothing to say.
fn error_message(status: StatusCode, body: &str) -> String {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.error_message.is_empty() => envelope.error.error_message,
        Ok(envelope) => envelope.error.status_desc,
        Err(_) => body.trim().to_string(),
    };

    if message.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        message
    }
}
