//! Wire types for the Pingdom 2.0 REST API.

use serde::{Deserialize, Serialize};

/// A single check as returned by `GET /checks`.
///
/// Paused or freshly created checks may omit timing fields, so they fall
/// back to zero.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Check {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub hostname: String,
    pub status: String,
    #[serde(default, rename = "lastresponsetime")]
    pub last_response_time: i64,
    /// Check interval in minutes.
    #[serde(default)]
    pub resolution: i64,
}

/// Body of a successful `GET /checks` response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckList {
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    #[serde(rename = "statuscode")]
    pub status_code: u16,
    #[serde(rename = "statusdesc", default)]
    pub status_desc: String,
    #[serde(rename = "errormessage", default)]
    pub error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_list() {
        let body = r#"{
            "checks": [
                {
                    "id": 85975,
                    "created": 1297446423,
                    "name": "My check 1",
                    "hostname": "example.com",
                    "use_legacy_notifications": true,
                    "resolution": 1,
                    "type": "http",
                    "lastresponsetime": 355,
                    "status": "up"
                }
            ]
        }"#;

        let list: CheckList = serde_json::from_str(body).unwrap();
        assert_eq!(list.checks.len(), 1);

        let check = &list.checks[0];
        assert_eq!(check.id, 85975);
        assert_eq!(check.name, "My check 1");
        assert_eq!(check.hostname, "example.com");
        assert_eq!(check.status, "up");
        assert_eq!(check.last_response_time, 355);
        assert_eq!(check.resolution, 1);
    }

    #[test]
    fn test_paused_check_without_timing() {
        let body = r#"{"id": 7, "name": "paused", "status": "paused"}"#;
        let check: Check = serde_json::from_str(body).unwrap();
        assert_eq!(check.last_response_time, 0);
        assert_eq!(check.resolution, 0);
        assert!(check.hostname.is_empty());
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"error": {"statuscode": 403, "statusdesc": "Forbidden", "errormessage": "Invalid application key"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.error.status_code, 403);
        assert_eq!(envelope.error.error_message, "Invalid application key");
    }
}
