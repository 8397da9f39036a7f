//! Blocking HTTP client for the CWA open-data platform.
//!
//! All CWA datasets share one access shape: a GET against
//! `/v1/rest/datastore/{dataset}` with an `Authorization` key and
//! dataset-specific query parameters, returning a JSON payload whose
//! `records` subtree is the part callers care about.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::core::config::Config;

/// Production endpoint of the CWA open-data platform.
pub const DEFAULT_BASE_URL: &str = "https://opendata.cwa.gov.tw/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the CWA client.
#[derive(Debug, Error)]
pub enum CwaError {
    /// No authorization key in the configuration.
    #[error("CWA authorization key is not configured (set CWA_AUTH_KEY)")]
    MissingAuthKey,

    /// Transport-level or HTTP-status failure.
    #[error("CWA request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The payload came back without the `records` subtree.
    #[error("CWA response has no 'records' field")]
    MissingRecords,
}

/// Client for the CWA datastore endpoints.
pub struct CwaClient {
    http: Client,
    base_url: String,
    auth_key: String,
}

impl CwaClient {
    /// Build a client from the server configuration.
    pub fn from_config(config: &Config) -> Result<Self, CwaError> {
        let auth_key = config
            .credentials
            .cwa_auth_key
            .clone()
            .ok_or(CwaError::MissingAuthKey)?;
        Ok(Self::new(auth_key))
    }

    /// Build a client against the production endpoint.
    pub fn new(auth_key: String) -> Self {
        Self::with_base_url(auth_key, DEFAULT_BASE_URL.to_string())
    }

    /// Build a client against an arbitrary endpoint (tests).
    pub fn with_base_url(auth_key: String, base_url: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url,
            auth_key,
        }
    }

    /// Query a datastore dataset and return its `records` subtree.
    pub fn datastore_records(
        &self,
        dataset_id: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, CwaError> {
        let url = format!("{}/v1/rest/datastore/{}", self.base_url, dataset_id);

        let mut request = self
            .http
            .get(&url)
            .query(&[("Authorization", self.auth_key.as_str())]);
        for (key, value) in query {
            request = request.query(&[(*key, value.as_str())]);
        }

        let payload: serde_json::Value = request.send()?.error_for_status()?.json()?;
        extract_records(payload)
    }
}

/// Pull the `records` subtree out of a datastore payload.
fn extract_records(payload: serde_json::Value) -> Result<serde_json::Value, CwaError> {
    payload
        .get("records")
        .cloned()
        .ok_or(CwaError::MissingRecords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_records() {
        let payload = serde_json::json!({
            "success": "true",
            "records": { "location": [{ "locationName": "花蓮縣" }] }
        });
        let records = extract_records(payload).unwrap();
        assert_eq!(records["location"][0]["locationName"], "花蓮縣");
    }

    #[test]
    fn test_extract_records_missing() {
        let payload = serde_json::json!({ "success": "false" });
        assert!(matches!(
            extract_records(payload),
            Err(CwaError::MissingRecords)
        ));
    }

    #[test]
    fn test_from_config_requires_auth_key() {
        let config = Config::default();
        assert!(matches!(
            CwaClient::from_config(&config),
            Err(CwaError::MissingAuthKey)
        ));
    }
}
