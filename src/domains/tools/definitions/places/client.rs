//! Blocking HTTP client for the Google Places API (New).
//!
//! Requests carry the API key in the `X-Goog-Api-Key` header and declare the
//! wanted response fields through `X-Goog-FieldMask`, as the v1 API
//! requires. Search endpoints prefix field paths with `places.`; the details
//! endpoint uses them bare.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::core::config::Config;

/// Production endpoint of the Places API (New).
pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1";

/// Language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "zh-TW";

/// Result cap used when the caller does not pick one.
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Nearby-search radius used when the caller does not pick one.
pub const DEFAULT_RADIUS_METERS: f64 = 500.0;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Field paths returned by default.
pub const BASIC_FIELD_PATHS: [&str; 5] =
    ["id", "displayName", "formattedAddress", "location", "types"];

/// Additional field paths for extended responses.
pub const EXTENDED_FIELD_PATHS: [&str; 7] = [
    "rating",
    "userRatingCount",
    "websiteUri",
    "nationalPhoneNumber",
    "regularOpeningHours",
    "currentOpeningHours",
    "googleMapsUri",
];

/// Errors from the Places client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// No API key in the configuration.
    #[error("Places API key is not configured (set GOOGLE_MAPS_API_KEY)")]
    MissingApiKey,

    /// Transport-level failure.
    #[error("Places request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Places API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },
}

/// Client for the Places v1 endpoints.
pub struct PlacesClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    /// Build a client from the server configuration.
    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        let api_key = config
            .credentials
            .places_api_key
            .clone()
            .ok_or(PlacesError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Build a client against the production endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Build a client against an arbitrary endpoint (tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// POST a search-style endpoint with a JSON body.
    pub fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        field_mask: Option<&str>,
    ) -> Result<serde_json::Value, PlacesError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&body);
        if let Some(mask) = field_mask {
            request = request.header("X-Goog-FieldMask", mask);
        }

        Self::parse_json(request.send()?)
    }

    /// GET a resource endpoint.
    pub fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
        field_mask: Option<&str>,
    ) -> Result<serde_json::Value, PlacesError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .get(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .query(query);
        if let Some(mask) = field_mask {
            request = request.header("X-Goog-FieldMask", mask);
        }

        Self::parse_json(request.send()?)
    }

    /// GET binary media (photo downloads), returning the bytes and the
    /// reported content type.
    pub fn get_media(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(Vec<u8>, Option<String>), PlacesError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        Ok((response.bytes()?.to_vec(), content_type))
    }

    fn parse_json(response: reqwest::blocking::Response) -> Result<serde_json::Value, PlacesError> {
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(response.json()?)
    }
}

/// Build an `X-Goog-FieldMask` value.
///
/// `prefix` is `"places."` for search endpoints and `""` for the details
/// endpoint; `extended` widens the mask beyond the basic field set.
pub fn field_mask(extended: bool, prefix: &str) -> String {
    let mut paths: Vec<String> = BASIC_FIELD_PATHS
        .iter()
        .map(|p| format!("{prefix}{p}"))
        .collect();
    if extended {
        paths.extend(EXTENDED_FIELD_PATHS.iter().map(|p| format!("{prefix}{p}")));
    }
    paths.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_api_key() {
        let config = Config::default();
        assert!(matches!(
            PlacesClient::from_config(&config),
            Err(PlacesError::MissingApiKey)
        ));
    }

    #[test]
    fn test_basic_field_mask() {
        let mask = field_mask(false, "places.");
        assert_eq!(
            mask,
            "places.id,places.displayName,places.formattedAddress,places.location,places.types"
        );
    }

    #[test]
    fn test_extended_field_mask_without_prefix() {
        let mask = field_mask(true, "");
        assert!(mask.starts_with("id,displayName"));
        assert!(mask.contains("rating"));
        assert!(mask.ends_with("googleMapsUri"));
    }
}
