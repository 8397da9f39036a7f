//! Blocking HTTP client for the Google Drive v3 REST API.
//!
//! Authentication is a bearer token supplied through configuration; the
//! OAuth flow that produces it is outside this server. Metadata requests go
//! to the API base, content uploads to the upload base with
//! `multipart/related` bodies as the Drive documentation specifies.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::core::config::Config;

/// Metadata endpoint base.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Content upload endpoint base.
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload/drive/v3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const MULTIPART_BOUNDARY: &str = "toolbox_drive_boundary";

/// Errors from the Drive client.
#[derive(Debug, Error)]
pub enum DriveError {
    /// No access token in the configuration.
    #[error("Drive access token is not configured (set GOOGLE_DRIVE_ACCESS_TOKEN)")]
    MissingAccessToken,

    /// Transport-level failure.
    #[error("Drive request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Drive API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },
}

/// Client for the Drive v3 endpoints.
pub struct DriveClient {
    http: Client,
    api_base: String,
    upload_base: String,
    token: String,
}

impl DriveClient {
    /// Build a client from the server configuration.
    pub fn from_config(config: &Config) -> Result<Self, DriveError> {
        let token = config
            .credentials
            .drive_access_token
            .clone()
            .ok_or(DriveError::MissingAccessToken)?;
        Ok(Self::new(token))
    }

    /// Build a client against the production endpoints.
    pub fn new(token: String) -> Self {
        Self::with_base_urls(
            token,
            DEFAULT_API_BASE_URL.to_string(),
            DEFAULT_UPLOAD_BASE_URL.to_string(),
        )
    }

    /// Build a client against arbitrary endpoints (tests).
    pub fn with_base_urls(token: String, api_base: String, upload_base: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_base,
            upload_base,
            token,
        }
    }

    /// GET a metadata endpoint and parse the JSON payload.
    pub fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, DriveError> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()?;

        Self::parse_json(response)
    }

    /// GET file content with `alt=media`.
    pub fn get_media(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        let url = format!("{}/files/{}", self.api_base, file_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("alt", "media")])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DriveError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }

    /// Create a file with metadata and content in one `multipart/related`
    /// request.
    pub fn create_multipart(
        &self,
        metadata: serde_json::Value,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<serde_json::Value, DriveError> {
        let url = format!(
            "{}/files?uploadType=multipart&fields=id,name,mimeType",
            self.upload_base
        );

        let body = build_related_body(&metadata, &content, content_type);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(body)
            .send()?;

        Self::parse_json(response)
    }

    /// Replace a file's content with `uploadType=media`.
    pub fn update_media(
        &self,
        file_id: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<serde_json::Value, DriveError> {
        let url = format!(
            "{}/files/{}?uploadType=media&fields=id,name,mimeType",
            self.upload_base, file_id
        );

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, content_type.to_string())
            .body(content)
            .send()?;

        Self::parse_json(response)
    }

    /// DELETE a file.
    pub fn delete(&self, file_id: &str) -> Result<(), DriveError> {
        let url = format!("{}/files/{}", self.api_base, file_id);
        let response = self.http.delete(&url).bearer_auth(&self.token).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DriveError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(())
    }

    fn parse_json(response: reqwest::blocking::Response) -> Result<serde_json::Value, DriveError> {
        let status = response.status();
        if !status.is_success() {
            return Err(DriveError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(response.json()?)
    }
}

/// Assemble a `multipart/related` body: JSON metadata part, then media part.
fn build_related_body(
    metadata: &serde_json::Value,
    content: &[u8],
    content_type: &str,
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{MULTIPART_BOUNDARY}\r\nContent-Type: {content_type}\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--").as_bytes());
    body
}

/// Build a Drive search query matching file names containing `needle`.
///
/// Single quotes and backslashes are escaped per the Drive query syntax.
pub fn name_contains_query(needle: &str) -> String {
    let escaped = needle.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name contains '{escaped}'")
}
