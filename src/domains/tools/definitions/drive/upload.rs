//! Drive local-file upload tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fs;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::config::Config;
use crate::core::security::validate_path;
use crate::domains::tools::common::{error_result, json_success};

use super::client::DriveClient;

fn default_mime_type() -> String {
    "application/octet-stream".to_string()
}

/// Parameters for the Drive upload tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriveUploadParams {
    /// Local file path to upload (must be within the allowed roots).
    pub file_path: String,

    /// MIME type of the file.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Optional parent folder id.
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// Drive upload tool - sends a local file to Drive.
pub struct DriveUploadTool;

impl DriveUploadTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "drive_upload";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Upload a local file to Google Drive, optionally into a specific folder.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.file_path))]
    pub fn execute(params: &DriveUploadParams, config: &Config) -> CallToolResult {
        info!("Drive upload requested for {}", params.file_path);

        let path = match validate_path(&params.file_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        if !path.is_file() {
            return error_result("Specified path is not a file");
        }

        let client = match DriveClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let content = match fs::read(&path) {
            Ok(c) => c,
            Err(e) => return error_result(&format!("Failed to read file: {}", e)),
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        let mut metadata = serde_json::json!({ "name": name });
        if let Some(folder_id) = &params.folder_id {
            metadata["parents"] = serde_json::json!([folder_id]);
        }

        let size = content.len();
        match client.create_multipart(metadata, content, &params.mime_type) {
            Ok(file) => json_success(serde_json::json!({
                "message": "File uploaded successfully",
                "local_path": params.file_path,
                "size": size,
                "file": file
            })),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: DriveUploadParams = parse_params(arguments)?;

        let handle = std::thread::spawn(move || Self::execute(&params, &config));
        let result = handle
            .join()
            .map_err(|_| "Tool thread panicked".to_string())?;

        Ok(http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DriveUploadParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: DriveUploadParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let handle = std::thread::spawn(move || Self::execute(&params, &config));
                let result = handle
                    .join()
                    .map_err(|_| McpError::internal_error("Tool thread panicked", None))?;

                Ok(result)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_local_file_is_reported() {
        let params = DriveUploadParams {
            file_path: "/nonexistent/upload.bin".to_string(),
            mime_type: default_mime_type(),
            folder_id: None,
        };
        let result = DriveUploadTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_missing_token_reported_after_path_check() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.bin");
        fs::write(&file, b"payload").unwrap();

        let params = DriveUploadParams {
            file_path: file.to_string_lossy().to_string(),
            mime_type: default_mime_type(),
            folder_id: None,
        };
        let result = DriveUploadTool::execute(&params, &Config::default());
        // Path is fine; the failure is the missing token.
        assert!(result.is_error.unwrap_or(false));
    }
}
