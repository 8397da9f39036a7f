//! Drive file download tool definition.

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
use crate::core::security::validate_parent_path;
use crate::domains::tools::common::{error_result, json_success};

use super::client::DriveClient;

/// Parameters for the Drive download tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriveDownloadParams {
    /// Id of the file to download.
    pub file_id: String,

    /// Local path to save to. When omitted, the content is returned inline
    /// (UTF-8 text only).
    #[serde(default)]
    pub save_path: Option<String>,
}

/// Drive download tool - reads file content from Drive.
pub struct DriveDownloadTool;

impl DriveDownloadTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "drive_download";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read file content from Google Drive. Text content is returned \
         inline; pass save_path to store binary files locally.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file_id = %params.file_id))]
    pub fn execute(params: &DriveDownloadParams, config: &Config) -> CallToolResult {
        info!("Drive download requested for {}", params.file_id);

        let client = match DriveClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let bytes = match client.get_media(&params.file_id) {
            Ok(b) => b,
            Err(e) => return error_result(&e.to_string()),
        };

        match &params.save_path {
            Some(save_path) => {
                let path = match validate_parent_path(save_path, config) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!("Save path validation failed: {}", e);
                        return error_result(&format!("Save path validation failed: {}", e));
                    }
                };

                if let Err(e) = fs::write(&path, &bytes) {
                    return error_result(&format!("Failed to write file: {}", e));
                }

                json_success(serde_json::json!({
                    "message": "File downloaded successfully",
                    "file_id": params.file_id,
                    "save_path": save_path,
                    "size": bytes.len()
                }))
            }
            None => match String::from_utf8(bytes) {
                Ok(content) => {
                    let size = content.len();
                    json_success(serde_json::json!({
                        "file_id": params.file_id,
                        "content": content,
                        "size": size
                    }))
                }
                Err(_) => error_result(
                    "File content is not UTF-8 text; pass save_path to store it locally",
                ),
            },
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: DriveDownloadParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<DriveDownloadParams>(),
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
                let params: DriveDownloadParams =
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
