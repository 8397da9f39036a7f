//! Drive file update tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::tools::common::{error_result, json_success};

use super::client::DriveClient;

fn default_mime_type() -> String {
    "text/plain".to_string()
}

/// Parameters for the Drive update tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriveUpdateParams {
    /// Id of the file to update.
    pub file_id: String,

    /// New content of the file.
    pub content: String,

    /// MIME type of the content.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

/// Drive update tool - replaces a file's content.
pub struct DriveUpdateTool;

impl DriveUpdateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "drive_update";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update the content of an existing Google Drive file.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file_id = %params.file_id))]
    pub fn execute(params: &DriveUpdateParams, config: &Config) -> CallToolResult {
        info!("Drive update requested for {}", params.file_id);

        let client = match DriveClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        match client.update_media(
            &params.file_id,
            params.content.clone().into_bytes(),
            &params.mime_type,
        ) {
            Ok(file) => json_success(serde_json::json!({
                "message": "File updated successfully",
                "file_id": params.file_id,
                "size": params.content.len(),
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

        let params: DriveUpdateParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<DriveUpdateParams>(),
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
                let params: DriveUpdateParams =
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

    #[test]
    fn test_params_defaults() {
        let json = r#"{"file_id": "abc", "content": "new"}"#;
        let params: DriveUpdateParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.mime_type, "text/plain");
    }

    #[test]
    fn test_missing_token_is_reported() {
        let params = DriveUpdateParams {
            file_id: "abc".to_string(),
            content: "new".to_string(),
            mime_type: default_mime_type(),
        };
        let result = DriveUpdateTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
