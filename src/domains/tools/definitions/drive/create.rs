//! Drive file creation tool definition.

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

/// Parameters for the Drive file creation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriveCreateParams {
    /// Name of the file to create.
    pub name: String,

    /// Inline content of the file.
    pub content: String,

    /// MIME type of the content.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Optional parent folder id.
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// Drive file creation tool.
pub struct DriveCreateTool;

impl DriveCreateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "drive_create";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create a new file in Google Drive from inline content, optionally inside a folder.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(name = %params.name))]
    pub fn execute(params: &DriveCreateParams, config: &Config) -> CallToolResult {
        info!("Drive create requested for {}", params.name);

        let client = match DriveClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let mut metadata = serde_json::json!({ "name": params.name });
        if let Some(folder_id) = &params.folder_id {
            metadata["parents"] = serde_json::json!([folder_id]);
        }

        match client.create_multipart(
            metadata,
            params.content.clone().into_bytes(),
            &params.mime_type,
        ) {
            Ok(file) => json_success(serde_json::json!({
                "message": "File created successfully",
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

        let params: DriveCreateParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<DriveCreateParams>(),
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
                let params: DriveCreateParams =
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
