//! Drive file listing tool definition.

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

fn default_page_size() -> u32 {
    100
}

/// Parameters for the Drive listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriveListParams {
    /// Maximum number of files to return.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Drive listing tool.
pub struct DriveListTool;

impl DriveListTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "drive_list";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List files in Google Drive with id, name, type, size, and modification time.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(page_size = params.page_size))]
    pub fn execute(params: &DriveListParams, config: &Config) -> CallToolResult {
        info!("Drive listing requested");

        let client = match DriveClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let query = [
            ("pageSize", params.page_size.to_string()),
            (
                "fields",
                "files(id,name,mimeType,size,modifiedTime)".to_string(),
            ),
        ];

        match client.get_json("/files", &query) {
            Ok(payload) => {
                let count = payload["files"].as_array().map(|f| f.len()).unwrap_or(0);
                json_success(serde_json::json!({
                    "count": count,
                    "files": payload["files"]
                }))
            }
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

        let params: DriveListParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<DriveListParams>(),
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
                let params: DriveListParams =
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
