//! Drive file search tool definition.

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

use super::client::{DriveClient, name_contains_query};

fn default_page_size() -> u32 {
    100
}

/// Parameters for the Drive search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriveSearchParams {
    /// Text the file name must contain.
    pub query: String,

    /// Maximum number of matches to return.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Drive search tool - finds files by name fragment.
pub struct DriveSearchTool;

impl DriveSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "drive_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Search Google Drive for files whose name contains the query, returning ids and names.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(query = %params.query))]
    pub fn execute(params: &DriveSearchParams, config: &Config) -> CallToolResult {
        info!("Drive search requested for '{}'", params.query);

        let client = match DriveClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let query = [
            ("q", name_contains_query(&params.query)),
            ("pageSize", params.page_size.to_string()),
            ("fields", "files(id,name,mimeType)".to_string()),
        ];

        match client.get_json("/files", &query) {
            Ok(payload) => {
                let count = payload["files"].as_array().map(|f| f.len()).unwrap_or(0);
                json_success(serde_json::json!({
                    "query": params.query,
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

        let params: DriveSearchParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<DriveSearchParams>(),
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
                let params: DriveSearchParams =
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
