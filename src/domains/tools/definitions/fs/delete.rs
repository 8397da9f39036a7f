//! File/directory deletion tool definition.

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

/// Parameters for the deletion tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsDeleteParams {
    /// File or directory path to delete.
    pub path: String,

    /// Delete directories recursively. Non-empty directories fail without it.
    #[serde(default)]
    pub recursive: bool,
}

/// Deletion tool - removes a file or directory.
pub struct FsDeleteTool;

impl FsDeleteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_delete";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete a file or directory. Directories with content require \
         recursive=true.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.path, recursive = params.recursive))]
    pub fn execute(params: &FsDeleteParams, config: &Config) -> CallToolResult {
        info!("Delete requested for {}", params.path);

        let path = match validate_path(&params.path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        let was_file = path.is_file();

        let outcome = if was_file {
            fs::remove_file(&path)
        } else if params.recursive {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_dir(&path)
        };

        if let Err(e) = outcome {
            return error_result(&format!("Failed to delete: {}", e));
        }

        json_success(serde_json::json!({
            "path": params.path,
            "deleted": true,
            "was_file": was_file,
            "was_directory": !was_file
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: FsDeleteParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsDeleteParams>(),
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
                let params: FsDeleteParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}
