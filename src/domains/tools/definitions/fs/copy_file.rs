//! File copy tool definition.

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
use crate::core::security::{validate_parent_path, validate_path};
use crate::domains::tools::common::{error_result, json_success};

/// Parameters for the copy tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsCopyParams {
    /// Source file path.
    pub source_path: String,

    /// Target file path.
    pub target_path: String,

    /// Overwrite the target if it already exists.
    #[serde(default)]
    pub replace: bool,
}

/// Copy tool - copies a file, optionally replacing the target.
pub struct FsCopyTool;

impl FsCopyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_copy";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Copy a file to a new location. Refuses to overwrite an \
         existing target unless replace=true.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(source = %params.source_path, target = %params.target_path))]
    pub fn execute(params: &FsCopyParams, config: &Config) -> CallToolResult {
        info!("Copy {} -> {}", params.source_path, params.target_path);

        let source = match validate_path(&params.source_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Source path validation failed: {}", e);
                return error_result(&format!("Source path validation failed: {}", e));
            }
        };

        if !source.is_file() {
            return error_result("Source path is not a file");
        }

        let target = match validate_parent_path(&params.target_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Target path validation failed: {}", e);
                return error_result(&format!("Target path validation failed: {}", e));
            }
        };

        if target.exists() && !params.replace {
            return error_result("Target file already exists and replace was not specified");
        }

        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return error_result(&format!("Failed to create target directory: {}", e));
            }
        }

        let size = match fs::copy(&source, &target) {
            Ok(bytes) => bytes,
            Err(e) => return error_result(&format!("Failed to copy: {}", e)),
        };

        json_success(serde_json::json!({
            "source_path": params.source_path,
            "target_path": params.target_path,
            "copied": true,
            "size": size,
            "replaced": params.replace
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: FsCopyParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsCopyParams>(),
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
                let params: FsCopyParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}
