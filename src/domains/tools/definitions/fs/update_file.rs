//! File update tool definition.

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

/// Parameters for the file update tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsUpdateFileParams {
    /// Path of the file to overwrite.
    pub path: String,

    /// New content (UTF-8).
    pub content: String,
}

/// File update tool - replaces the content of an existing file.
pub struct FsUpdateFileTool;

impl FsUpdateFileTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_update_file";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Replace the content of an existing file. Fails if the file does not exist.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.path))]
    pub fn execute(params: &FsUpdateFileParams, config: &Config) -> CallToolResult {
        info!("Update file requested for {}", params.path);

        let path = match validate_path(&params.path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        if !path.is_file() {
            return error_result("Specified path is not a file");
        }

        let old_size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        if let Err(e) = fs::write(&path, params.content.as_bytes()) {
            return error_result(&format!("Failed to write file: {}", e));
        }

        json_success(serde_json::json!({
            "path": params.path,
            "updated": true,
            "old_size": old_size,
            "new_size": params.content.len()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: FsUpdateFileParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsUpdateFileParams>(),
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
                let params: FsUpdateFileParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use tempfile::TempDir;

    fn payload(result: &CallToolResult) -> serde_json::Value {
        match &result.content[0].raw {
            RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_update_reports_sizes() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.txt");
        fs::write(&file, "old content!").unwrap();

        let params = FsUpdateFileParams {
            path: file.to_string_lossy().to_string(),
            content: "new".to_string(),
        };
        let result = FsUpdateFileTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["old_size"], 12);
        assert_eq!(value["new_size"], 3);
        assert_eq!(fs::read_to_string(&file).unwrap(), "new");
    }

    #[test]
    fn test_update_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let params = FsUpdateFileParams {
            path: temp_dir
                .path()
                .join("ghost.txt")
                .to_string_lossy()
                .to_string(),
            content: "x".to_string(),
        };
        let result = FsUpdateFileTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
