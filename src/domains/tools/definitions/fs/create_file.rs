//! File creation tool definition.

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

/// Parameters for the file creation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsCreateFileParams {
    /// Path of the file to create.
    pub path: String,

    /// Content to write (UTF-8).
    pub content: String,
}

/// File creation tool - writes a new file, creating parent directories.
pub struct FsCreateFileTool;

impl FsCreateFileTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_create_file";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new file with the given content. Fails if the file \
         already exists; missing parent directories are created.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.path))]
    pub fn execute(params: &FsCreateFileParams, config: &Config) -> CallToolResult {
        info!("Create file requested for {}", params.path);

        let path = match validate_parent_path(&params.path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        if path.exists() {
            return error_result("File already exists");
        }

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return error_result(&format!("Failed to create parent directories: {}", e));
            }
        }

        if let Err(e) = fs::write(&path, params.content.as_bytes()) {
            return error_result(&format!("Failed to write file: {}", e));
        }

        json_success(serde_json::json!({
            "path": params.path,
            "created": true,
            "size": params.content.len()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: FsCreateFileParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsCreateFileParams>(),
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
                let params: FsCreateFileParams =
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
    use tempfile::TempDir;

    #[test]
    fn test_create_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("notes.txt");

        let params = FsCreateFileParams {
            path: target.to_string_lossy().to_string(),
            content: "hello".to_string(),
        };
        let result = FsCreateFileTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn test_creates_missing_parents() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("deep/nested/notes.txt");

        let params = FsCreateFileParams {
            path: target.to_string_lossy().to_string(),
            content: "nested".to_string(),
        };
        let result = FsCreateFileTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
        assert!(target.exists());
    }

    #[test]
    fn test_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("taken.txt");
        fs::write(&target, "original").unwrap();

        let params = FsCreateFileParams {
            path: target.to_string_lossy().to_string(),
            content: "clobber".to_string(),
        };
        let result = FsCreateFileTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }
}
