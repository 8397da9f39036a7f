//! File info tool definition.

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
use std::time::UNIX_EPOCH;
use tracing::{info, instrument, warn};

use crate::core::config::Config;
use crate::core::security::validate_path;
use crate::domains::tools::common::{error_result, json_success};

/// Parameters for the file info tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsInfoParams {
    /// File or directory path to inspect.
    pub path: String,
}

/// File info tool - detailed metadata for one path.
pub struct FsInfoTool;

impl FsInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get detailed information about a file or directory (type, size, times, permissions).";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.path))]
    pub fn execute(params: &FsInfoParams, config: &Config) -> CallToolResult {
        info!("File info requested for {}", params.path);

        let path = match validate_path(&params.path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => return error_result(&format!("Failed to read metadata: {}", e)),
        };

        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        json_success(serde_json::json!({
            "path": path.to_string_lossy(),
            "name": name,
            "is_file": metadata.is_file(),
            "is_directory": metadata.is_dir(),
            "is_hidden": name.starts_with('.'),
            "size": if metadata.is_file() { Some(metadata.len()) } else { None },
            "last_modified": modified,
            "readonly": metadata.permissions().readonly(),
            "parent": path.parent().map(|p| p.to_string_lossy().to_string())
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: FsInfoParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsInfoParams>(),
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
                let params: FsInfoParams =
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
    fn test_file_info_fields() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("data.txt");
        fs::write(&file, "12345").unwrap();

        let params = FsInfoParams {
            path: file.to_string_lossy().to_string(),
        };
        let result = FsInfoTool::execute(&params, &Config::default());
        let value = payload(&result);

        assert_eq!(value["name"], "data.txt");
        assert_eq!(value["is_file"], true);
        assert_eq!(value["size"], 5);
        assert!(value["last_modified"].as_u64().is_some());
    }

    #[test]
    fn test_directory_info_has_no_size() {
        let temp_dir = TempDir::new().unwrap();
        let params = FsInfoParams {
            path: temp_dir.path().to_string_lossy().to_string(),
        };
        let result = FsInfoTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["is_directory"], true);
        assert!(value["size"].is_null());
    }

    #[test]
    fn test_missing_path() {
        let params = FsInfoParams {
            path: "/nonexistent/path/12345".to_string(),
        };
        let result = FsInfoTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
