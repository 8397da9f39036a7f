//! File existence check tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::config::Config;
use crate::core::security::validate_parent_path;
use crate::domains::tools::common::{error_result, json_success};

/// Parameters for the existence check tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsExistsParams {
    /// File or directory path to check.
    pub path: String,
}

/// Existence check tool - reports whether a path exists and what it is.
pub struct FsExistsTool;

impl FsExistsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_exists";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Check if a file or directory exists. Reports whether it is a file or a directory.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.path))]
    pub fn execute(params: &FsExistsParams, config: &Config) -> CallToolResult {
        info!("Existence check for {}", params.path);

        // The target may legitimately not exist, so validate its location
        // rather than the path itself.
        let path = match validate_parent_path(&params.path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        let exists = path.exists();

        json_success(serde_json::json!({
            "path": params.path,
            "exists": exists,
            "is_file": exists && path.is_file(),
            "is_directory": exists && path.is_dir()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: FsExistsParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsExistsParams>(),
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
                let params: FsExistsParams =
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
    use std::fs;
    use tempfile::TempDir;

    fn payload(result: &CallToolResult) -> serde_json::Value {
        match &result.content[0].raw {
            RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("present.txt");
        fs::write(&file, "hi").unwrap();

        let params = FsExistsParams {
            path: file.to_string_lossy().to_string(),
        };
        let result = FsExistsTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["exists"], true);
        assert_eq!(value["is_file"], true);
        assert_eq!(value["is_directory"], false);
    }

    #[test]
    fn test_missing_path_reports_absent() {
        let temp_dir = TempDir::new().unwrap();
        let params = FsExistsParams {
            path: temp_dir
                .path()
                .join("nope.txt")
                .to_string_lossy()
                .to_string(),
        };
        let result = FsExistsTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["exists"], false);
    }

    #[test]
    fn test_outside_root_rejected() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();

        let mut config = Config::default();
        config.security.allowed_roots = vec![root.path().to_path_buf()];

        let params = FsExistsParams {
            path: outside
                .path()
                .join("secret.txt")
                .to_string_lossy()
                .to_string(),
        };
        let result = FsExistsTool::execute(&params, &config);
        assert!(result.is_error.unwrap_or(false));
    }
}
