//! Directory creation tool definition.

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

fn default_create_parents() -> bool {
    true
}

/// Parameters for the directory creation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsMkdirParams {
    /// Directory path to create.
    pub path: String,

    /// Create missing parent directories as well.
    #[serde(default = "default_create_parents")]
    pub create_parents: bool,
}

/// Directory creation tool.
pub struct FsMkdirTool;

impl FsMkdirTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_mkdir";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new directory. Parent directories are created by \
         default; an already existing directory is reported, not an error.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.path))]
    pub fn execute(params: &FsMkdirParams, config: &Config) -> CallToolResult {
        info!("Create directory requested for {}", params.path);

        let path = match validate_parent_path(&params.path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        if path.exists() {
            if path.is_dir() {
                return json_success(serde_json::json!({
                    "path": params.path,
                    "created": false,
                    "already_exists": true
                }));
            }
            return error_result("Specified path exists but is not a directory");
        }

        let outcome = if params.create_parents {
            fs::create_dir_all(&path)
        } else {
            fs::create_dir(&path)
        };

        if let Err(e) = outcome {
            return error_result(&format!("Unable to create directory: {}", e));
        }

        json_success(serde_json::json!({
            "path": params.path,
            "created": true,
            "with_parents": params.create_parents
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: FsMkdirParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsMkdirParams>(),
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
                let params: FsMkdirParams =
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
    fn test_create_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a/b/c");

        let params = FsMkdirParams {
            path: target.to_string_lossy().to_string(),
            create_parents: true,
        };
        let result = FsMkdirTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
        assert!(target.is_dir());
    }

    #[test]
    fn test_without_parents_fails_on_missing_ancestors() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("x/y/z");

        let params = FsMkdirParams {
            path: target.to_string_lossy().to_string(),
            create_parents: false,
        };
        let result = FsMkdirTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_existing_directory_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let params = FsMkdirParams {
            path: temp_dir.path().to_string_lossy().to_string(),
            create_parents: true,
        };
        let result = FsMkdirTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["created"], false);
        assert_eq!(value["already_exists"], true);
    }
}
