//! Directory listing tool definition.

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

/// Parameters for the directory listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FsListDirParams {
    /// Directory path to list.
    pub path: String,

    /// List only files.
    #[serde(default)]
    pub files_only: bool,

    /// List only directories.
    #[serde(default)]
    pub directories_only: bool,
}

/// Directory listing tool.
pub struct FsListDirTool;

impl FsListDirTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fs_list_dir";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List directory contents with name, type, size, and \
         modification time. Optional files-only or directories-only filters.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(path = %params.path))]
    pub fn execute(params: &FsListDirParams, config: &Config) -> CallToolResult {
        info!("Directory listing requested for {}", params.path);

        let path = match validate_path(&params.path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        if !path.is_dir() {
            return error_result("Specified path is not a directory");
        }

        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(e) => return error_result(&format!("Failed to read directory: {}", e)),
        };

        let mut contents = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Error reading entry: {}", e);
                    continue;
                }
            };

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    warn!("Failed to get metadata for {:?}: {}", entry.file_name(), e);
                    continue;
                }
            };

            if params.files_only && !metadata.is_file() {
                continue;
            }
            if params.directories_only && !metadata.is_dir() {
                continue;
            }

            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs());

            contents.push(serde_json::json!({
                "name": entry.file_name().to_string_lossy(),
                "path": entry.path().to_string_lossy(),
                "is_file": metadata.is_file(),
                "is_directory": metadata.is_dir(),
                "size": if metadata.is_file() { Some(metadata.len()) } else { None },
                "last_modified": modified
            }));
        }

        contents.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));

        info!("Listed {} entries in {}", contents.len(), params.path);

        json_success(serde_json::json!({
            "path": params.path,
            "count": contents.len(),
            "contents": contents,
            "files_only": params.files_only,
            "directories_only": params.directories_only
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: FsListDirParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FsListDirParams>(),
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
                let params: FsListDirParams =
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

    fn populated_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("file1.txt"), "one").unwrap();
        fs::write(temp_dir.path().join("file2.txt"), "two").unwrap();
        fs::create_dir(temp_dir.path().join("subdir")).unwrap();
        temp_dir
    }

    #[test]
    fn test_list_all_entries() {
        let temp_dir = populated_dir();
        let params = FsListDirParams {
            path: temp_dir.path().to_string_lossy().to_string(),
            files_only: false,
            directories_only: false,
        };
        let result = FsListDirTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_files_only_filter() {
        let temp_dir = populated_dir();
        let params = FsListDirParams {
            path: temp_dir.path().to_string_lossy().to_string(),
            files_only: true,
            directories_only: false,
        };
        let result = FsListDirTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["count"], 2);
        for entry in value["contents"].as_array().unwrap() {
            assert_eq!(entry["is_file"], true);
        }
    }

    #[test]
    fn test_directories_only_filter() {
        let temp_dir = populated_dir();
        let params = FsListDirParams {
            path: temp_dir.path().to_string_lossy().to_string(),
            files_only: false,
            directories_only: true,
        };
        let result = FsListDirTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["count"], 1);
        assert_eq!(value["contents"][0]["name"], "subdir");
    }

    #[test]
    fn test_nonexistent_directory() {
        let params = FsListDirParams {
            path: "/nonexistent/path/12345".to_string(),
            files_only: false,
            directories_only: false,
        };
        let result = FsListDirTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
