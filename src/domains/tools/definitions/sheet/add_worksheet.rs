//! Worksheet addition tool definition.

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
use crate::core::security::validate_path;
use crate::domains::tools::common::{error_result, json_success};

use super::common::{open_workbook, save_workbook};

/// Parameters for the worksheet addition tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetAddWorksheetParams {
    /// Path of the xlsx file.
    pub file_path: String,

    /// Name of the worksheet to add.
    pub sheet_name: String,
}

/// Worksheet addition tool.
pub struct SheetAddWorksheetTool;

impl SheetAddWorksheetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_add_worksheet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Add a new worksheet to an existing Excel file. Fails if the name is already in use.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path, sheet = %params.sheet_name))]
    pub fn execute(params: &SheetAddWorksheetParams, config: &Config) -> CallToolResult {
        info!("Add worksheet '{}' to {}", params.sheet_name, params.file_path);

        let path = match validate_path(&params.file_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        let mut book = match open_workbook(&path) {
            Ok(b) => b,
            Err(e) => return error_result(&e),
        };

        if book.get_sheet_by_name(&params.sheet_name).is_some() {
            return error_result(&format!(
                "Worksheet '{}' already exists",
                params.sheet_name
            ));
        }

        if let Err(e) = book.new_sheet(params.sheet_name.as_str()) {
            return error_result(&format!("Failed to add worksheet: {}", e));
        }

        if let Err(e) = save_workbook(&book, &path) {
            return error_result(&e);
        }

        json_success(serde_json::json!({
            "message": "Worksheet added successfully",
            "file_path": params.file_path,
            "sheet_name": params.sheet_name
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetAddWorksheetParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetAddWorksheetParams>(),
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
                let params: SheetAddWorksheetParams =
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

    fn new_workbook(dir: &TempDir) -> String {
        let path = dir.path().join("book.xlsx");
        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_add_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = new_workbook(&temp_dir);

        let params = SheetAddWorksheetParams {
            file_path: file_path.clone(),
            sheet_name: "Extra".to_string(),
        };
        let result = SheetAddWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let book = umya_spreadsheet::reader::xlsx::read(std::path::Path::new(&file_path)).unwrap();
        assert!(book.get_sheet_by_name("Extra").is_some());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = new_workbook(&temp_dir);

        let params = SheetAddWorksheetParams {
            file_path,
            sheet_name: "Sheet1".to_string(),
        };
        let result = SheetAddWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_missing_file_rejected() {
        let params = SheetAddWorksheetParams {
            file_path: "/nonexistent/book.xlsx".to_string(),
            sheet_name: "Extra".to_string(),
        };
        let result = SheetAddWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
