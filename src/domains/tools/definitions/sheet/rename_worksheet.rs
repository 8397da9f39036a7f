//! Worksheet rename tool definition.

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

/// Parameters for the worksheet rename tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetRenameWorksheetParams {
    /// Path of the xlsx file.
    pub file_path: String,

    /// Current worksheet name.
    pub current_name: String,

    /// New worksheet name.
    pub new_name: String,
}

/// Worksheet rename tool.
pub struct SheetRenameWorksheetTool;

impl SheetRenameWorksheetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_rename_worksheet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Rename a worksheet. Fails if the new name is already in use.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path))]
    pub fn execute(params: &SheetRenameWorksheetParams, config: &Config) -> CallToolResult {
        info!(
            "Rename worksheet '{}' -> '{}' in {}",
            params.current_name, params.new_name, params.file_path
        );

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

        if book.get_sheet_by_name(&params.new_name).is_some() {
            return error_result(&format!(
                "Worksheet name '{}' is already in use",
                params.new_name
            ));
        }

        match book.get_sheet_by_name_mut(&params.current_name) {
            Some(sheet) => {
                sheet.set_name(params.new_name.clone());
            }
            None => {
                return error_result(&format!(
                    "Worksheet '{}' does not exist",
                    params.current_name
                ));
            }
        }

        if let Err(e) = save_workbook(&book, &path) {
            return error_result(&e);
        }

        json_success(serde_json::json!({
            "message": "Worksheet renamed successfully",
            "file_path": params.file_path,
            "old_name": params.current_name,
            "new_name": params.new_name
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetRenameWorksheetParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetRenameWorksheetParams>(),
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
                let params: SheetRenameWorksheetParams =
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

    fn new_workbook(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("book.xlsx");
        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path
    }

    #[test]
    fn test_rename_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let path = new_workbook(&temp_dir);

        let params = SheetRenameWorksheetParams {
            file_path: path.to_string_lossy().to_string(),
            current_name: "Sheet1".to_string(),
            new_name: "Data".to_string(),
        };
        let result = SheetRenameWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        assert!(book.get_sheet_by_name("Data").is_some());
        assert!(book.get_sheet_by_name("Sheet1").is_none());
    }

    #[test]
    fn test_rename_to_taken_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let mut book = umya_spreadsheet::new_file();
        book.new_sheet("Data").unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetRenameWorksheetParams {
            file_path: path.to_string_lossy().to_string(),
            current_name: "Sheet1".to_string(),
            new_name: "Data".to_string(),
        };
        let result = SheetRenameWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_rename_unknown_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let path = new_workbook(&temp_dir);

        let params = SheetRenameWorksheetParams {
            file_path: path.to_string_lossy().to_string(),
            current_name: "Ghost".to_string(),
            new_name: "Data".to_string(),
        };
        let result = SheetRenameWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
