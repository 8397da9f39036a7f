//! Worksheet deletion tool definition.

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

/// Parameters for the worksheet deletion tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetDeleteWorksheetParams {
    /// Path of the xlsx file.
    pub file_path: String,

    /// Name of the worksheet to delete.
    pub sheet_name: String,
}

/// Worksheet deletion tool.
pub struct SheetDeleteWorksheetTool;

impl SheetDeleteWorksheetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_delete_worksheet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete a worksheet from an Excel file. The last remaining \
         worksheet cannot be deleted.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path, sheet = %params.sheet_name))]
    pub fn execute(params: &SheetDeleteWorksheetParams, config: &Config) -> CallToolResult {
        info!(
            "Delete worksheet '{}' from {}",
            params.sheet_name, params.file_path
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

        if book.get_sheet_by_name(&params.sheet_name).is_none() {
            return error_result(&format!(
                "Worksheet '{}' does not exist",
                params.sheet_name
            ));
        }

        if book.get_sheet_collection().len() <= 1 {
            return error_result(
                "Cannot delete the only worksheet; an Excel file must have at least one",
            );
        }

        if let Err(e) = book.remove_sheet_by_name(&params.sheet_name) {
            return error_result(&format!("Failed to delete worksheet: {}", e));
        }

        if let Err(e) = save_workbook(&book, &path) {
            return error_result(&e);
        }

        json_success(serde_json::json!({
            "message": "Worksheet deleted successfully",
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

        let params: SheetDeleteWorksheetParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetDeleteWorksheetParams>(),
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
                let params: SheetDeleteWorksheetParams =
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
    fn test_delete_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let mut book = umya_spreadsheet::new_file();
        book.new_sheet("Scratch").unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetDeleteWorksheetParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Scratch".to_string(),
        };
        let result = SheetDeleteWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        assert!(book.get_sheet_by_name("Scratch").is_none());
    }

    #[test]
    fn test_last_worksheet_protected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetDeleteWorksheetParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Sheet1".to_string(),
        };
        let result = SheetDeleteWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_unknown_worksheet() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetDeleteWorksheetParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Ghost".to_string(),
        };
        let result = SheetDeleteWorksheetTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
