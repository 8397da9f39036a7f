//! Row write tool definition.

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

use super::common::{open_workbook, save_workbook, to_coordinate};

/// Parameters for the row write tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetWriteRowParams {
    /// Path of the xlsx file.
    pub file_path: String,

    /// Worksheet name.
    pub sheet_name: String,

    /// Row index (0-based).
    pub row_index: u32,

    /// Comma-separated values, written left to right from column 0.
    pub data: String,
}

/// Row write tool.
pub struct SheetWriteRowTool;

impl SheetWriteRowTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_write_row";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Write comma-separated values into an entire row, starting at \
         column 0 of the given 0-based row index.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path, sheet = %params.sheet_name, row = params.row_index))]
    pub fn execute(params: &SheetWriteRowParams, config: &Config) -> CallToolResult {
        info!("Write row {} in {}", params.row_index, params.file_path);

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

        let values: Vec<&str> = params.data.split(',').map(str::trim).collect();

        match book.get_sheet_by_name_mut(&params.sheet_name) {
            Some(sheet) => {
                for (col_index, value) in values.iter().enumerate() {
                    sheet
                        .get_cell_mut(to_coordinate(params.row_index, col_index as u32))
                        .set_value(value.to_string());
                }
            }
            None => {
                return error_result(&format!(
                    "Worksheet '{}' does not exist",
                    params.sheet_name
                ));
            }
        }

        if let Err(e) = save_workbook(&book, &path) {
            return error_result(&e);
        }

        json_success(serde_json::json!({
            "message": "Row data written successfully",
            "file_path": params.file_path,
            "sheet_name": params.sheet_name,
            "row_index": params.row_index,
            "column_count": values.len()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetWriteRowParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetWriteRowParams>(),
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
                let params: SheetWriteRowParams =
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
    fn test_write_row_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetWriteRowParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Sheet1".to_string(),
            row_index: 0,
            data: "name, city , score".to_string(),
        };
        let result = SheetWriteRowTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let sheet = book.get_sheet_by_name("Sheet1").unwrap();
        assert_eq!(sheet.get_value(to_coordinate(0, 0)), "name");
        // Values are trimmed before writing
        assert_eq!(sheet.get_value(to_coordinate(0, 1)), "city");
        assert_eq!(sheet.get_value(to_coordinate(0, 2)), "score");
    }

    #[test]
    fn test_write_row_unknown_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetWriteRowParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Ghost".to_string(),
            row_index: 0,
            data: "a,b".to_string(),
        };
        let result = SheetWriteRowTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
