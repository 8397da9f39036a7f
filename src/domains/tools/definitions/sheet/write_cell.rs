//! Cell write tool definition.

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

/// Parameters for the cell write tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetWriteCellParams {
    /// Path of the xlsx file.
    pub file_path: String,

    /// Worksheet name.
    pub sheet_name: String,

    /// Row index (0-based).
    pub row_index: u32,

    /// Column index (0-based).
    pub col_index: u32,

    /// Value to write.
    pub data: String,
}

/// Cell write tool.
pub struct SheetWriteCellTool;

impl SheetWriteCellTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_write_cell";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Write data to a single cell, addressed by 0-based row and column indices.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path, sheet = %params.sheet_name))]
    pub fn execute(params: &SheetWriteCellParams, config: &Config) -> CallToolResult {
        info!(
            "Write cell ({},{}) in {}",
            params.row_index, params.col_index, params.file_path
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

        match book.get_sheet_by_name_mut(&params.sheet_name) {
            Some(sheet) => {
                sheet
                    .get_cell_mut(to_coordinate(params.row_index, params.col_index))
                    .set_value(params.data.clone());
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
            "message": "Cell data written successfully",
            "file_path": params.file_path,
            "sheet_name": params.sheet_name,
            "cell": format!("({},{})", params.row_index, params.col_index),
            "value": params.data
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetWriteCellParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetWriteCellParams>(),
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
                let params: SheetWriteCellParams =
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
    fn test_write_cell_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetWriteCellParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Sheet1".to_string(),
            row_index: 2,
            col_index: 3,
            data: "42.5".to_string(),
        };
        let result = SheetWriteCellTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let sheet = book.get_sheet_by_name("Sheet1").unwrap();
        // (row 2, col 3) is cell D3 in 1-based terms
        assert_eq!(sheet.get_value(to_coordinate(2, 3)), "42.5");
    }

    #[test]
    fn test_write_to_unknown_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetWriteCellParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Ghost".to_string(),
            row_index: 0,
            col_index: 0,
            data: "x".to_string(),
        };
        let result = SheetWriteCellTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
