//! Cell merge tool definition.

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

use super::common::{cell_reference, open_workbook, save_workbook};

/// Parameters for the cell merge tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetMergeCellsParams {
    /// Path of the xlsx file.
    pub file_path: String,

    /// Worksheet name.
    pub sheet_name: String,

    /// First row index (0-based).
    pub first_row: u32,

    /// Last row index (0-based, inclusive).
    pub last_row: u32,

    /// First column index (0-based).
    pub first_col: u32,

    /// Last column index (0-based, inclusive).
    pub last_col: u32,
}

/// Cell merge tool.
pub struct SheetMergeCellsTool;

impl SheetMergeCellsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_merge_cells";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Merge a rectangular range of cells, addressed by 0-based inclusive indices.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path, sheet = %params.sheet_name))]
    pub fn execute(params: &SheetMergeCellsParams, config: &Config) -> CallToolResult {
        info!(
            "Merge cells ({},{}):({},{}) in {}",
            params.first_row, params.first_col, params.last_row, params.last_col, params.file_path
        );

        if params.last_row < params.first_row || params.last_col < params.first_col {
            return error_result("Merge range is inverted: last index precedes first index");
        }

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

        let range = format!(
            "{}:{}",
            cell_reference(params.first_row, params.first_col),
            cell_reference(params.last_row, params.last_col)
        );

        match book.get_sheet_by_name_mut(&params.sheet_name) {
            Some(sheet) => {
                sheet.add_merge_cells(range.clone());
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
            "message": "Cells merged successfully",
            "file_path": params.file_path,
            "sheet_name": params.sheet_name,
            "range": range
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetMergeCellsParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetMergeCellsParams>(),
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
                let params: SheetMergeCellsParams =
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
    fn test_merge_reports_a1_range() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetMergeCellsParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Sheet1".to_string(),
            first_row: 0,
            last_row: 2,
            first_col: 0,
            last_col: 1,
        };
        let result = SheetMergeCellsTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["range"], "A1:B3");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetMergeCellsParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Sheet1".to_string(),
            first_row: 5,
            last_row: 2,
            first_col: 0,
            last_col: 1,
        };
        let result = SheetMergeCellsTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
