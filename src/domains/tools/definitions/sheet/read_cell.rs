//! Cell read tool definition.

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

use super::common::{open_workbook, to_coordinate};

/// Parameters for the cell read tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetReadCellParams {
    /// Path of the xlsx file.
    pub file_path: String,

    /// Worksheet name.
    pub sheet_name: String,

    /// Row index (0-based).
    pub row_index: u32,

    /// Column index (0-based).
    pub col_index: u32,
}

/// Cell read tool.
pub struct SheetReadCellTool;

impl SheetReadCellTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_read_cell";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read data from a single cell, addressed by 0-based row and \
         column indices. An absent cell reads as an empty value.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path, sheet = %params.sheet_name))]
    pub fn execute(params: &SheetReadCellParams, config: &Config) -> CallToolResult {
        info!(
            "Read cell ({},{}) in {}",
            params.row_index, params.col_index, params.file_path
        );

        let path = match validate_path(&params.file_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        let book = match open_workbook(&path) {
            Ok(b) => b,
            Err(e) => return error_result(&e),
        };

        let sheet = match book.get_sheet_by_name(&params.sheet_name) {
            Some(s) => s,
            None => {
                return error_result(&format!(
                    "Worksheet '{}' does not exist",
                    params.sheet_name
                ));
            }
        };

        let coordinate = to_coordinate(params.row_index, params.col_index);
        let exists = sheet.get_cell(coordinate).is_some();
        let value = if exists {
            sheet.get_value(coordinate)
        } else {
            String::new()
        };

        json_success(serde_json::json!({
            "value": value,
            "file_path": params.file_path,
            "sheet_name": params.sheet_name,
            "cell": format!("({},{})", params.row_index, params.col_index),
            "exists": exists
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetReadCellParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetReadCellParams>(),
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
                let params: SheetReadCellParams =
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
    fn test_read_written_cell() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let mut book = umya_spreadsheet::new_file();
        if let Some(sheet) = book.get_sheet_mut(&0) {
            sheet.get_cell_mut(to_coordinate(1, 1)).set_value("value");
        }
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetReadCellParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Sheet1".to_string(),
            row_index: 1,
            col_index: 1,
        };
        let result = SheetReadCellTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["value"], "value");
        assert_eq!(value["exists"], true);
    }

    #[test]
    fn test_absent_cell_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetReadCellParams {
            file_path: path.to_string_lossy().to_string(),
            sheet_name: "Sheet1".to_string(),
            row_index: 10,
            col_index: 10,
        };
        let result = SheetReadCellTool::execute(&params, &Config::default());
        let value = payload(&result);
        assert_eq!(value["value"], "");
        assert_eq!(value["exists"], false);
    }
}
