//! CSV export tool definition.

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
use crate::core::security::{validate_parent_path, validate_path};
use crate::domains::tools::common::{error_result, json_success};

use super::common::{open_workbook, to_coordinate};

fn default_delimiter() -> String {
    ",".to_string()
}

/// Parameters for the CSV export tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetExportCsvParams {
    /// Path of the xlsx file to export from.
    pub excel_path: String,

    /// Worksheet name to export.
    pub sheet_name: String,

    /// Output CSV file path.
    pub csv_path: String,

    /// CSV delimiter (default comma).
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// CSV export tool - dumps a worksheet as delimited text.
pub struct SheetExportCsvTool;

impl SheetExportCsvTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_export_csv";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Export an Excel worksheet to a CSV file.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(excel = %params.excel_path, csv = %params.csv_path))]
    pub fn execute(params: &SheetExportCsvParams, config: &Config) -> CallToolResult {
        info!("Export {} to {}", params.excel_path, params.csv_path);

        let excel_path = match validate_path(&params.excel_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Excel path validation failed: {}", e);
                return error_result(&format!("Excel path validation failed: {}", e));
            }
        };

        let csv_path = match validate_parent_path(&params.csv_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("CSV path validation failed: {}", e);
                return error_result(&format!("CSV path validation failed: {}", e));
            }
        };

        let book = match open_workbook(&excel_path) {
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

        let mut csv_lines = Vec::new();
        for row in 0..sheet.get_highest_row() {
            let values: Vec<String> = (0..sheet.get_highest_column())
                .map(|col| sheet.get_value(to_coordinate(row, col)))
                .collect();
            csv_lines.push(values.join(&params.delimiter));
        }

        if let Err(e) = fs::write(&csv_path, csv_lines.join("\n")) {
            return error_result(&format!("Failed to write CSV file: {}", e));
        }

        json_success(serde_json::json!({
            "message": "Worksheet exported successfully",
            "excel_path": params.excel_path,
            "csv_path": params.csv_path,
            "sheet_name": params.sheet_name,
            "row_count": csv_lines.len()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetExportCsvParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetExportCsvParams>(),
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
                let params: SheetExportCsvParams =
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
    fn test_csv_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let excel = temp_dir.path().join("book.xlsx");
        let csv = temp_dir.path().join("out.csv");

        let mut book = umya_spreadsheet::new_file();
        if let Some(sheet) = book.get_sheet_mut(&0) {
            sheet.get_cell_mut(to_coordinate(0, 0)).set_value("name");
            sheet.get_cell_mut(to_coordinate(0, 1)).set_value("score");
            sheet.get_cell_mut(to_coordinate(1, 0)).set_value("alice");
            sheet.get_cell_mut(to_coordinate(1, 1)).set_value("10");
        }
        umya_spreadsheet::writer::xlsx::write(&book, &excel).unwrap();

        let params = SheetExportCsvParams {
            excel_path: excel.to_string_lossy().to_string(),
            sheet_name: "Sheet1".to_string(),
            csv_path: csv.to_string_lossy().to_string(),
            delimiter: default_delimiter(),
        };
        let result = SheetExportCsvTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let content = fs::read_to_string(&csv).unwrap();
        assert_eq!(content, "name,score\nalice,10");
    }

    #[test]
    fn test_export_unknown_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let excel = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &excel).unwrap();

        let params = SheetExportCsvParams {
            excel_path: excel.to_string_lossy().to_string(),
            sheet_name: "Ghost".to_string(),
            csv_path: temp_dir.path().join("out.csv").to_string_lossy().to_string(),
            delimiter: default_delimiter(),
        };
        let result = SheetExportCsvTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
