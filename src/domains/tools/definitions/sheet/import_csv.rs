//! CSV import tool definition.

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
use crate::core::security::validate_path;
use crate::domains::tools::common::{error_result, json_success};

use super::common::{open_workbook, save_workbook, to_coordinate};

fn default_delimiter() -> String {
    ",".to_string()
}

/// Parameters for the CSV import tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetImportCsvParams {
    /// Path of the xlsx file to import into.
    pub excel_path: String,

    /// Path of the CSV file to read.
    pub csv_path: String,

    /// Target worksheet name; created when missing.
    pub sheet_name: String,

    /// CSV delimiter (default comma).
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// CSV import tool - loads CSV rows into a worksheet.
pub struct SheetImportCsvTool;

impl SheetImportCsvTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_import_csv";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Import CSV file data into an Excel worksheet, creating the \
         worksheet if it does not exist.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(excel = %params.excel_path, csv = %params.csv_path))]
    pub fn execute(params: &SheetImportCsvParams, config: &Config) -> CallToolResult {
        info!("Import {} into {}", params.csv_path, params.excel_path);

        let excel_path = match validate_path(&params.excel_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Excel path validation failed: {}", e);
                return error_result(&format!("Excel path validation failed: {}", e));
            }
        };

        let csv_path = match validate_path(&params.csv_path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("CSV path validation failed: {}", e);
                return error_result(&format!("CSV path validation failed: {}", e));
            }
        };

        let csv_content = match fs::read_to_string(&csv_path) {
            Ok(c) => c,
            Err(e) => return error_result(&format!("Failed to read CSV file: {}", e)),
        };

        let lines: Vec<&str> = csv_content.lines().collect();
        if lines.is_empty() {
            return error_result("CSV file is empty");
        }

        let mut book = match open_workbook(&excel_path) {
            Ok(b) => b,
            Err(e) => return error_result(&e),
        };

        if book.get_sheet_by_name(&params.sheet_name).is_none() {
            if let Err(e) = book.new_sheet(params.sheet_name.as_str()) {
                return error_result(&format!("Failed to create worksheet: {}", e));
            }
        }

        match book.get_sheet_by_name_mut(&params.sheet_name) {
            Some(sheet) => {
                for (row_index, line) in lines.iter().enumerate() {
                    for (col_index, value) in line.split(params.delimiter.as_str()).enumerate() {
                        sheet
                            .get_cell_mut(to_coordinate(row_index as u32, col_index as u32))
                            .set_value(value.trim().to_string());
                    }
                }
            }
            None => return error_result("Worksheet disappeared after creation"),
        }

        if let Err(e) = save_workbook(&book, &excel_path) {
            return error_result(&e);
        }

        json_success(serde_json::json!({
            "message": "CSV data imported successfully",
            "excel_path": params.excel_path,
            "csv_path": params.csv_path,
            "sheet_name": params.sheet_name,
            "row_count": lines.len()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetImportCsvParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetImportCsvParams>(),
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
                let params: SheetImportCsvParams =
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
    fn test_import_into_new_sheet() {
        let temp_dir = TempDir::new().unwrap();
        let excel = temp_dir.path().join("book.xlsx");
        let csv = temp_dir.path().join("data.csv");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &excel).unwrap();
        fs::write(&csv, "name,score\nalice,10\nbob,7\n").unwrap();

        let params = SheetImportCsvParams {
            excel_path: excel.to_string_lossy().to_string(),
            csv_path: csv.to_string_lossy().to_string(),
            sheet_name: "Imported".to_string(),
            delimiter: default_delimiter(),
        };
        let result = SheetImportCsvTool::execute(&params, &Config::default());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let book = umya_spreadsheet::reader::xlsx::read(&excel).unwrap();
        let sheet = book.get_sheet_by_name("Imported").unwrap();
        assert_eq!(sheet.get_value(to_coordinate(0, 0)), "name");
        assert_eq!(sheet.get_value(to_coordinate(2, 1)), "7");
    }

    #[test]
    fn test_empty_csv_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let excel = temp_dir.path().join("book.xlsx");
        let csv = temp_dir.path().join("empty.csv");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &excel).unwrap();
        fs::write(&csv, "").unwrap();

        let params = SheetImportCsvParams {
            excel_path: excel.to_string_lossy().to_string(),
            csv_path: csv.to_string_lossy().to_string(),
            sheet_name: "Imported".to_string(),
            delimiter: default_delimiter(),
        };
        let result = SheetImportCsvTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_missing_csv_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let excel = temp_dir.path().join("book.xlsx");

        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &excel).unwrap();

        let params = SheetImportCsvParams {
            excel_path: excel.to_string_lossy().to_string(),
            csv_path: temp_dir
                .path()
                .join("ghost.csv")
                .to_string_lossy()
                .to_string(),
            sheet_name: "Imported".to_string(),
            delimiter: default_delimiter(),
        };
        let result = SheetImportCsvTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
