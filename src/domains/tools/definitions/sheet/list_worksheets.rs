//! Worksheet listing tool definition.

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

use super::common::open_workbook;

/// Parameters for the worksheet listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetListWorksheetsParams {
    /// Path of the xlsx file.
    pub file_path: String,
}

/// Worksheet listing tool.
pub struct SheetListWorksheetsTool;

impl SheetListWorksheetsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_list_worksheets";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all worksheets in an Excel file.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path))]
    pub fn execute(params: &SheetListWorksheetsParams, config: &Config) -> CallToolResult {
        info!("List worksheets in {}", params.file_path);

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

        let worksheets: Vec<String> = book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect();

        let count = worksheets.len();
        json_success(serde_json::json!({
            "worksheets": worksheets,
            "count": count,
            "file_path": params.file_path
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: SheetListWorksheetsParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetListWorksheetsParams>(),
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
                let params: SheetListWorksheetsParams =
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

    #[test]
    fn test_list_worksheets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let mut book = umya_spreadsheet::new_file();
        book.new_sheet("Data").unwrap();
        book.new_sheet("Summary").unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let params = SheetListWorksheetsParams {
            file_path: path.to_string_lossy().to_string(),
        };
        let result = SheetListWorksheetsTool::execute(&params, &Config::default());
        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        let value: serde_json::Value = serde_json::from_str(text).unwrap();

        assert_eq!(value["count"], 3);
        assert_eq!(
            value["worksheets"],
            serde_json::json!(["Sheet1", "Data", "Summary"])
        );
    }

    #[test]
    fn test_missing_file() {
        let params = SheetListWorksheetsParams {
            file_path: "/nonexistent/book.xlsx".to_string(),
        };
        let result = SheetListWorksheetsTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
