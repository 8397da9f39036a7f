//! Workbook creation tool definition.

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
use crate::core::security::validate_parent_path;
use crate::domains::tools::common::{error_result, json_success};

use super::common::save_workbook;

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

/// Parameters for the workbook creation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetCreateParams {
    /// File name; ".xlsx" is appended when missing.
    pub file_name: String,

    /// Name of the initial worksheet.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

/// Workbook creation tool - writes a fresh xlsx file with one worksheet.
pub struct SheetCreateTool;

impl SheetCreateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_create";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create a new Excel (.xlsx) file with a single worksheet (default name Sheet1).";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_name))]
    pub fn execute(params: &SheetCreateParams, config: &Config) -> CallToolResult {
        info!("Workbook creation requested for {}", params.file_name);

        let file_name = if params.file_name.ends_with(".xlsx") {
            params.file_name.clone()
        } else {
            format!("{}.xlsx", params.file_name)
        };

        let path = match validate_parent_path(&file_name, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        let mut book = umya_spreadsheet::new_file();
        if params.sheet_name != default_sheet_name() {
            match book.get_sheet_mut(&0) {
                Some(sheet) => {
                    sheet.set_name(params.sheet_name.clone());
                }
                None => return error_result("New workbook has no worksheet"),
            }
        }

        if let Err(e) = save_workbook(&book, &path) {
            return error_result(&e);
        }

        json_success(serde_json::json!({
            "message": "Excel file created successfully",
            "file_name": path.to_string_lossy(),
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

        let params: SheetCreateParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetCreateParams>(),
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
                let params: SheetCreateParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}
