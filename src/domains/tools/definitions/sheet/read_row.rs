//! Row read tool definition.

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

/// Parameters for the row read tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetReadRowParams {
    /// Path of the xlsx file.
    pub file_path: String,

    /// Worksheet name.
    pub sheet_name: String,

    /// Row index (0-based).
    pub row_index: u32,
}

/// Row read tool.
pub struct SheetReadRowTool;

impl SheetReadRowTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "sheet_read_row";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read every value in a row (0-based index). A row beyond the \
         used range reads as an empty list.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(file = %params.file_path, sheet = %params.sheet_name, row = params.row_index))]
    pub fn execute(params: &SheetReadRowParams, config: &Config) -> CallToolResult {
        info!("Read row {} in {}", params.row_index, params.file_path);

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

        let exists = params.row_index + 1 <= sheet.get_highest_row();
        let values: Vec<String> = if exists {
            (0..sheet.get_highest_column())
                .map(|col| sheet.get_value(to_coordinate(params.row_index, col)))
                .collect()
        } else {
            Vec::new()
        };

        let column_count = values.len();
        json_success(serde_json::json!({
            "values": values,
            "file_path": params.file_path,
            "sheet_name": params.sheet_name,
            "row_index": params.row_index,
            "column_count": column_count,
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

        let params: SheetReadRowParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params, &config)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SheetReadRowParams>(),
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
                let params: SheetReadRowParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}
