//! Today's-date tool definition.

use chrono::Local;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::tools::common::{error_result, json_success};

use super::common::parse_format;

fn default_format() -> String {
    "%Y-%m-%d".to_string()
}

/// Parameters for the today's-date tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DateTodayParams {
    /// Output format, strftime syntax. Default %Y-%m-%d.
    #[serde(default = "default_format")]
    #[schemars(description = "Output format in strftime syntax (default: %Y-%m-%d)")]
    pub format: String,
}

/// Today's-date tool - the server's local date in a caller-chosen format.
pub struct DateTodayTool;

impl DateTodayTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "date_today";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get today's date. Accepts an optional strftime format (default %Y-%m-%d).";

    /// Execute the tool logic.
    pub fn execute(params: &DateTodayParams) -> CallToolResult {
        info!("Today's date requested with format {}", params.format);

        let items = match parse_format(&params.format) {
            Ok(items) => items,
            Err(e) => return error_result(&e),
        };

        let today = Local::now()
            .naive_local()
            .format_with_items(items.iter())
            .to_string();

        json_success(serde_json::json!({
            "today_date": today,
            "format": params.format
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: DateTodayParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DateTodayParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: DateTodayParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn payload(result: &CallToolResult) -> serde_json::Value {
        match &result.content[0].raw {
            RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_default_format() {
        let params: DateTodayParams = serde_json::from_str("{}").unwrap();
        let result = DateTodayTool::execute(&params);
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let value = payload(&result);
        let expected = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(value["today_date"], expected.as_str());
    }

    #[test]
    fn test_invalid_format_is_input_error() {
        let params = DateTodayParams {
            format: "%Q%Q".to_string(),
        };
        let result = DateTodayTool::execute(&params);
        assert!(result.is_error.unwrap_or(false));
    }
}
