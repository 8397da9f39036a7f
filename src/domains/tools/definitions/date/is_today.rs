//! Is-today check tool definition.

use chrono::{Local, NaiveDate};
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

const DATE_PATTERN: &str = "%Y-%m-%d";

/// Parameters for the is-today tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DateIsTodayParams {
    /// The date to check, format %Y-%m-%d.
    #[schemars(description = "Date string, format YYYY-MM-DD")]
    pub date: String,
}

/// Is-today tool - compares a date against the server's local date.
pub struct DateIsTodayTool;

impl DateIsTodayTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "date_is_today";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Check whether a given date (YYYY-MM-DD) is today.";

    /// Execute the tool logic.
    pub fn execute(params: &DateIsTodayParams) -> CallToolResult {
        info!("Is-today check requested for {}", params.date);

        let date = match NaiveDate::parse_from_str(&params.date, DATE_PATTERN) {
            Ok(d) => d,
            Err(_) => {
                return error_result(&format!(
                    "Unparseable date '{}' (expected YYYY-MM-DD)",
                    params.date
                ));
            }
        };

        let today = Local::now().date_naive();

        json_success(serde_json::json!({
            "date": params.date,
            "is_today": date == today,
            "today": today.format(DATE_PATTERN).to_string()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: DateIsTodayParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DateIsTodayParams>(),
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
                let params: DateIsTodayParams =
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
    fn test_today_is_today() {
        let today = Local::now().date_naive().format(DATE_PATTERN).to_string();
        let result = DateIsTodayTool::execute(&DateIsTodayParams { date: today });
        assert_eq!(payload(&result)["is_today"], true);
    }

    #[test]
    fn test_past_date_is_not_today() {
        let result = DateIsTodayTool::execute(&DateIsTodayParams {
            date: "1999-12-31".to_string(),
        });
        assert_eq!(payload(&result)["is_today"], false);
    }

    #[test]
    fn test_unparseable_date() {
        let result = DateIsTodayTool::execute(&DateIsTodayParams {
            date: "31/12/1999".to_string(),
        });
        assert!(result.is_error.unwrap_or(false));
    }
}
