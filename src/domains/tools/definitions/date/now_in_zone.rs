//! Current-time-in-zone tool definition.

use chrono::{Offset, Utc};
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::timerange::LOCAL_TIME_PATTERN;
use crate::domains::tools::common::{error_result, json_success};

use super::common::{parse_format, parse_zone};

fn default_format() -> String {
    LOCAL_TIME_PATTERN.to_string()
}

/// Parameters for the current-time-in-zone tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DateNowInZoneParams {
    /// IANA time zone id, e.g. Asia/Taipei, America/New_York, UTC.
    #[schemars(description = "Time zone id, e.g. Asia/Taipei, America/New_York, Europe/London, UTC")]
    pub time_zone: String,

    /// Output format, strftime syntax. Default %Y-%m-%d %H:%M:%S.
    #[serde(default = "default_format")]
    #[schemars(description = "Output format in strftime syntax (default: %Y-%m-%d %H:%M:%S)")]
    pub format: String,
}

/// Current-time-in-zone tool.
pub struct DateNowInZoneTool;

impl DateNowInZoneTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "date_now_in_zone";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the current date and time in a specified IANA time zone, with its UTC offset.";

    /// Execute the tool logic.
    pub fn execute(params: &DateNowInZoneParams) -> CallToolResult {
        info!("Current time requested for zone {}", params.time_zone);

        let zone = match parse_zone(&params.time_zone) {
            Ok(z) => z,
            Err(e) => return error_result(&e),
        };

        let items = match parse_format(&params.format) {
            Ok(items) => items,
            Err(e) => return error_result(&e),
        };

        let now = Utc::now().with_timezone(&zone);
        let rendered = now.format_with_items(items.iter()).to_string();
        let offset_hours = now.offset().fix().local_minus_utc() / 3600;

        json_success(serde_json::json!({
            "date_time": rendered,
            "time_zone": params.time_zone,
            "format": params.format,
            "offset_hours": offset_hours
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: DateNowInZoneParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DateNowInZoneParams>(),
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
                let params: DateNowInZoneParams =
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
    fn test_utc_has_zero_offset() {
        let params = DateNowInZoneParams {
            time_zone: "UTC".to_string(),
            format: default_format(),
        };
        let result = DateNowInZoneTool::execute(&params);
        let value = payload(&result);
        assert_eq!(value["offset_hours"], 0);
    }

    #[test]
    fn test_taipei_offset() {
        // Taiwan has no DST; the offset is +8 year-round.
        let params = DateNowInZoneParams {
            time_zone: "Asia/Taipei".to_string(),
            format: default_format(),
        };
        let result = DateNowInZoneTool::execute(&params);
        let value = payload(&result);
        assert_eq!(value["offset_hours"], 8);
    }

    #[test]
    fn test_unknown_zone_is_input_error() {
        let params = DateNowInZoneParams {
            time_zone: "Mars/Olympus".to_string(),
            format: default_format(),
        };
        let result = DateNowInZoneTool::execute(&params);
        assert!(result.is_error.unwrap_or(false));
    }
}
