//! Cross-zone datetime conversion tool definition.

use chrono::{LocalResult, NaiveDateTime, Offset, TimeZone};
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

/// Parameters for the zone conversion tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DateConvertZoneParams {
    /// The datetime to convert.
    #[schemars(description = "Date time string to convert")]
    pub date_time: String,

    /// Format of the input (and output), strftime syntax.
    #[serde(default = "default_format")]
    #[schemars(description = "Datetime format in strftime syntax (default: %Y-%m-%d %H:%M:%S)")]
    pub format: String,

    /// Zone the input is expressed in, e.g. Asia/Taipei.
    #[schemars(description = "Source time zone id, e.g. Asia/Taipei")]
    pub source_time_zone: String,

    /// Zone to convert into, e.g. America/New_York.
    #[schemars(description = "Target time zone id, e.g. America/New_York")]
    pub target_time_zone: String,
}

/// Zone conversion tool - re-expresses a wall-clock time in another zone.
pub struct DateConvertZoneTool;

impl DateConvertZoneTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "date_convert_zone";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Convert a date time from one IANA time zone to another, reporting both UTC offsets.";

    /// Execute the tool logic.
    pub fn execute(params: &DateConvertZoneParams) -> CallToolResult {
        info!(
            "Zone conversion requested: {} -> {}",
            params.source_time_zone, params.target_time_zone
        );

        let source = match parse_zone(&params.source_time_zone) {
            Ok(z) => z,
            Err(e) => return error_result(&e),
        };
        let target = match parse_zone(&params.target_time_zone) {
            Ok(z) => z,
            Err(e) => return error_result(&e),
        };

        let items = match parse_format(&params.format) {
            Ok(items) => items,
            Err(e) => return error_result(&e),
        };

        let naive = match NaiveDateTime::parse_from_str(&params.date_time, &params.format) {
            Ok(n) => n,
            Err(_) => {
                return error_result(&format!(
                    "Unparseable date time '{}' for format '{}'",
                    params.date_time, params.format
                ));
            }
        };

        // DST transitions: an ambiguous local time picks the earlier
        // instant, a nonexistent one is an input error.
        let source_dt = match source.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                return error_result(&format!(
                    "'{}' does not exist in time zone {} (DST gap)",
                    params.date_time, params.source_time_zone
                ));
            }
        };

        let target_dt = source_dt.with_timezone(&target);

        json_success(serde_json::json!({
            "original_date_time": params.date_time,
            "original_time_zone": params.source_time_zone,
            "converted_date_time": target_dt.format_with_items(items.iter()).to_string(),
            "target_time_zone": params.target_time_zone,
            "source_offset": source_dt.offset().fix().to_string(),
            "target_offset": target_dt.offset().fix().to_string()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: DateConvertZoneParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DateConvertZoneParams>(),
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
                let params: DateConvertZoneParams =
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

    fn params(date_time: &str, source: &str, target: &str) -> DateConvertZoneParams {
        DateConvertZoneParams {
            date_time: date_time.to_string(),
            format: default_format(),
            source_time_zone: source.to_string(),
            target_time_zone: target.to_string(),
        }
    }

    #[test]
    fn test_taipei_to_utc() {
        let result = DateConvertZoneTool::execute(&params(
            "2025-04-10 12:00:00",
            "Asia/Taipei",
            "UTC",
        ));
        let value = payload(&result);
        assert_eq!(value["converted_date_time"], "2025-04-10 04:00:00");
        assert_eq!(value["source_offset"], "+08:00");
        assert_eq!(value["target_offset"], "+00:00");
    }

    #[test]
    fn test_round_trip() {
        let there = DateConvertZoneTool::execute(&params(
            "2025-06-01 09:30:00",
            "Asia/Taipei",
            "Europe/London",
        ));
        let converted = payload(&there)["converted_date_time"]
            .as_str()
            .unwrap()
            .to_string();

        let back =
            DateConvertZoneTool::execute(&params(&converted, "Europe/London", "Asia/Taipei"));
        assert_eq!(payload(&back)["converted_date_time"], "2025-06-01 09:30:00");
    }

    #[test]
    fn test_unparseable_datetime() {
        let result =
            DateConvertZoneTool::execute(&params("next tuesday", "Asia/Taipei", "UTC"));
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_unknown_source_zone() {
        let result = DateConvertZoneTool::execute(&params(
            "2025-04-10 12:00:00",
            "Nowhere/Here",
            "UTC",
        ));
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_dst_gap_is_input_error() {
        // 2025-03-09 02:30 never happened in New York (spring forward).
        let result = DateConvertZoneTool::execute(&params(
            "2025-03-09 02:30:00",
            "America/New_York",
            "UTC",
        ));
        assert!(result.is_error.unwrap_or(false));
    }
}
