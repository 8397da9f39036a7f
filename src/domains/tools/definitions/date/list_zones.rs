//! Available-time-zones tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::tools::common::json_success;

/// Parameters for the zone listing tool (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DateListZonesParams {}

/// Zone listing tool - every IANA time zone id known to the server.
pub struct DateListZonesTool;

impl DateListZonesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "date_list_zones";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get all available IANA time zone ids.";

    /// Execute the tool logic.
    pub fn execute(_params: &DateListZonesParams) -> CallToolResult {
        info!("Time zone listing requested");

        let mut zones: Vec<&str> = chrono_tz::TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
        zones.sort_unstable();

        let count = zones.len();
        json_success(serde_json::json!({
            "available_time_zones": zones,
            "count": count
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: DateListZonesParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DateListZonesParams>(),
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
                let params: DateListZonesParams =
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

    #[test]
    fn test_listing_contains_common_zones() {
        let result = DateListZonesTool::execute(&DateListZonesParams::default());
        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        let value: serde_json::Value = serde_json::from_str(text).unwrap();

        let zones = value["available_time_zones"].as_array().unwrap();
        assert!(zones.len() > 400);
        assert!(zones.iter().any(|z| z == "Asia/Taipei"));
        assert!(zones.iter().any(|z| z == "UTC"));
        assert_eq!(value["count"], zones.len());
    }
}
