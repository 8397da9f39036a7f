//! Region time-zone listing tool definition.

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

/// Parameters for the region listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DateRegionZonesParams {
    /// Region prefix, e.g. Asia, Europe, America, Pacific, Australia, Africa.
    #[schemars(description = "Region name: Asia, Europe, America, Pacific, Australia, or Africa")]
    pub region: String,
}

/// Region zone listing tool - IANA zone ids under one region prefix.
pub struct DateRegionZonesTool;

impl DateRegionZonesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "date_region_zones";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get common time zones for a region (Asia, Europe, America, \
         Pacific, Australia, Africa).";

    /// Execute the tool logic.
    pub fn execute(params: &DateRegionZonesParams) -> CallToolResult {
        info!("Region zone listing requested for {}", params.region);

        let mut zones: Vec<&str> = chrono_tz::TZ_VARIANTS
            .iter()
            .map(|tz| tz.name())
            .filter(|name| name.starts_with(&params.region))
            .collect();
        zones.sort_unstable();

        if zones.is_empty() {
            return error_result(&format!(
                "No time zones found for region '{}'. Available regions: Asia, Europe, \
                 America, Pacific, Australia, Africa",
                params.region
            ));
        }

        let count = zones.len();
        json_success(serde_json::json!({
            "region": params.region,
            "time_zones": zones,
            "count": count
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: DateRegionZonesParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DateRegionZonesParams>(),
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
                let params: DateRegionZonesParams =
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
    fn test_asia_zones() {
        let params = DateRegionZonesParams {
            region: "Asia".to_string(),
        };
        let result = DateRegionZonesTool::execute(&params);
        let value = payload(&result);

        let zones = value["time_zones"].as_array().unwrap();
        assert!(zones.iter().any(|z| z == "Asia/Taipei"));
        assert!(zones.iter().all(|z| z.as_str().unwrap().starts_with("Asia")));
    }

    #[test]
    fn test_unknown_region_is_error() {
        let params = DateRegionZonesParams {
            region: "Atlantis".to_string(),
        };
        let result = DateRegionZonesTool::execute(&params);
        assert!(result.is_error.unwrap_or(false));
    }
}
