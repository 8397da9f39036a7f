//! City → township-forecast dataset-id lookup tool definition.
//!
//! Each county-level city has its own `F-D0047-xxx` dataset on the CWA open
//! data platform. This tool resolves a city name to the dataset id that the
//! `cwa_township_forecast` tool expects.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::common::{error_result, json_success};

/// Township forecast dataset per county-level city.
const CITY_DATASETS: [(&str, &str); 22] = [
    ("宜蘭縣", "F-D0047-001"),
    ("桃園市", "F-D0047-005"),
    ("新竹縣", "F-D0047-009"),
    ("苗栗縣", "F-D0047-013"),
    ("彰化縣", "F-D0047-017"),
    ("南投縣", "F-D0047-021"),
    ("雲林縣", "F-D0047-025"),
    ("嘉義縣", "F-D0047-029"),
    ("屏東縣", "F-D0047-033"),
    ("臺東縣", "F-D0047-037"),
    ("花蓮縣", "F-D0047-041"),
    ("澎湖縣", "F-D0047-045"),
    ("基隆市", "F-D0047-049"),
    ("新竹市", "F-D0047-053"),
    ("嘉義市", "F-D0047-057"),
    ("臺北市", "F-D0047-061"),
    ("高雄市", "F-D0047-065"),
    ("新北市", "F-D0047-069"),
    ("臺中市", "F-D0047-073"),
    ("臺南市", "F-D0047-077"),
    ("連江縣", "F-D0047-081"),
    ("金門縣", "F-D0047-085"),
];

/// Resolve a city name to its township-forecast dataset id.
pub fn city_dataset_id(city: &str) -> Option<&'static str> {
    CITY_DATASETS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, id)| *id)
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the city dataset lookup tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CwaCityDatasetParams {
    /// City name, e.g. 臺北市 or 花蓮縣.
    #[schemars(description = "County-level city name, e.g. 臺北市, 花蓮縣")]
    pub city_name: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// City dataset lookup tool.
pub struct CwaCityDatasetTool;

impl CwaCityDatasetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "cwa_city_dataset";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Look up the township-forecast dataset id (F-D0047-xxx) for a \
         Taiwanese county-level city, for use with cwa_township_forecast.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(city = %params.city_name))]
    pub fn execute(params: &CwaCityDatasetParams) -> CallToolResult {
        info!("Dataset lookup for {}", params.city_name);

        match city_dataset_id(&params.city_name) {
            Some(id) => json_success(serde_json::json!({
                "city_name": params.city_name,
                "dataset_id": id
            })),
            None => error_result(&format!(
                "Unknown city '{}'; expected a county-level city name such as 臺北市",
                params.city_name
            )),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: CwaCityDatasetParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CwaCityDatasetParams>(),
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
                let params: CwaCityDatasetParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cities() {
        assert_eq!(city_dataset_id("臺北市"), Some("F-D0047-061"));
        assert_eq!(city_dataset_id("花蓮縣"), Some("F-D0047-041"));
        assert_eq!(city_dataset_id("臺中市"), Some("F-D0047-073"));
        assert_eq!(city_dataset_id("新北市"), Some("F-D0047-069"));
    }

    #[test]
    fn test_unknown_city() {
        assert_eq!(city_dataset_id("不存在的城市"), None);
    }

    #[test]
    fn test_table_covers_all_22_cities() {
        assert_eq!(CITY_DATASETS.len(), 22);
        // Dataset ids are unique
        let mut ids: Vec<_> = CITY_DATASETS.iter().map(|(_, id)| *id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 22);
    }

    #[test]
    fn test_execute_unknown_city_is_error() {
        let params = CwaCityDatasetParams {
            city_name: "不存在的城市".to_string(),
        };
        let result = CwaCityDatasetTool::execute(&params);
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_execute_known_city_reports_id() {
        let params = CwaCityDatasetParams {
            city_name: "臺北市".to_string(),
        };
        let result = CwaCityDatasetTool::execute(&params);
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
    }
}
