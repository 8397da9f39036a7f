//! 36-hour city weather forecast tool definition.
//!
//! Queries dataset `F-C0032-001`. Time bounds are optional and forwarded
//! verbatim; the dataset itself covers a fixed 36-hour horizon.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::tools::common::{error_result, json_success};

use super::client::CwaClient;

/// Forecast dataset for the 22 county-level cities.
const DATASET_ID: &str = "F-C0032-001";

/// Forecast elements returned when the caller does not narrow them down.
const DEFAULT_ELEMENTS: [&str; 5] = ["Wx", "PoP", "MinT", "MaxT", "CI"];

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the city weather forecast tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CwaWeatherForecastParams {
    /// City name, e.g. 花蓮縣 or 臺東縣.
    #[schemars(description = "City name, e.g. 花蓮縣, 臺東縣")]
    pub location_name: String,

    /// Forecast elements to include. Options: Wx (weather phenomenon),
    /// PoP (precipitation probability), MinT, MaxT, CI (comfort index).
    /// All five are returned by default.
    #[serde(default)]
    #[schemars(description = "Forecast elements: Wx, PoP, MinT, MaxT, CI (default: all)")]
    pub element_name: Option<Vec<String>>,

    /// Start of the period, format yyyy-MM-ddTHH:mm:ss. Forwarded verbatim.
    #[serde(default)]
    #[schemars(description = "Period start, format yyyy-MM-ddTHH:mm:ss")]
    pub time_from: Option<String>,

    /// End of the period, format yyyy-MM-ddTHH:mm:ss. Forwarded verbatim.
    #[serde(default)]
    #[schemars(description = "Period end, format yyyy-MM-ddTHH:mm:ss")]
    pub time_to: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// City weather forecast tool - 36-hour forecast for a county-level city.
pub struct CwaWeatherForecastTool;

impl CwaWeatherForecastTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "cwa_weather_forecast";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get 36-hour weather forecast data for a Taiwanese city. \
         location_name is required; elements default to Wx, PoP, MinT, MaxT, and CI.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(location = %params.location_name))]
    pub fn execute(params: &CwaWeatherForecastParams, config: &Config) -> CallToolResult {
        info!("Weather forecast requested for {}", params.location_name);

        let client = match CwaClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let elements = params
            .element_name
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ELEMENTS.iter().map(|e| e.to_string()).collect());

        let mut query: Vec<(&str, String)> =
            vec![("locationName", params.location_name.clone())];
        for element in &elements {
            query.push(("elementName", element.clone()));
        }
        query.push(("timeFrom", params.time_from.clone().unwrap_or_default()));
        query.push(("timeTo", params.time_to.clone().unwrap_or_default()));
        query.push(("sort", "time".to_string()));

        match client.datastore_records(DATASET_ID, &query) {
            Ok(records) => json_success(serde_json::json!({
                "location_name": params.location_name,
                "records": records
            })),
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: CwaWeatherForecastParams = parse_params(arguments)?;

        // Blocking reqwest must stay off the async runtime.
        let handle = std::thread::spawn(move || Self::execute(&params, &config));
        let result = handle
            .join()
            .map_err(|_| "Tool thread panicked".to_string())?;

        Ok(http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CwaWeatherForecastParams>(),
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
                let params: CwaWeatherForecastParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                // Blocking reqwest must stay off the async runtime.
                let handle = std::thread::spawn(move || Self::execute(&params, &config));
                let result = handle
                    .join()
                    .map_err(|_| McpError::internal_error("Tool thread panicked", None))?;

                Ok(result)
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
    fn test_params_defaults() {
        let json = r#"{"location_name": "花蓮縣"}"#;
        let params: CwaWeatherForecastParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.location_name, "花蓮縣");
        assert!(params.element_name.is_none());
        assert!(params.time_from.is_none());
        assert!(params.time_to.is_none());
    }

    #[test]
    fn test_params_with_elements() {
        let json = r#"{"location_name": "臺東縣", "element_name": ["Wx", "PoP"]}"#;
        let params: CwaWeatherForecastParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.element_name.unwrap(), vec!["Wx", "PoP"]);
    }

    #[test]
    fn test_missing_auth_key_is_reported() {
        let params = CwaWeatherForecastParams {
            location_name: "花蓮縣".to_string(),
            element_name: None,
            time_from: None,
            time_to: None,
        };

        let result = CwaWeatherForecastTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
