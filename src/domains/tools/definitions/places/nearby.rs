//! Places nearby search tool definition.

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

use super::client::{
    DEFAULT_LANGUAGE, DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_METERS, PlacesClient, field_mask,
};

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_METERS
}

/// Parameters for the nearby search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesNearbyParams {
    /// Latitude of the search center.
    pub latitude: f64,

    /// Longitude of the search center.
    pub longitude: f64,

    /// Search radius in meters.
    #[serde(default = "default_radius")]
    pub radius_meters: f64,

    /// Restrict results to these place types, e.g. ["restaurant"].
    #[serde(default)]
    pub included_types: Option<Vec<String>>,

    /// BCP-47 language code for the results.
    #[serde(default = "default_language")]
    pub language_code: String,

    /// Maximum number of places to return (1-20).
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Include extended fields (rating, opening hours, website, ...).
    #[serde(default)]
    pub extended: bool,
}

/// Nearby search tool.
pub struct PlacesNearbyTool;

impl PlacesNearbyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "places_nearby";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get places near a latitude/longitude within a radius \
         (default 500m), optionally restricted to specific place types.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(lat = params.latitude, lng = params.longitude))]
    pub fn execute(params: &PlacesNearbyParams, config: &Config) -> CallToolResult {
        info!(
            "Places nearby search at ({}, {})",
            params.latitude, params.longitude
        );

        let client = match PlacesClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let mut body = serde_json::json!({
            "locationRestriction": {
                "circle": {
                    "center": {
                        "latitude": params.latitude,
                        "longitude": params.longitude
                    },
                    "radius": params.radius_meters
                }
            },
            "languageCode": params.language_code,
            "maxResultCount": params.max_results.clamp(1, 20)
        });

        if let Some(types) = &params.included_types {
            if !types.is_empty() {
                body["includedTypes"] = serde_json::json!(types);
            }
        }

        match client.post(
            "/places:searchNearby",
            body,
            Some(&field_mask(params.extended, "places.")),
        ) {
            Ok(payload) => {
                let count = payload["places"].as_array().map(|p| p.len()).unwrap_or(0);
                json_success(serde_json::json!({
                    "center": { "latitude": params.latitude, "longitude": params.longitude },
                    "radius_meters": params.radius_meters,
                    "count": count,
                    "places": payload["places"]
                }))
            }
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

        let params: PlacesNearbyParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<PlacesNearbyParams>(),
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
                let params: PlacesNearbyParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let json = r#"{"latitude": 25.0478, "longitude": 121.517}"#;
        let params: PlacesNearbyParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.radius_meters, 500.0);
        assert_eq!(params.max_results, 20);
        assert!(params.included_types.is_none());
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let params = PlacesNearbyParams {
            latitude: 25.0478,
            longitude: 121.517,
            radius_meters: default_radius(),
            included_types: None,
            language_code: default_language(),
            max_results: default_max_results(),
            extended: false,
        };
        let result = PlacesNearbyTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
