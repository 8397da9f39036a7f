//! Places text search tool definition.

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

use super::client::{DEFAULT_LANGUAGE, DEFAULT_MAX_RESULTS, PlacesClient, field_mask};

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

/// Parameters for the text search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesTextSearchParams {
    /// Free-text query, e.g. "台北 夜市" or "coffee near the station".
    pub text_query: String,

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

/// Text search tool.
pub struct PlacesTextSearchTool;

impl PlacesTextSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "places_text_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search places using a free-text query via the Google Places \
         API. Returns name, address, location, and types for each match.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(query = %params.text_query))]
    pub fn execute(params: &PlacesTextSearchParams, config: &Config) -> CallToolResult {
        info!("Places text search for '{}'", params.text_query);

        let client = match PlacesClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let body = serde_json::json!({
            "textQuery": params.text_query,
            "languageCode": params.language_code,
            "maxResultCount": params.max_results.clamp(1, 20)
        });

        match client.post(
            "/places:searchText",
            body,
            Some(&field_mask(params.extended, "places.")),
        ) {
            Ok(payload) => {
                let count = payload["places"].as_array().map(|p| p.len()).unwrap_or(0);
                json_success(serde_json::json!({
                    "query": params.text_query,
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

        let params: PlacesTextSearchParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<PlacesTextSearchParams>(),
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
                let params: PlacesTextSearchParams =
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
