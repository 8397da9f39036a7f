//! Place details tool definition.

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

use super::client::{DEFAULT_LANGUAGE, PlacesClient, field_mask};

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Parameters for the place details tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesDetailsParams {
    /// Place id, e.g. ChIJLV8ypcKrQjQRsA1XRbXg2GY.
    pub place_id: String,

    /// BCP-47 language code for the result.
    #[serde(default = "default_language")]
    pub language_code: String,

    /// Include extended fields (rating, opening hours, website, ...).
    #[serde(default)]
    pub extended: bool,
}

/// Place details tool.
pub struct PlacesDetailsTool;

impl PlacesDetailsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "places_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get details of a place by its place id.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(place_id = %params.place_id))]
    pub fn execute(params: &PlacesDetailsParams, config: &Config) -> CallToolResult {
        info!("Place details requested for {}", params.place_id);

        let client = match PlacesClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let query = [("languageCode", params.language_code.clone())];

        match client.get(
            &format!("/places/{}", params.place_id),
            &query,
            Some(&field_mask(params.extended, "")),
        ) {
            Ok(place) => json_success(serde_json::json!({ "place": place })),
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

        let params: PlacesDetailsParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<PlacesDetailsParams>(),
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
                let params: PlacesDetailsParams =
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
