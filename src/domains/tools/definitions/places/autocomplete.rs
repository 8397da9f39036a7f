//! Places autocomplete tool definition.

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

use super::client::{DEFAULT_LANGUAGE, PlacesClient};

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Parameters for the autocomplete tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesAutocompleteParams {
    /// Partial input to complete, e.g. "台北 1".
    pub input: String,

    /// BCP-47 language code for the suggestions.
    #[serde(default = "default_language")]
    pub language_code: String,
}

/// Autocomplete tool.
pub struct PlacesAutocompleteTool;

impl PlacesAutocompleteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "places_autocomplete";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get place autocomplete suggestions for a partial text input.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(input = %params.input))]
    pub fn execute(params: &PlacesAutocompleteParams, config: &Config) -> CallToolResult {
        info!("Places autocomplete for '{}'", params.input);

        let client = match PlacesClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let body = serde_json::json!({
            "input": params.input,
            "languageCode": params.language_code
        });

        match client.post("/places:autocomplete", body, None) {
            Ok(payload) => {
                let count = payload["suggestions"]
                    .as_array()
                    .map(|s| s.len())
                    .unwrap_or(0);
                json_success(serde_json::json!({
                    "input": params.input,
                    "count": count,
                    "suggestions": payload["suggestions"]
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

        let params: PlacesAutocompleteParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<PlacesAutocompleteParams>(),
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
                let params: PlacesAutocompleteParams =
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
        let json = r#"{"input": "台北"}"#;
        let params: PlacesAutocompleteParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.language_code, "zh-TW");
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let params = PlacesAutocompleteParams {
            input: "台北".to_string(),
            language_code: default_language(),
        };
        let result = PlacesAutocompleteTool::execute(&params, &Config::default());
        assert!(result.is_error.unwrap_or(false));
    }
}
