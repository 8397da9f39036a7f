//! Places field-mask reference tool definition.
//!
//! Static documentation of the field paths the other places tools can
//! request, so a client can decide whether the extended mask is worth it.

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

/// Field path → human description.
const FIELD_DESCRIPTIONS: [(&str, &str); 12] = [
    ("id", "Unique place id, usable with places_details"),
    ("displayName", "Localized display name of the place"),
    ("formattedAddress", "Full human-readable address"),
    ("location", "Latitude/longitude coordinates"),
    ("types", "Place type tags, e.g. restaurant, park"),
    ("rating", "Average user rating (1.0-5.0)"),
    ("userRatingCount", "Number of user ratings"),
    ("websiteUri", "The place's own website"),
    ("nationalPhoneNumber", "Phone number in national format"),
    ("regularOpeningHours", "Regular weekly opening hours"),
    ("currentOpeningHours", "Opening hours for the current week"),
    ("googleMapsUri", "Link to the place on Google Maps"),
];

/// Parameters for the field-mask reference tool (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PlacesFieldMasksParams {}

/// Field-mask reference tool.
pub struct PlacesFieldMasksTool;

impl PlacesFieldMasksTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "places_field_masks";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the Places API field paths the search and details tools \
         can return, with a description of each field.";

    /// Execute the tool logic.
    pub fn execute(_params: &PlacesFieldMasksParams) -> CallToolResult {
        info!("Places field mask reference requested");

        let fields: serde_json::Map<String, serde_json::Value> = FIELD_DESCRIPTIONS
            .iter()
            .map(|(name, description)| {
                (name.to_string(), serde_json::Value::String(description.to_string()))
            })
            .collect();

        json_success(serde_json::json!({
            "fields": fields,
            "count": FIELD_DESCRIPTIONS.len()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: PlacesFieldMasksParams = parse_params(arguments)?;
        Ok(http_response(Self::execute(&params)))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PlacesFieldMasksParams>(),
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
                let params: PlacesFieldMasksParams =
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
    fn test_reference_covers_both_masks() {
        let result = PlacesFieldMasksTool::execute(&PlacesFieldMasksParams::default());
        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        let value: serde_json::Value = serde_json::from_str(text).unwrap();

        let fields = value["fields"].as_object().unwrap();
        for path in super::super::client::BASIC_FIELD_PATHS {
            assert!(fields.contains_key(path), "missing {path}");
        }
        for path in super::super::client::EXTENDED_FIELD_PATHS {
            assert!(fields.contains_key(path), "missing {path}");
        }
    }
}
