//! Place photo download tool definition.
//!
//! Downloads photo media for a photo resource name returned by the search
//! and details tools, saving it into a validated local directory.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fs;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::config::Config;
use crate::core::security::validate_path;
use crate::domains::tools::common::{error_result, json_success};

use super::client::PlacesClient;

fn default_filename() -> String {
    "photo".to_string()
}

fn default_max_width() -> u32 {
    800
}

fn default_max_height() -> u32 {
    600
}

/// Parameters for the photo download tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlacesPhotoParams {
    /// Photo resource name, e.g. places/XXXX/photos/YYYY.
    #[schemars(description = "Photo resource name from a search result (places/.../photos/...)")]
    pub photo_name: String,

    /// Directory to save the photo into (must be within the allowed roots).
    pub path: String,

    /// Output filename without extension.
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Maximum width of the downloaded image in pixels.
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Maximum height of the downloaded image in pixels.
    #[serde(default = "default_max_height")]
    pub max_height: u32,

    /// Overwrite an existing file.
    #[serde(default)]
    pub overwrite: bool,
}

/// Photo download tool.
pub struct PlacesPhotoTool;

impl PlacesPhotoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "places_photo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Download a Google Places photo to a local directory. Takes the \
         photo resource name returned by the search and details tools.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(photo = %params.photo_name))]
    pub fn execute(params: &PlacesPhotoParams, config: &Config) -> CallToolResult {
        info!("Places photo download for {}", params.photo_name);

        if !params.photo_name.starts_with("places/") || !params.photo_name.contains("/photos/") {
            return error_result(
                "Invalid photo name (expected places/<place>/photos/<photo>)",
            );
        }

        let dir_path = match validate_path(&params.path, config) {
            Ok(p) => p,
            Err(e) => {
                warn!("Path security validation failed: {}", e);
                return error_result(&format!("Path security validation failed: {}", e));
            }
        };

        if !dir_path.is_dir() {
            return error_result(&format!("Path is not a directory: {}", params.path));
        }

        let client = match PlacesClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let query = [
            ("maxWidthPx", params.max_width.to_string()),
            ("maxHeightPx", params.max_height.to_string()),
        ];

        let (bytes, content_type) =
            match client.get_media(&format!("/{}/media", params.photo_name), &query) {
                Ok(media) => media,
                Err(e) => return error_result(&e.to_string()),
            };

        let extension = extension_for(content_type.as_deref());
        let full_filename = format!("{}.{}", params.filename, extension);
        let file_path = dir_path.join(&full_filename);

        if file_path.exists() && !params.overwrite {
            return error_result(&format!(
                "File already exists: {}. Use overwrite=true to replace",
                file_path.display()
            ));
        }

        if let Err(e) = fs::write(&file_path, &bytes) {
            return error_result(&format!("Failed to write file: {}", e));
        }

        info!("Saved {} ({} bytes)", file_path.display(), bytes.len());

        json_success(serde_json::json!({
            "message": "Photo downloaded successfully",
            "photo_name": params.photo_name,
            "file_path": file_path.to_string_lossy(),
            "size": bytes.len(),
            "content_type": content_type
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::common::{http_response, parse_params};

        let params: PlacesPhotoParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<PlacesPhotoParams>(),
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
                let params: PlacesPhotoParams =
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

/// Pick a file extension from the media content type.
fn extension_for(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some(ct) if ct.contains("png") => "png",
        Some(ct) if ct.contains("gif") => "gif",
        Some(ct) if ct.contains("webp") => "webp",
        // jpeg is the service default
        _ => "jpg",
    }
}
