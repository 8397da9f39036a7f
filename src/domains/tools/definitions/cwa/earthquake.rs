//! Earthquake observation tool definition.
//!
//! Queries dataset `E-A0015-001`. The query window defaults to the 36 hours
//! before now and is normalized through the time-range resolver with a
//! trailing policy: windows longer than 36 hours are truncated, and an
//! end-only input derives its start.

use chrono::{Duration, Local};
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
use crate::core::timerange::{self, CWA_TIME_PATTERN, ResolutionPolicy};
use crate::domains::tools::common::{error_result, json_success};

use super::client::CwaClient;

/// Significant earthquake report dataset.
const DATASET_ID: &str = "E-A0015-001";

/// Observation window cap.
const MAX_WINDOW_HOURS: i64 = 36;

fn default_limit() -> u32 {
    1
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the earthquake observation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CwaEarthquakeParams {
    /// Area name, e.g. 花蓮縣 or 臺東縣.
    #[schemars(description = "Area name, e.g. 花蓮縣, 臺東縣")]
    pub area_name: String,

    /// Start time (yyyy-MM-ddTHH:mm:ss). Defaults to 36 hours before now.
    #[serde(default)]
    #[schemars(description = "Start time, format yyyy-MM-ddTHH:mm:ss")]
    pub time_from: Option<String>,

    /// End time (yyyy-MM-ddTHH:mm:ss). Defaults to now.
    #[serde(default)]
    #[schemars(description = "End time, format yyyy-MM-ddTHH:mm:ss")]
    pub time_to: Option<String>,

    /// Maximum number of reports to return.
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of reports (default: 1)")]
    pub limit: u32,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Earthquake observation tool - reports within a bounded time window.
pub struct CwaEarthquakeTool;

impl CwaEarthquakeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "cwa_earthquake";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get earthquake observation data for a specific area. \
         area_name is required; returns data within the past 36 hours by default.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(area = %params.area_name))]
    pub fn execute(params: &CwaEarthquakeParams, config: &Config) -> CallToolResult {
        info!("Earthquake data requested for {}", params.area_name);

        let now = Local::now().naive_local();
        let policy = ResolutionPolicy::trailing(now, Duration::hours(MAX_WINDOW_HOURS));

        let window = match timerange::resolve(
            params.time_from.as_deref(),
            params.time_to.as_deref(),
            now,
            &policy,
        ) {
            Ok(w) => w,
            Err(e) => return error_result(&e.to_string()),
        };

        let client = match CwaClient::from_config(config) {
            Ok(c) => c,
            Err(e) => return error_result(&e.to_string()),
        };

        let (time_from, time_to) = window.to_query_strings(CWA_TIME_PATTERN);
        let query: Vec<(&str, String)> = vec![
            ("AreaName", params.area_name.clone()),
            ("timeFrom", time_from.clone()),
            ("timeTo", time_to.clone()),
            ("limit", params.limit.to_string()),
            ("sort", "time".to_string()),
        ];

        match client.datastore_records(DATASET_ID, &query) {
            Ok(records) => json_success(serde_json::json!({
                "area_name": params.area_name,
                "time_from": time_from,
                "time_to": time_to,
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

        let params: CwaEarthquakeParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<CwaEarthquakeParams>(),
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
                let params: CwaEarthquakeParams =
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

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn params(time_from: Option<&str>, time_to: Option<&str>) -> CwaEarthquakeParams {
        CwaEarthquakeParams {
            area_name: "花蓮縣".to_string(),
            time_from: time_from.map(String::from),
            time_to: time_to.map(String::from),
            limit: default_limit(),
        }
    }

    #[test]
    fn test_params_default_limit() {
        let json = r#"{"area_name": "花蓮縣"}"#;
        let parsed: CwaEarthquakeParams = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.limit, 1);
    }

    #[test]
    fn test_end_before_start_rejected_before_any_request() {
        let result = CwaEarthquakeTool::execute(
            &params(Some("2025-04-02T00:00:00"), Some("2025-04-01T00:00:00")),
            &Config::default(),
        );
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("precedes"));
    }

    #[test]
    fn test_unparseable_time_rejected() {
        let result =
            CwaEarthquakeTool::execute(&params(Some("yesterday"), None), &Config::default());
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("unparseable"));
    }

    #[test]
    fn test_missing_auth_key_reported_after_resolution() {
        // Valid window, no credentials: the failure is the config, not input.
        let result = CwaEarthquakeTool::execute(&params(None, None), &Config::default());
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("CWA_AUTH_KEY"));
    }
}
