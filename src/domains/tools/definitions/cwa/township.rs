//! Township weather forecast tool definition.
//!
//! Queries the per-city `F-D0047-xxx` datasets (dataset id from the
//! `cwa_city_dataset` tool). The query window is normalized through the
//! time-range resolver with a leading 24-hour policy: defaults run from now
//! to now+24h, oversized windows are truncated, and an end without a start
//! is rejected.

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

/// Forecast window cap.
const MAX_WINDOW_HOURS: i64 = 24;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the township forecast tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CwaTownshipForecastParams {
    /// Dataset id of the city, e.g. F-D0047-061 for 臺北市.
    #[schemars(description = "City dataset id, e.g. F-D0047-061 (see cwa_city_dataset)")]
    pub location_id: String,

    /// Township name inside the city, e.g. 萬華區 or 花蓮市.
    #[schemars(description = "Township name, e.g. 萬華區, 花蓮市")]
    pub location_name: String,

    /// Start time (yyyy-MM-ddTHH:mm:ss). Defaults to now.
    #[serde(default)]
    #[schemars(description = "Start time, format yyyy-MM-ddTHH:mm:ss")]
    pub time_from: Option<String>,

    /// End time (yyyy-MM-ddTHH:mm:ss). Defaults to 24 hours after the start.
    #[serde(default)]
    #[schemars(description = "End time, format yyyy-MM-ddTHH:mm:ss")]
    pub time_to: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Township forecast tool - fine-grained forecast for one township.
pub struct CwaTownshipForecastTool;

impl CwaTownshipForecastTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "cwa_township_forecast";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get township-level weather forecast data. Requires the city \
         dataset id (location_id, see cwa_city_dataset) and the township name. \
         The window defaults to the next 24 hours; an end time without a start \
         time is not allowed.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(dataset = %params.location_id, township = %params.location_name))]
    pub fn execute(params: &CwaTownshipForecastParams, config: &Config) -> CallToolResult {
        info!(
            "Township forecast requested for {} in {}",
            params.location_name, params.location_id
        );

        let now = Local::now().naive_local();
        let policy = ResolutionPolicy::leading(now, Duration::hours(MAX_WINDOW_HOURS));

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
            ("LocationName", params.location_name.clone()),
            ("timeFrom", time_from.clone()),
            ("timeTo", time_to.clone()),
            ("sort", "time".to_string()),
        ];

        match client.datastore_records(&params.location_id, &query) {
            Ok(records) => json_success(serde_json::json!({
                "location_id": params.location_id,
                "location_name": params.location_name,
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

        let params: CwaTownshipForecastParams = parse_params(arguments)?;

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
            input_schema: cached_schema_for_type::<CwaTownshipForecastParams>(),
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
                let params: CwaTownshipForecastParams =
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
