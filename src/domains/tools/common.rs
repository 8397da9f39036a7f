//! Shared result helpers for tool implementations.
//!
//! Every tool reports through the same envelopes: successes carry a
//! pretty-printed `{"success": true, ...}` JSON object as text content,
//! failures carry a plain error message with the error flag set.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result carrying a `{"success": true, ...}` envelope.
///
/// `data` must be a JSON object; its fields are merged into the envelope.
pub fn json_success(data: serde_json::Value) -> CallToolResult {
    let mut envelope = serde_json::Map::new();
    envelope.insert("success".to_string(), serde_json::Value::Bool(true));
    if let serde_json::Value::Object(fields) = data {
        envelope.extend(fields);
    }

    let text = serde_json::to_string_pretty(&serde_json::Value::Object(envelope))
        .unwrap_or_else(|_| r#"{"success":true}"#.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// Create a success result with a human-readable summary plus structured
/// content for clients that understand it.
pub fn structured_result<T: Serialize>(summary: String, value: T) -> CallToolResult {
    let mut result = CallToolResult::success(vec![Content::text(summary)]);
    match serde_json::to_value(value) {
        Ok(structured) => result.structured_content = Some(structured),
        Err(e) => return error_result(&format!("Failed to serialize result: {e}")),
    }
    result
}

/// Deserialize HTTP tool arguments into a params struct.
#[cfg(feature = "http")]
pub fn parse_params<T: serde::de::DeserializeOwned>(
    arguments: serde_json::Value,
) -> Result<T, String> {
    serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))
}

/// Convert a CallToolResult into the JSON shape the HTTP transport returns.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> serde_json::Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let Some(structured) = result.structured_content {
        if let Some(obj) = response.as_object_mut() {
            obj.insert("structuredContent".to_string(), structured);
        }
    }

    response
}

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

    #[test]
    fn test_json_success_merges_fields() {
        let result = json_success(serde_json::json!({ "value": 42 }));
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["value"], 42);
    }

    #[test]
    fn test_error_result_sets_flag() {
        let result = error_result("boom");
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(text_of(&result), "boom");
    }

    #[test]
    fn test_structured_result_carries_payload() {
        #[derive(Serialize)]
        struct Payload {
            count: u32,
        }

        let result = structured_result("2 entries".to_string(), Payload { count: 2 });
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["count"], 2);
    }
}
