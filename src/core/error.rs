//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! the tools domain and the shared infrastructure, providing consistent
//! error handling across the application.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Invalid time-range input from a caller.
    #[error("Time range error: {0}")]
    TimeRange(#[from] super::timerange::TimeRangeError),

    /// Path rejected by the security validator.
    #[error("Path security error: {0}")]
    PathSecurity(#[from] super::security::PathSecurityError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timerange::TimeRangeError;

    #[test]
    fn test_time_range_errors_convert() {
        let err: Error = TimeRangeError::EndBeforeStart.into();
        assert!(err.to_string().contains("precedes"));
    }

    #[test]
    fn test_tool_errors_convert() {
        let err: Error = crate::domains::tools::ToolError::not_found("cwa_earthquake").into();
        assert!(err.to_string().contains("cwa_earthquake"));
    }
}
