//! Toolbox MCP Server Library
//!
//! This crate provides an MCP (Model Context Protocol) server exposing a
//! collection of independent tool families: Taiwan CWA weather and
//! earthquake queries, date/timezone utilities, spreadsheet manipulation,
//! sandboxed filesystem access, SMTP mail sending, Google Drive file
//! management, and Google Places search.
//!
//! # Architecture
//!
//! - **core**: Shared infrastructure - configuration, error handling, the
//!   time-range resolver, path security, transports, and the main server
//! - **domains::tools**: The tool families, one file per tool under
//!   `definitions/`, wired through a dynamically built router
//!
//! # Example
//!
//! ```rust,no_run
//! use toolbox_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
