//! Core infrastructure for the MCP server.
//!
//! This module contains the building blocks shared by every tool family:
//! configuration, the unified error type, the server handler, the time-range
//! resolver, path security, and the transport layer.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod timerange;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::TransportService;
