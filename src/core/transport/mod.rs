//! Transport layer for the MCP server.
//!
//! Three interchangeable transports, selected at build time via features and
//! at runtime via `MCP_TRANSPORT`:
//! - **STDIO**: standard input/output (default MCP mode) - feature `stdio`
//! - **TCP**: line-delimited JSON-RPC over a socket - feature `tcp`
//! - **HTTP**: JSON-RPC over POST requests - feature `http`
//!
//! Each transport owns the connection lifecycle and hands message processing
//! to the MCP server handler.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
