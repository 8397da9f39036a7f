//! Business logic organized by domain.
//!
//! The server exposes a single domain: tools. Each tool family lives under
//! `tools/definitions/`.

pub mod tools;
