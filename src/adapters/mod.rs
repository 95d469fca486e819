//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API and static page (axum)
//! - `mcp` - External chart tool reached over stdio

pub mod http;
pub mod mcp;

pub use mcp::{CommandRuntimeProbe, StdioToolConnector};
