//! MCP adapters - the external chart tool reached over stdio.
//!
//! - `protocol` - JSON-RPC wire types
//! - `stdio_client` - `ToolConnector` that spawns the tool per session
//! - `probe` - `RuntimeProbe` that checks the runtime and launcher exist

pub mod probe;
pub mod protocol;
pub mod stdio_client;

pub use probe::CommandRuntimeProbe;
pub use stdio_client::{StdioToolConnector, StdioToolSession};
