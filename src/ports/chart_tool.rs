//! Chart Tool Port - Interface to the external chart calculation tool.
//!
//! The tool is a separate process reached over a request/response protocol.
//! This port keeps the surface narrow: connect, list the callable tools, and
//! call one by name with a JSON argument map.
//!
//! # Example
//!
//! ```ignore
//! let mut session = connector.connect().await?;
//! let tools = session.list_tools().await?;
//! let result = session.call_tool("calculate_bazi", json!({"year": 2024})).await?;
//! for text in result.text_blocks() {
//!     println!("{text}");
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;

/// Opens sessions with the external tool.
#[async_trait]
pub trait ToolConnector: Send + Sync {
    /// Launches the tool and completes the protocol handshake.
    async fn connect(&self) -> Result<Box<dyn ToolSession>, ToolError>;
}

/// A live session with one tool process.
///
/// Dropping the session ends the process.
#[async_trait]
pub trait ToolSession: Send {
    /// Lists the operations the tool offers.
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>, ToolError>;

    /// Invokes the operation `name` with `arguments` (a JSON object).
    async fn call_tool(&mut self, name: &str, arguments: Value)
        -> Result<ToolCallResult, ToolError>;
}

/// A callable operation advertised by the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: Option<String>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// One typed block of a tool response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// A text block; chart tools put a JSON document here.
    Text(String),
    /// Any non-text block (image, resource, ...), identified by its type.
    Other(String),
}

/// Response of a tool call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallResult {
    pub content: Vec<ContentBlock>,
    /// Set when the tool reports a failure in-band.
    pub is_error: bool,
}

impl ToolCallResult {
    /// Text blocks in response order.
    pub fn text_blocks(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::Text(text) => Some(text.as_str()),
            ContentBlock::Other(_) => None,
        })
    }
}

/// Chart tool errors.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The tool process could not be started.
    #[error("failed to launch tool: {0}")]
    Launch(String),

    /// Reading from or writing to the tool failed.
    #[error("tool i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The tool sent something that does not follow the protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The tool answered a request with an error object.
    #[error("tool returned error {code}: {message}")]
    Rpc {
        /// Error code from the response.
        code: i64,
        /// Error message from the response.
        message: String,
    },

    /// The tool did not answer in time.
    #[error("tool call timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The tool closed its output before answering.
    #[error("tool closed the connection")]
    Closed,
}

impl ToolError {
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
