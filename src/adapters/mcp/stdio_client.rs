//! Stdio MCP client - launches the chart tool as a child process per session.
//!
//! The child is spawned with the parent's environment, handshaken with
//! `initialize` / `notifications/initialized`, and killed when the session is
//! dropped. Nothing is pooled between sessions.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use crate::config::ToolConfig;
use crate::ports::{ToolCallResult, ToolConnector, ToolDescriptor, ToolError, ToolSession};

use super::protocol::{
    initialize_params, CallToolResult, IncomingMessage, ListToolsResult, OutgoingMessage,
    OutgoingResponse, METHOD_CALL_TOOL, METHOD_INITIALIZE, METHOD_INITIALIZED, METHOD_LIST_TOOLS,
    METHOD_PING,
};

const CLIENT_NAME: &str = env!("CARGO_PKG_NAME");
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on `tools/list` pages followed.
const MAX_TOOL_PAGES: usize = 16;

/// Connector that spawns `launcher args...` for every session.
#[derive(Debug, Clone)]
pub struct StdioToolConnector {
    launcher: String,
    args: Vec<String>,
    call_timeout: Option<Duration>,
}

impl StdioToolConnector {
    pub fn new(launcher: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            launcher: launcher.into(),
            args,
            call_timeout: None,
        }
    }

    /// Bounds each request/response exchange.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        let connector = Self::new(config.launcher.clone(), config.launcher_args());
        match config.call_timeout() {
            Some(timeout) => connector.with_call_timeout(timeout),
            None => connector,
        }
    }
}

#[async_trait]
impl ToolConnector for StdioToolConnector {
    async fn connect(&self) -> Result<Box<dyn ToolSession>, ToolError> {
        tracing::debug!(launcher = %self.launcher, args = ?self.args, "Launching chart tool");

        let mut child = Command::new(&self.launcher)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ToolError::Launch(format!("{}: {}", self.launcher, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ToolError::Launch("child stdin was not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ToolError::Launch("child stdout was not captured".to_string()))?;

        let mut session = StdioToolSession {
            _child: child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            next_id: 1,
            call_timeout: self.call_timeout,
        };
        session.initialize().await?;
        Ok(Box::new(session))
    }
}

/// One running tool process.
pub struct StdioToolSession {
    // Held so the process is killed on drop.
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    call_timeout: Option<Duration>,
}

impl StdioToolSession {
    async fn initialize(&mut self) -> Result<(), ToolError> {
        let result = self
            .request(METHOD_INITIALIZE, Some(initialize_params(CLIENT_NAME, CLIENT_VERSION)))
            .await?;
        if let Some(server) = result.get("serverInfo") {
            tracing::debug!(server = %server, "Chart tool initialized");
        }
        self.send(&OutgoingMessage::notification(METHOD_INITIALIZED, None))
            .await
    }

    async fn send<T: Serialize>(&mut self, message: &T) -> Result<(), ToolError> {
        let mut line = serde_json::to_vec(message)
            .map_err(|e| ToolError::protocol(format!("failed to encode message: {e}")))?;
        line.push(b'\n');
        self.stdin.write_all(&line).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Sends a request and waits for its response, honouring the call timeout.
    async fn request(&mut self, method: &str, params: Option<Value>) -> Result<Value, ToolError> {
        match self.call_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.exchange(method, params))
                .await
                .map_err(|_| ToolError::Timeout {
                    timeout_secs: timeout.as_secs(),
                })?,
            None => self.exchange(method, params).await,
        }
    }

    async fn exchange(&mut self, method: &str, params: Option<Value>) -> Result<Value, ToolError> {
        let id = self.next_id;
        self.next_id += 1;
        self.send(&OutgoingMessage::request(id, method, params)).await?;

        loop {
            let line = self.stdout.next_line().await?.ok_or(ToolError::Closed)?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let message: IncomingMessage = match serde_json::from_str(trimmed) {
                Ok(message) => message,
                Err(_) => {
                    tracing::debug!(line = %trimmed, "Skipping non-protocol output from chart tool");
                    continue;
                }
            };

            if message.answers(id) {
                if let Some(error) = message.error {
                    return Err(ToolError::Rpc {
                        code: error.code,
                        message: error.message,
                    });
                }
                return Ok(message.result.unwrap_or(Value::Null));
            }

            if message.is_server_request() {
                self.reply_to_server(message).await?;
            }
            // Notifications and stale responses are ignored.
        }
    }

    async fn reply_to_server(&mut self, message: IncomingMessage) -> Result<(), ToolError> {
        let (Some(id), Some(method)) = (message.id, message.method) else {
            return Ok(());
        };
        let reply = if method == METHOD_PING {
            OutgoingResponse::result(id, json!({}))
        } else {
            OutgoingResponse::method_not_found(id, &method)
        };
        self.send(&reply).await
    }
}

#[async_trait]
impl ToolSession for StdioToolSession {
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>, ToolError> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_TOOL_PAGES {
            let params = match &cursor {
                Some(cursor) => json!({ "cursor": cursor }),
                None => json!({}),
            };
            let raw = self.request(METHOD_LIST_TOOLS, Some(params)).await?;
            let page: ListToolsResult = serde_json::from_value(raw)
                .map_err(|e| ToolError::protocol(format!("malformed tools/list result: {e}")))?;

            tools.extend(page.tools.into_iter().map(ToolDescriptor::from));
            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
        }

        Ok(tools)
    }

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallResult, ToolError> {
        let raw = self
            .request(
                METHOD_CALL_TOOL,
                Some(json!({ "name": name, "arguments": arguments })),
            )
            .await?;
        let result: CallToolResult = serde_json::from_value(raw)
            .map_err(|e| ToolError::protocol(format!("malformed tools/call result: {e}")))?;
        Ok(result.into())
    }
}
