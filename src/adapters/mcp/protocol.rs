//! Wire types for the Model Context Protocol over stdio.
//!
//! Messages are JSON-RPC 2.0 objects, one per line.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ports::{ContentBlock, ToolCallResult, ToolDescriptor};

/// Protocol revision announced during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_INITIALIZED: &str = "notifications/initialized";
pub const METHOD_LIST_TOOLS: &str = "tools/list";
pub const METHOD_CALL_TOOL: &str = "tools/call";
pub const METHOD_PING: &str = "ping";

/// JSON-RPC "method not found".
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Outgoing request or notification.
#[derive(Debug, Serialize)]
pub struct OutgoingMessage<'a> {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl<'a> OutgoingMessage<'a> {
    pub fn request(id: u64, method: &'a str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: Some(id),
            method,
            params,
        }
    }

    pub fn notification(method: &'a str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: None,
            method,
            params,
        }
    }
}

/// Incoming message: a response, a notification or a server-initiated request.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl IncomingMessage {
    /// True if this is the response to request `id`.
    pub fn answers(&self, id: u64) -> bool {
        self.method.is_none() && self.id.as_ref().and_then(Value::as_u64) == Some(id)
    }

    /// True if the server is asking the client something.
    pub fn is_server_request(&self) -> bool {
        self.method.is_some() && self.id.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Reply to a server-initiated request.
#[derive(Debug, Serialize)]
pub struct OutgoingResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl OutgoingResponse {
    pub fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn method_not_found(id: Value, method: &str) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(json!({
                "code": METHOD_NOT_FOUND,
                "message": format!("Method not found: {method}"),
            })),
        }
    }
}

/// Parameters of the `initialize` request.
pub fn initialize_params(client_name: &str, client_version: &str) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {},
        "clientInfo": {
            "name": client_name,
            "version": client_version,
        },
    })
}

/// Result of `tools/list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsResult {
    #[serde(default)]
    pub tools: Vec<WireTool>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireTool {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<WireTool> for ToolDescriptor {
    fn from(tool: WireTool) -> Self {
        Self {
            name: tool.name,
            description: tool.description,
        }
    }
}

/// Result of `tools/call`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    #[serde(default)]
    pub content: Vec<WireContent>,
    #[serde(default)]
    pub is_error: bool,
}

#[derive(Debug, Deserialize)]
pub struct WireContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl From<WireContent> for ContentBlock {
    fn from(content: WireContent) -> Self {
        match (content.kind.as_str(), content.text) {
            ("text", Some(text)) => ContentBlock::Text(text),
            _ => ContentBlock::Other(content.kind),
        }
    }
}

impl From<CallToolResult> for ToolCallResult {
    fn from(result: CallToolResult) -> Self {
        Self {
            content: result.content.into_iter().map(ContentBlock::from).collect(),
            is_error: result.is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_id_and_params() {
        let msg = OutgoingMessage::request(7, METHOD_LIST_TOOLS, Some(json!({})));
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": 7, "method": "tools/list", "params": {}}));
    }

    #[test]
    fn notification_omits_id_and_params() {
        let msg = OutgoingMessage::notification(METHOD_INITIALIZED, None);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
    }

    #[test]
    fn incoming_response_matches_its_id() {
        let msg: IncomingMessage =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":3,"result":{}}"#).unwrap();
        assert!(msg.answers(3));
        assert!(!msg.answers(4));
        assert!(!msg.is_server_request());
    }

    #[test]
    fn server_ping_is_a_request_not_an_answer() {
        let msg: IncomingMessage =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#).unwrap();
        assert!(!msg.answers(3));
        assert!(msg.is_server_request());
    }

    #[test]
    fn call_result_keeps_text_and_tags_other_blocks() {
        let raw = json!({
            "content": [
                {"type": "image", "data": "...", "mimeType": "image/png"},
                {"type": "text", "text": "{\"zodiac\":\"龍\"}"}
            ],
            "isError": false
        });
        let result: ToolCallResult = serde_json::from_value::<CallToolResult>(raw).unwrap().into();
        assert_eq!(
            result.content,
            vec![
                ContentBlock::Other("image".to_string()),
                ContentBlock::Text("{\"zodiac\":\"龍\"}".to_string()),
            ]
        );
        assert!(!result.is_error);
    }

    #[test]
    fn list_tools_reads_cursor() {
        let raw = json!({"tools": [{"name": "getBaziDetail"}], "nextCursor": "p2"});
        let result: ListToolsResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.tools.len(), 1);
        assert_eq!(result.next_cursor.as_deref(), Some("p2"));
    }
}
