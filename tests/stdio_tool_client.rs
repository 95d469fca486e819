//! Integration tests for the stdio tool client against scripted `sh` servers.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use bazi_chart::adapters::mcp::StdioToolConnector;
use bazi_chart::application::handlers::chart::{
    AvailabilityCache, CalculateChartCommand, CalculateChartHandler, ChartSource,
};
use bazi_chart::domain::bazi::{ApproximateCalculator, BirthMoment, ElementTally};
use bazi_chart::ports::{ContentBlock, RuntimeProbe, ToolConnector, ToolError, ToolSession};

const INITIALIZE_REPLY: &str = r#"{"jsonrpc":"2.0","id":1,"result":{"protocolVersion":"2024-11-05","capabilities":{"tools":{}},"serverInfo":{"name":"scripted-bazi","version":"0.0.1"}}}"#;

/// Answers initialize, tools/list (two pages) and tools/call, with noise in
/// between. Before answering tools/call it pings the client and records the
/// reply next to the script.
const HAPPY_SERVER: &str = r#"
read -r request
printf '%s\n' 'scripted server starting'
printf '%s\n' '__INITIALIZE__'
read -r notification
read -r request
printf '%s\n' '{"jsonrpc":"2.0","method":"notifications/message","params":{"level":"info"}}'
printf '%s\n' '{"jsonrpc":"2.0","id":2,"result":{"tools":[{"name":"getSolarTimes"}],"nextCursor":"page-2"}}'
read -r request
printf '%s\n' '{"jsonrpc":"2.0","id":3,"result":{"tools":[{"name":"getBaziDetail","description":"Four pillars"}]}}'
read -r request
printf '%s\n' '{"jsonrpc":"2.0","id":"srv-1","method":"ping"}'
read -r pong
printf '%s\n' "$pong" > "$0.pong"
printf '%s\n' "$request" > "$0.call"
printf '%s\n' '{"jsonrpc":"2.0","id":4,"result":{"content":[{"type":"text","text":"{\"bazi\":{\"四柱\":{\"年柱\":\"甲辰\",\"月柱\":\"丙寅\",\"日柱\":\"戊午\",\"時柱\":\"庚申\"},\"五行\":{\"金\":2,\"木\":1,\"水\":0,\"火\":2,\"土\":3},\"生肖\":\"龍\"}}"}]}}'
read -r done
"#;

fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body.replace("__INITIALIZE__", INITIALIZE_REPLY)).unwrap();
    path
}

fn connector(script: &Path) -> StdioToolConnector {
    StdioToolConnector::new("sh", vec![script.display().to_string()])
        .with_call_timeout(Duration::from_secs(10))
}

fn sidecar(script: &Path, suffix: &str) -> String {
    std::fs::read_to_string(format!("{}.{suffix}", script.display())).unwrap()
}

#[tokio::test]
async fn full_session_against_scripted_server() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "server.sh", HAPPY_SERVER);

    let mut session = connector(&script).connect().await.unwrap();

    let tools = session.list_tools().await.unwrap();
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["getSolarTimes", "getBaziDetail"]);
    assert_eq!(tools[1].description.as_deref(), Some("Four pillars"));

    let result = session
        .call_tool("getBaziDetail", json!({"year": 2024}))
        .await
        .unwrap();
    assert!(!result.is_error);
    assert_eq!(result.content.len(), 1);
    assert!(matches!(&result.content[0], ContentBlock::Text(text) if text.contains("四柱")));

    let pong: serde_json::Value = serde_json::from_str(sidecar(&script, "pong").trim()).unwrap();
    assert_eq!(pong, json!({"jsonrpc": "2.0", "id": "srv-1", "result": {}}));

    let call: serde_json::Value = serde_json::from_str(sidecar(&script, "call").trim()).unwrap();
    assert_eq!(call["method"], "tools/call");
    assert_eq!(call["params"]["name"], "getBaziDetail");
    assert_eq!(call["params"]["arguments"], json!({"year": 2024}));
}

#[tokio::test]
async fn server_exiting_early_is_closed() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "exit.sh", "read -r request\nexit 0\n");

    let err = connector(&script).connect().await.err().unwrap();
    assert!(matches!(err, ToolError::Closed), "got {err:?}");
}

#[tokio::test]
async fn initialize_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(
        &dir,
        "reject.sh",
        r#"read -r request
printf '%s\n' '{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"unsupported protocol"}}'
read -r done
"#,
    );

    let err = connector(&script).connect().await.err().unwrap();
    match err {
        ToolError::Rpc { code, message } => {
            assert_eq!(code, -32602);
            assert_eq!(message, "unsupported protocol");
        }
        other => panic!("expected rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn silent_server_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "silent.sh", "read -r request\nsleep 30\n");

    let connector = StdioToolConnector::new("sh", vec![script.display().to_string()])
        .with_call_timeout(Duration::from_secs(1));
    let err = connector.connect().await.err().unwrap();
    assert!(matches!(err, ToolError::Timeout { timeout_secs: 1 }), "got {err:?}");
}

struct ReadyProbe;

#[async_trait]
impl RuntimeProbe for ReadyProbe {
    async fn probe(&self) -> Result<(), String> {
        Ok(())
    }
}

#[tokio::test]
async fn chart_handler_uses_scripted_tool() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "server.sh", HAPPY_SERVER);

    let handler = CalculateChartHandler::new(
        Arc::new(connector(&script)),
        Arc::new(ReadyProbe),
        Arc::new(AvailabilityCache::new()),
        Arc::new(ApproximateCalculator::new()),
    );

    let result = handler
        .handle(CalculateChartCommand {
            moment: BirthMoment::parse("2024-02-10", "15:30", "Asia/Taipei").unwrap(),
            gender: Some("female".to_string()),
        })
        .await;

    assert_eq!(result.source, ChartSource::Tool("getBaziDetail".to_string()));
    assert_eq!(result.chart.zodiac.as_deref(), Some("龍"));
    assert_eq!(
        result.chart.wuxing,
        Some(ElementTally { jin: 2, mu: 1, shui: 0, huo: 2, tu: 3 })
    );
    assert_eq!(result.analysis, "五行最強旺的是：土。您的日主是 戊。");

    let call: serde_json::Value = serde_json::from_str(sidecar(&script, "call").trim()).unwrap();
    assert_eq!(
        call["params"]["arguments"],
        json!({
            "year": 2024, "month": 2, "day": 10, "hour": 15, "minute": 30,
            "timezone": "Asia/Taipei", "gender": "female"
        })
    );
}
