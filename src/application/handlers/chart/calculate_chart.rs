//! CalculateChartHandler - Delegates to the external chart tool, falling back
//! to local calculation.

use std::sync::Arc;

use serde_json::json;

use crate::domain::bazi::{normalize, summarize, BaziChart, BirthMoment};
use crate::ports::{ChartCalculator, RuntimeProbe, ToolConnector, ToolDescriptor, ToolError};

use super::availability::AvailabilityCache;

/// Tool name used when the tool list offers no recognizable candidate.
pub const DEFAULT_TOOL_NAME: &str = "calculate_bazi";

/// Gender forwarded to the tool when none was given.
const UNKNOWN_GENDER: &str = "unknown";

/// Name fragments that mark a tool as a chart calculator.
const TOOL_NAME_HINTS: [&str; 2] = ["bazi", "calculate"];

/// Longest prefix of a non-JSON tool reply that gets logged.
const LOG_PREVIEW_CHARS: usize = 100;

/// Command to compute a chart.
#[derive(Debug, Clone)]
pub struct CalculateChartCommand {
    pub moment: BirthMoment,
    pub gender: Option<String>,
}

/// Where a chart came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSource {
    /// Produced by the external tool operation with this name.
    Tool(String),
    /// Produced by the local approximate calculator.
    Fallback,
}

impl std::fmt::Display for ChartSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartSource::Tool(name) => write!(f, "tool:{name}"),
            ChartSource::Fallback => f.write_str("fallback"),
        }
    }
}

/// Result of chart calculation.
#[derive(Debug, Clone)]
pub struct CalculateChartResult {
    pub chart: BaziChart,
    pub analysis: String,
    pub source: ChartSource,
}

/// Handler for chart calculation.
///
/// Never fails: every problem with the external tool is logged and answered
/// with the local calculation.
pub struct CalculateChartHandler {
    connector: Arc<dyn ToolConnector>,
    probe: Arc<dyn RuntimeProbe>,
    availability: Arc<AvailabilityCache>,
    fallback: Arc<dyn ChartCalculator>,
    default_tool: String,
}

impl CalculateChartHandler {
    pub fn new(
        connector: Arc<dyn ToolConnector>,
        probe: Arc<dyn RuntimeProbe>,
        availability: Arc<AvailabilityCache>,
        fallback: Arc<dyn ChartCalculator>,
    ) -> Self {
        Self {
            connector,
            probe,
            availability,
            fallback,
            default_tool: DEFAULT_TOOL_NAME.to_string(),
        }
    }

    /// Overrides the tool name used when none matches.
    pub fn with_default_tool(mut self, name: impl Into<String>) -> Self {
        self.default_tool = name.into();
        self
    }

    pub async fn handle(&self, cmd: CalculateChartCommand) -> CalculateChartResult {
        let delegated = if self
            .availability
            .ensure_checked(self.probe.as_ref())
            .await
            .is_available()
        {
            match self.delegate(&cmd).await {
                Ok(found) => found,
                Err(e) => {
                    tracing::error!(error = %e, "Chart tool call failed");
                    None
                }
            }
        } else {
            None
        };

        let (chart, source) = match delegated {
            Some((tool, chart)) => (chart, ChartSource::Tool(tool)),
            None => {
                tracing::info!("Using local approximate chart calculation");
                (
                    self.fallback.calculate(&cmd.moment, cmd.gender.as_deref()),
                    ChartSource::Fallback,
                )
            }
        };

        let analysis = summarize(&chart);
        CalculateChartResult {
            chart,
            analysis,
            source,
        }
    }

    /// One round trip with a fresh tool process.
    ///
    /// `Ok(None)` means the tool answered but nothing usable came back.
    async fn delegate(
        &self,
        cmd: &CalculateChartCommand,
    ) -> Result<Option<(String, BaziChart)>, ToolError> {
        tracing::info!("Connecting to chart tool");
        let mut session = self.connector.connect().await?;

        let tools = session.list_tools().await?;
        let tool = match select_tool(&tools) {
            Some(name) => {
                tracing::info!(tool = %name, "Using chart tool operation");
                name
            }
            None => {
                tracing::warn!(
                    tool = %self.default_tool,
                    "No matching chart tool operation; trying default name"
                );
                self.default_tool.clone()
            }
        };

        let moment = &cmd.moment;
        let gender = cmd
            .gender
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(UNKNOWN_GENDER);
        let arguments = json!({
            "year": moment.year(),
            "month": moment.month(),
            "day": moment.day(),
            "hour": moment.hour(),
            "minute": moment.minute(),
            "timezone": moment.timezone(),
            "gender": gender,
        });

        let result = session.call_tool(&tool, arguments).await?;
        if result.is_error {
            tracing::warn!(tool = %tool, "Chart tool reported an error result");
            return Ok(None);
        }

        for text in result.text_blocks() {
            match serde_json::from_str(text) {
                Ok(raw) => return Ok(normalize(raw).into_chart().map(|chart| (tool, chart))),
                Err(_) => {
                    let preview: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
                    tracing::warn!(preview = %preview, "Chart tool returned non-JSON text");
                }
            }
        }

        tracing::warn!("Chart tool returned no usable content");
        Ok(None)
    }
}

/// Picks the first tool whose name mentions `bazi` or `calculate`, ignoring case.
pub fn select_tool(tools: &[ToolDescriptor]) -> Option<String> {
    tools
        .iter()
        .find(|tool| {
            let name = tool.name.to_lowercase();
            TOOL_NAME_HINTS.iter().any(|hint| name.contains(hint))
        })
        .map(|tool| tool.name.clone())
}
