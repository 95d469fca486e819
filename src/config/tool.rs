//! External chart tool configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ConfigValidationError;

/// Longest accepted probe timeout.
const MAX_PROBE_TIMEOUT_SECS: u64 = 60;

/// External chart tool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    /// Whether to try the external tool at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Runtime whose presence is probed (`<runtime> --version`)
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Program that launches the tool
    #[serde(default = "default_launcher")]
    pub launcher: String,

    /// Launcher arguments, space-separated
    #[serde(default = "default_args")]
    pub args: String,

    /// Operation called when the tool list has no recognizable candidate
    #[serde(default = "default_tool")]
    pub default_tool: String,

    /// Per-command timeout for the availability probe
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Per-request timeout for tool calls; none when unset
    pub call_timeout_secs: Option<u64>,
}

impl ToolConfig {
    /// Launcher arguments as a list
    pub fn launcher_args(&self) -> Vec<String> {
        self.args.split_whitespace().map(str::to_string).collect()
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs.map(Duration::from_secs)
    }

    /// Validate tool configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.runtime.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired("tool.runtime"));
        }
        if self.launcher.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired("tool.launcher"));
        }
        if self.probe_timeout_secs == 0 || self.probe_timeout_secs > MAX_PROBE_TIMEOUT_SECS {
            return Err(ConfigValidationError::InvalidProbeTimeout);
        }
        if self.call_timeout_secs == Some(0) {
            return Err(ConfigValidationError::InvalidCallTimeout);
        }
        Ok(())
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            runtime: default_runtime(),
            launcher: default_launcher(),
            args: default_args(),
            default_tool: default_tool(),
            probe_timeout_secs: default_probe_timeout(),
            call_timeout_secs: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_runtime() -> String {
    "node".to_string()
}

fn default_launcher() -> String {
    "npx".to_string()
}

fn default_args() -> String {
    "-y @mymcp-fun/bazi".to_string()
}

fn default_tool() -> String {
    "calculate_bazi".to_string()
}

fn default_probe_timeout() -> u64 {
    5
}
