//! Command-based runtime probe.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::ToolConfig;
use crate::ports::RuntimeProbe;

/// Probes by running `<runtime> --version` and `<launcher> --version`.
///
/// Both must exit successfully within the timeout.
#[derive(Debug, Clone)]
pub struct CommandRuntimeProbe {
    runtime: String,
    launcher: String,
    timeout: Duration,
}

impl CommandRuntimeProbe {
    pub fn new(runtime: impl Into<String>, launcher: impl Into<String>, timeout: Duration) -> Self {
        Self {
            runtime: runtime.into(),
            launcher: launcher.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(
            config.runtime.clone(),
            config.launcher.clone(),
            config.probe_timeout(),
        )
    }

    async fn check_version(&self, program: &str) -> Result<String, String> {
        let output = Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, output)
            .await
            .map_err(|_| format!("{program} --version timed out after {}s", self.timeout.as_secs()))?
            .map_err(|e| format!("{program} not found: {e}"))?;

        if !output.status.success() {
            return Err(format!("{program} --version exited with {}", output.status));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl RuntimeProbe for CommandRuntimeProbe {
    async fn probe(&self) -> Result<(), String> {
        let runtime_version = self.check_version(&self.runtime).await?;
        let launcher_version = self.check_version(&self.launcher).await?;
        tracing::info!(
            runtime = %self.runtime,
            runtime_version = %runtime_version,
            launcher = %self.launcher,
            launcher_version = %launcher_version,
            "Chart tool prerequisites found"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_runtime_is_reported() {
        let probe = CommandRuntimeProbe::new(
            "definitely-not-a-real-runtime-7f3a",
            "definitely-not-a-real-launcher-7f3a",
            Duration::from_secs(5),
        );
        let reason = probe.probe().await.unwrap_err();
        assert!(reason.contains("definitely-not-a-real-runtime-7f3a"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn succeeds_when_both_commands_exit_cleanly() {
        let check = CommandRuntimeProbe::new("true", "true", Duration::from_secs(5));
        assert_eq!(check.probe().await, Ok(()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_launcher_is_reported() {
        let check = CommandRuntimeProbe::new("true", "false", Duration::from_secs(5));
        let reason = check.probe().await.unwrap_err();
        assert!(reason.starts_with("false --version exited with"), "got {reason}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_runtime_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-runtime");
        std::fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        let runtime = script.display().to_string();

        let check = CommandRuntimeProbe::new(runtime.clone(), "true", Duration::from_secs(1));
        let started = std::time::Instant::now();
        let reason = check.probe().await.unwrap_err();

        assert_eq!(reason, format!("{runtime} --version timed out after 1s"));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn from_config_uses_configured_timeout() {
        let probe = CommandRuntimeProbe::from_config(&ToolConfig::default());
        assert_eq!(probe.runtime, "node");
        assert_eq!(probe.launcher, "npx");
        assert_eq!(probe.timeout, Duration::from_secs(5));
    }
}
