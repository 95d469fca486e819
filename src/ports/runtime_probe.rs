//! Runtime Probe Port - Checks whether the external tool can be launched at all.

use async_trait::async_trait;

/// Port for checking the prerequisites of the external chart tool.
///
/// Implementations must be idempotent and cheap enough to run once at
/// startup and, at most, once more on a racing first request.
#[async_trait]
pub trait RuntimeProbe: Send + Sync {
    /// Returns `Ok(())` when the tool's runtime and launcher are present,
    /// otherwise a human readable reason.
    async fn probe(&self) -> Result<(), String>;
}
