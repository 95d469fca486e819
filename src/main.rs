//! Bazi Chart HTTP Server
//!
//! Serves the chart page and `POST /api/bazi`.
//!
//! # Environment Variables
//!
//! - `PORT`: Server port (default: 5000)
//! - `BAZI_CHART__SERVER__HOST`: Bind host (default: 127.0.0.1)
//! - `BAZI_CHART__TOOL__ENABLED`: Set to `false` to always calculate locally
//! - `RUST_LOG`: Log filter (default: `server.log_level`)

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bazi_chart::adapters::http::{app_router, BaziAppState};
use bazi_chart::adapters::mcp::{CommandRuntimeProbe, StdioToolConnector};
use bazi_chart::application::handlers::chart::{AvailabilityCache, CalculateChartHandler};
use bazi_chart::config::AppConfig;
use bazi_chart::domain::bazi::ApproximateCalculator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let probe = Arc::new(CommandRuntimeProbe::from_config(&config.tool));
    let availability = if config.tool.enabled {
        let cache = Arc::new(AvailabilityCache::new());
        cache.ensure_checked(probe.as_ref()).await;
        cache
    } else {
        tracing::info!("Chart tool disabled; using local calculation only");
        Arc::new(AvailabilityCache::disabled())
    };

    let handler = CalculateChartHandler::new(
        Arc::new(StdioToolConnector::from_config(&config.tool)),
        probe,
        availability,
        Arc::new(ApproximateCalculator::new()),
    )
    .with_default_tool(config.tool.default_tool.clone());

    let app = app_router(BaziAppState::new(Arc::new(handler)), &config.server);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        static_dir = %config.server.static_dir.display(),
        "Server listening on http://{}",
        address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON lines in production, human-readable output otherwise.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
