use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use envdash::api::AppState;
use envdash::config::LoggingConfig;
use envdash::{DashboardConfig, DataGovClient, Normalizer, web};

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("envdash={},tower_http=info", logging.level)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    tracing::info!(
        "EnvDash {} using {} (timeout {}s)",
        envdash::VERSION,
        config.api.base_url,
        config.api.timeout_seconds
    );

    let client = DataGovClient::new(&config.api)?;
    let state = AppState {
        normalizer: Normalizer::new(Arc::new(client)),
    };

    web::run(&config.server, state).await
}
