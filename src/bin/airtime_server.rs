//! `airtime-server`: serves the brain-dump analysis API.
//!
//! Configuration is read from `$AIRTIME_CONFIG` or `airtime/config.toml`
//! under the platform config directory (defaults when absent). The provider
//! API key is resolved once here; a missing key is logged and every analysis
//! then uses the fallback result.

use std::sync::Arc;

use airtime::config::ServiceConfig;
use airtime::llm::{OpenRouterConfig, OpenRouterProvider};
use airtime::{AnalysisServer, BrainDumpService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::load()?;

    let api_key = match config.llm.api_key.resolve() {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(error = %e, "no provider API key; all analyses will use the fallback");
            None
        }
    };

    let provider =
        OpenRouterProvider::new(OpenRouterConfig::from_llm_config(&config.llm, api_key))?;
    tracing::info!(model = %config.llm.model, "provider ready");

    let service = BrainDumpService::new(Arc::new(provider));
    let server = AnalysisServer::start(service, &config.server).await?;
    tracing::info!(port = server.port(), "airtime-server started");

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    tracing::info!("airtime-server shut down cleanly");
    Ok(())
}
