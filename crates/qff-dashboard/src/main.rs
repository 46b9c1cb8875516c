//! Quantum Friend Finder dashboard binary entry point.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use qff_dashboard::{AppState, serve};
use qff_finder::FinderConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("QFF_CONFIG").ok().map(PathBuf::from);
    let config = FinderConfig::load(config_path.as_deref())?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("qff_dashboard={0},qff_finder={0},tower_http=info", config.logging.level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let addr = config.bind_address()?;
    let state = Arc::new(AppState::new(config));
    tracing::info!("Search backend: {}", state.driver.backend_name());

    serve(state, addr).await?;
    Ok(())
}
