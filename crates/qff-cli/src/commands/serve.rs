//! Serve command implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use console::style;

use qff_dashboard::{AppState, serve};

use super::common::load_config;

/// Execute the serve command.
pub async fn execute(config_path: Option<&Path>, bind: Option<String>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(bind) = bind {
        config.dashboard.bind_address = bind;
    }
    config.validate()?;
    let addr = config.bind_address()?;

    println!(
        "{} Quantum Friend Finder dashboard at {}",
        style("→").cyan().bold(),
        style(format!("http://{addr}")).green().underlined()
    );
    println!("  Press Ctrl-C to stop");

    let state = Arc::new(AppState::new(config));
    serve(state, addr).await?;
    Ok(())
}
