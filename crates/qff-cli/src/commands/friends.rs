//! Friends command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use super::common::{directory, load_config};

/// Execute the friends command.
pub fn execute(config_path: Option<&Path>, limit: Option<usize>, seed: Option<u64>) -> Result<()> {
    let config = load_config(config_path)?;
    let directory = directory(seed.or(config.search.seed));
    let limit = limit.unwrap_or(directory.len());

    for friend in directory.iter().take(limit) {
        println!(
            "{:<12} {}  {}",
            style(&friend.name).cyan(),
            friend.phone,
            style(friend.index.to_bitstring()).dim()
        );
    }

    Ok(())
}
