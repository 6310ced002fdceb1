//! Configuration lookup for CLI commands.

use anyhow::{Context, Result};
use refman_core::Config;
use std::path::Path;

/// Load the configuration named by `--config` (or `REFMAN_CONFIG`), falling
/// back to the platform config directory.
///
/// An explicit path must exist; the platform default may be absent.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load_default().context("Failed to load default config"),
    }
}
