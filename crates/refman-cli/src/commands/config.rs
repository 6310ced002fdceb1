use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::Colorize;
use refman_core::Config;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file location
    Path,
}

/// Resolve the file `--config` names, or the platform default.
fn target_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::default_path().context("Failed to locate config directory"),
    }
}

pub fn run(command: &ConfigCommand, explicit: Option<&Path>) -> Result<()> {
    let path = target_path(explicit)?;
    match command {
        ConfigCommand::Init { force } => init(&path, *force),
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        },
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default()
        .save(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}
