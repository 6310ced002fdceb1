//! Command implementations for the refman CLI
//!
//! Each command lives in its own submodule and exposes an `execute`
//! function taking its parsed arguments and the loaded configuration.

mod build;
mod check;
mod config;
mod highlight;
mod search;
mod toc;

pub use build::execute as build;
pub use check::execute as check;
pub use config::{ConfigCommand, run as config};
pub use highlight::execute as highlight;
pub use search::execute as search;
pub use toc::execute as show_toc;

use anyhow::{Context, Result};
use refman_core::{Config, Manual};

use crate::cli::SourceArgs;
use crate::utils::files::read_document;

/// Read both source documents and assemble the manual.
fn load_manual(sources: &SourceArgs, config: &Config) -> Result<Manual> {
    let reference = read_document(&sources.reference)?;
    let category = read_document(&sources.category)?;
    Manual::build(&reference, &category, config).context("Failed to build manual")
}
