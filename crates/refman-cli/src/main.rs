//! refman CLI - build and search the Basil language reference
//!
//! This is the main entry point for the refman command-line interface.
//! Each command lives in its own module under [`commands`].

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::logging::initialize_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let explicit = cli.config.as_deref();
    let config = || utils::settings::load(explicit);

    match &cli.command {
        Commands::Build(args) => commands::build(args, &config()?),
        Commands::Search(args) => commands::search(args, &config()?),
        Commands::Toc(args) => commands::show_toc(args, &config()?),
        Commands::Check(args) => commands::check(args, &config()?),
        Commands::Highlight(args) => commands::highlight(args, &config()?),
        // Writing the file must not require reading it first.
        Commands::Config(command) => commands::config(command, explicit),
    }
}
