use anyhow::{Context, Result};
use colored::Colorize;
use refman_core::{Config, compile};

use crate::cli::TocArgs;
use crate::output::OutputFormat;
use crate::utils::files::read_document;

/// Print the heading outline of one document with its anchor ids.
pub fn execute(args: &TocArgs, config: &Config) -> Result<()> {
    let source = read_document(&args.file)?;
    let options = if args.category {
        config.compile.category_options()
    } else {
        config.compile.reference_options()
    };
    let doc = compile(&source, &options);

    match args.format.resolve() {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&doc.headings)
                    .context("Failed to serialize table of contents to JSON")?
            );
        },
        OutputFormat::Text => {
            for heading in &doc.headings {
                let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
                println!(
                    "{indent}{} {}",
                    heading.text,
                    format!("#{}", heading.id).bright_black()
                );
            }
        },
    }
    Ok(())
}
