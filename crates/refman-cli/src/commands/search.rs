use anyhow::{Context, Result};
use colored::Colorize;
use refman_core::{Config, FilterView};

use super::load_manual;
use crate::cli::SearchArgs;
use crate::output::{OutputFormat, render_marks};

/// Filter the index with the joined query terms and print what stays visible.
pub fn execute(args: &SearchArgs, config: &Config) -> Result<()> {
    let manual = load_manual(&args.sources, config)?;
    let query = args.query.join(" ");
    let view = manual.filter(&query);

    match args.format.resolve() {
        OutputFormat::Json => {
            let visible = FilterView {
                query: view.query.clone(),
                items: view.visible_items().cloned().collect(),
                categories: view.categories.clone(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&visible)
                    .context("Failed to serialize search results to JSON")?
            );
        },
        OutputFormat::Text => {
            let total = view.items.len();
            let shown = view.visible_count();
            if shown == 0 {
                println!("No entries match '{query}'");
                return Ok(());
            }

            for item in view.visible_items() {
                let title = item.title_markup.as_deref().unwrap_or_default();
                println!("{}  {}", render_marks(title), format!("#{}", item.id).bright_black());
                if let Some(description) = item
                    .description_markup
                    .as_deref()
                    .filter(|d| !d.is_empty())
                {
                    println!("    {}", render_marks(description));
                }
            }

            let open: Vec<&str> = manual
                .categories
                .iter()
                .zip(&view.categories)
                .filter(|(_, state)| state.open)
                .map(|(category, _)| category.title.as_str())
                .collect();
            println!();
            println!("{shown} of {total} entries");
            if !open.is_empty() {
                println!("Categories: {}", open.join(", "));
            }
        },
    }
    Ok(())
}
