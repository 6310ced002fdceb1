use anyhow::Result;
use refman_core::Config;

use super::load_manual;
use crate::cli::BuildArgs;
use crate::utils::files::write_file_or_stdout;

/// Render the manual page, and optionally the search index beside it.
pub fn execute(args: &BuildArgs, config: &Config) -> Result<()> {
    let manual = load_manual(&args.sources, config)?;

    for (source, diagnostic) in manual.diagnostics() {
        tracing::warn!(
            source = source.as_str(),
            line = diagnostic.line,
            "{}",
            diagnostic.message
        );
    }

    write_file_or_stdout(args.output.as_deref(), &manual.render_html())?;

    if let Some(index_path) = &args.index {
        write_file_or_stdout(Some(index_path), &manual.index_json()?)?;
    }

    tracing::debug!(
        sections = manual.index.len(),
        categories = manual.categories.len(),
        "built manual page"
    );
    Ok(())
}
