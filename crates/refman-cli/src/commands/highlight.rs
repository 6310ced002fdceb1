use anyhow::{Context, Result};
use refman_core::{Config, Highlighter, compile, escape_html, keyword_titles};

use crate::cli::HighlightArgs;
use crate::utils::files::{read_document, read_file_or_stdin, write_file_or_stdout};

/// Highlight a snippet with the keyword set of the reference document.
pub fn execute(args: &HighlightArgs, config: &Config) -> Result<()> {
    let reference = read_document(&args.reference)?;
    let doc = compile(&reference, &config.compile.reference_options());
    let keywords = keyword_titles(&doc, config.compile.reference_section_level);

    let highlighter =
        Highlighter::new(keywords, &config.highlight).context("Failed to build highlighter")?;
    tracing::debug!(keywords = highlighter.keywords().len(), "loaded keywords");

    let code = read_file_or_stdin(args.file.as_deref())?;
    let markup = highlighter.highlight(&escape_html(code.trim_end_matches('\n')));
    write_file_or_stdout(None, &markup)
}
