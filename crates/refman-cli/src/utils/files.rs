//! Reading command inputs and writing rendered output.

use anyhow::{Context, Result};
use refman_core::read_source;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read a source document, naming the file in the error.
pub fn read_document(path: &Path) -> Result<String> {
    read_source(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read `path`, or all of stdin when no path is given.
pub fn read_file_or_stdin(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_document(path),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        },
    }
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_file_or_stdout(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!(path = %path.display(), bytes = content.len(), "wrote output");
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        },
    }
    Ok(())
}
