//! Output format selection and terminal rendering helpers.

use clap::{Args, ValueEnum};
use colored::Colorize;
use is_terminal::IsTerminal;
use refman_core::plain_text;
use serde::{Deserialize, Serialize};

/// Output format for CLI results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable formatted text (default for terminals).
    #[default]
    Text,
    /// JSON format for machine consumption (default for pipes).
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Returns `Text` for interactive terminals, `Json` for pipes/redirects.
    #[must_use]
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (text, json). Defaults to text for terminals, json for pipes.
    #[arg(long = "format", value_enum, env = "REFMAN_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Output as JSON (shorthand for --format json).
    #[arg(long, conflicts_with = "format")]
    pub json: bool,
}

impl FormatArg {
    /// Priority: `--json`, then `--format`, then terminal detection.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        if self.json {
            return OutputFormat::Json;
        }
        self.format.unwrap_or_else(OutputFormat::detect)
    }
}

/// Turn `<mark>`-annotated markup into terminal text, painting the marked
/// runs. All other tags are dropped and entities decoded.
pub fn render_marks(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(open) = rest.find("<mark>") {
        out.push_str(&plain_text(&rest[..open]));
        let after_open = &rest[open + "<mark>".len()..];
        let (marked, tail) = after_open
            .find("</mark>")
            .map_or((after_open, ""), |close| {
                (&after_open[..close], &after_open[close + "</mark>".len()..])
            });
        out.push_str(&plain_text(marked).yellow().bold().to_string());
        rest = tail;
    }

    out.push_str(&plain_text(rest));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_is_machine_readable() {
        assert!(OutputFormat::Json.is_machine_readable());
        assert!(!OutputFormat::Text.is_machine_readable());
    }

    #[test]
    fn test_json_flag_wins() {
        let arg = FormatArg {
            format: Some(OutputFormat::Text),
            json: true,
        };
        assert_eq!(arg.resolve(), OutputFormat::Json);
    }

    #[test]
    fn test_explicit_format() {
        let arg = FormatArg {
            format: Some(OutputFormat::Text),
            json: false,
        };
        assert_eq!(arg.resolve(), OutputFormat::Text);
    }

    #[test]
    fn test_render_marks_plain() {
        colored::control::set_override(false);
        assert_eq!(
            render_marks("<mark>PRI</mark>NT &lt;x&gt;"),
            "PRINT <x>"
        );
        assert_eq!(render_marks("no marks &amp; more"), "no marks & more");
    }

    #[test]
    fn test_render_marks_unclosed() {
        colored::control::set_override(false);
        assert_eq!(render_marks("a <mark>b"), "a b");
    }
}
