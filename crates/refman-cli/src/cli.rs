//! # CLI Structure and Argument Parsing
//!
//! `refman` builds and inspects the Basil reference manual from its two
//! source documents: the alphabetical reference and the by-category index.
//!
//! ```bash
//! # Render the page
//! refman build -r reference.md -c categories.md -o manual.html
//!
//! # Try a search the way the page filters it
//! refman search "out pri" -r reference.md -c categories.md
//!
//! # Lint both documents
//! refman check -r reference.md -c categories.md
//! ```
//!
//! Global flags (`--verbose`, `--quiet`, `--no-color`, `--config`) apply to
//! every command.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::ConfigCommand;
use crate::output::FormatArg;

#[derive(Parser, Clone, Debug)]
#[command(name = "refman")]
#[command(version)]
#[command(about = "refman - Build and search the Basil language reference", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs on stderr
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honours `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "REFMAN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// The two source documents every manual-wide command needs.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Alphabetical reference document
    #[arg(short = 'r', long, value_name = "FILE")]
    pub reference: PathBuf,

    /// By-category document
    #[arg(short = 'c', long, value_name = "FILE")]
    pub category: PathBuf,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Render the complete manual page
    Build(BuildArgs),

    /// Filter the search index the way the page does
    Search(SearchArgs),

    /// List the headings of one document with their anchors
    Toc(TocArgs),

    /// Report data-quality problems in both documents
    Check(CheckArgs),

    /// Highlight a Basil snippet using the reference's keywords
    Highlight(HighlightArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Clone, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Write the page here instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write the search index as JSON
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Search terms; every term must match
    #[arg(value_name = "QUERY", num_args = 0..)]
    pub query: Vec<String>,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub format: FormatArg,
}

#[derive(Args, Clone, Debug)]
pub struct TocArgs {
    /// Document to list
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: PathBuf,

    /// Compile the document as a by-category index
    #[arg(long)]
    pub category: bool,

    #[command(flatten)]
    pub format: FormatArg,
}

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Fail on warnings as well as errors
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub format: FormatArg,
}

#[derive(Args, Clone, Debug)]
pub struct HighlightArgs {
    /// Reference document supplying the keyword set
    #[arg(short = 'r', long, value_name = "FILE")]
    pub reference: PathBuf,

    /// Snippet to highlight (reads stdin when omitted)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl Commands {
    /// Output format the command will print in, if it has one.
    pub fn format(&self) -> Option<crate::output::OutputFormat> {
        match self {
            Self::Search(args) => Some(args.format.resolve()),
            Self::Toc(args) => Some(args.format.resolve()),
            Self::Check(args) => Some(args.format.resolve()),
            Self::Build(_) | Self::Highlight(_) | Self::Config(_) => None,
        }
    }
}
