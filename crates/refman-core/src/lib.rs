//! # refman-core
//!
//! Core functionality for refman, the builder behind the Basil language
//! reference manual.
//!
//! The manual is written as two plain-text documents in a small Markdown
//! dialect: an alphabetical reference and a by-category index. This crate
//! turns them into a single browsable page with stable anchors, a search
//! index and highlighted code samples.
//!
//! ## Architecture
//!
//! - **Slugs**: deterministic anchor identifiers from heading text
//! - **Inline formatting**: emphasis, code spans and links inside a line
//! - **Compiler**: one forward pass producing blocks, headings and sections
//! - **Search**: multi-term filtering and match highlighting
//! - **Highlighter**: keyword-driven token tagging for Basil samples
//! - **Manual**: the two documents assembled into one page
//!
//! ## Quick Start
//!
//! ```rust
//! use refman_core::{Config, Manual, Result};
//!
//! let reference = "## PRINT\nWrites output.\n\n```basil\nPRINT 1\n```\n";
//! let category = "## Output\n### PRINT\nWrites output.\n";
//!
//! let manual = Manual::build(reference, category, &Config::default())?;
//! assert_eq!(manual.categories[0].id, "cat-output");
//! assert!(manual.render_html().contains("<span class=\"tok-kw\">PRINT</span>"));
//!
//! let view = manual.filter("write");
//! assert_eq!(view.visible_count(), 2);
//! # Ok::<(), refman_core::Error>(())
//! ```

/// Grouping of category sections
pub mod category;
/// Block compiler for the manual's markup dialect
pub mod compiler;
/// TOML configuration
pub mod config;
/// Error types and result aliases
pub mod error;
/// Keyword highlighter for code samples
pub mod highlight;
/// Inline formatting and HTML helpers
pub mod inline;
/// Whole-page assembly
pub mod manual;
/// Filtering and match highlighting
pub mod search;
/// Anchor identifier normalization
pub mod slug;
/// Rendered block tree
pub mod tree;
/// Core data types
pub mod types;

pub use category::group_categories;
pub use compiler::{CompileOptions, CompiledDocument, compile};
pub use config::{CompileConfig, Config, HighlightConfig, ManualConfig};
pub use error::{Error, Result};
pub use highlight::Highlighter;
pub use inline::{escape_html, format_inline, plain_text, strip_tags};
pub use manual::{Manual, Source, keyword_titles, read_source};
pub use search::{
    CategoryView, FilterView, ItemView, Searchable, apply_filter, highlight_spans, matches,
};
pub use slug::slug;
pub use tree::{Block, CodeBlock, ListKind, render_html};
pub use types::{Category, Diagnostic, DiagnosticSeverity, Heading, Section};
