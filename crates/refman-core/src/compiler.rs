//! Line-oriented compiler for the manual's markup dialect.
//!
//! A single forward pass classifies every line into exactly one
//! [`LineKind`], in a fixed priority order, and builds three outputs at once:
//! the rendered [`Block`] tree, the flat [`Heading`] list and the [`Section`]
//! index with auto-captured short descriptions.
//!
//! ## Recognized syntax
//!
//! - Fenced code: ```` ```lang ```` ... ```` ``` ```` (unterminated fences are
//!   flushed at end of input)
//! - Headings `#` through `######`
//! - Ordered (`1. item`) and unordered (`- item`, `* item`, `+ item`) lists
//! - Blockquotes (`> text`), blank lines, paragraphs
//!
//! Compilation never fails. Malformed markup renders as literal text and
//! data-quality findings end up in [`CompiledDocument::diagnostics`].
//!
//! ```rust
//! use refman_core::{compile, CompileOptions};
//!
//! let doc = compile("## PRINT\n*Type:* statement\n\nWrites output.", &CompileOptions::reference());
//! assert_eq!(doc.sections[0].id, "kw-print");
//! assert_eq!(doc.sections[0].short_description, "Writes output.");
//! ```

use crate::inline::{format_inline, plain_text};
use crate::slug::slug;
use crate::tree::{Block, CodeBlock, ListKind, render_html};
use crate::types::{Diagnostic, Heading, Section};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```\s*([a-zA-Z0-9_-]+)?\s*$").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static FENCE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```\s*$").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.*)$").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static UNORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static BLOCKQUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>\s?(.*)$").unwrap());

/// Lines that end a paragraph without being part of it.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static PARAGRAPH_STOP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:#{1,6}\s|```|\s*\d+\.|\s*[-*+]\s)").unwrap());

/// `Type:` metadata lines, optionally wrapped in emphasis markers.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static TYPE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\**\s*type\s*:").unwrap());

/// Options for a single compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Minimum heading level whose identifier gets the `kw-` prefix.
    pub section_heading_level: u8,
    /// Give level-2 headings the `cat-` prefix reserved for category pages.
    pub category_mode: bool,
}

impl CompileOptions {
    /// Options for the alphabetical reference document.
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            section_heading_level: 2,
            category_mode: false,
        }
    }

    /// Options for the by-category document.
    #[must_use]
    pub const fn category() -> Self {
        Self {
            section_heading_level: 3,
            category_mode: true,
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::reference()
    }
}

/// Everything one compilation pass produces. Owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledDocument {
    pub blocks: Vec<Block>,
    pub headings: Vec<Heading>,
    pub sections: Vec<Section>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledDocument {
    /// Serialize the rendered tree to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        render_html(&self.blocks)
    }

    /// Look up a section by anchor id. With duplicate ids the first wins.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Anchor ids carried by more than one heading, in first-seen order.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for heading in &self.headings {
            *counts.entry(heading.id.as_str()).or_default() += 1;
        }
        let mut seen = Vec::new();
        for heading in &self.headings {
            let id = heading.id.as_str();
            if counts.get(id).copied().unwrap_or(0) > 1 && !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }

    /// Mutable access to every fenced code block, in source order.
    pub fn code_blocks_mut(&mut self) -> impl Iterator<Item = &mut CodeBlock> {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Code(code) => Some(code),
            _ => None,
        })
    }
}

/// The closed set of line shapes, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    FenceOpen { language: &'a str },
    FenceLine { closes: bool },
    Heading { level: u8, text: &'a str },
    ListItem { kind: ListKind, text: &'a str },
    Blockquote { rest: &'a str },
    Blank,
    Paragraph,
}

fn classify(line: &str, in_fence: bool) -> LineKind<'_> {
    if in_fence {
        return LineKind::FenceLine {
            closes: FENCE_CLOSE_RE.is_match(line),
        };
    }
    if let Some(caps) = FENCE_OPEN_RE.captures(line) {
        return LineKind::FenceOpen {
            language: caps.get(1).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = HEADING_RE.captures(line) {
        let level = caps.get(1).map_or(1, |m| m.len());
        return LineKind::Heading {
            level: u8::try_from(level).unwrap_or(6),
            text: caps.get(2).map_or("", |m| m.as_str()).trim(),
        };
    }
    for (kind, re) in [
        (ListKind::Ordered, &ORDERED_ITEM_RE),
        (ListKind::Unordered, &UNORDERED_ITEM_RE),
    ] {
        if let Some(caps) = re.captures(line) {
            return LineKind::ListItem {
                kind,
                text: caps.get(1).map_or("", |m| m.as_str()).trim(),
            };
        }
    }
    if let Some(caps) = BLOCKQUOTE_RE.captures(line) {
        return LineKind::Blockquote {
            rest: caps.get(1).map_or("", |m| m.as_str()),
        };
    }
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    LineKind::Paragraph
}

fn is_type_line(line: &str) -> bool {
    TYPE_LINE_RE.is_match(line.trim_start())
}

/// End (exclusive) of the paragraph starting at `start`. The first line is
/// always consumed so every paragraph makes progress. A `Type:` line is a
/// paragraph of its own.
fn paragraph_end(lines: &[&str], start: usize) -> usize {
    if is_type_line(lines[start]) {
        return start + 1;
    }
    let mut end = start + 1;
    while end < lines.len() {
        let line = lines[end];
        if line.trim().is_empty() || PARAGRAPH_STOP_RE.is_match(line) || is_type_line(line) {
            break;
        }
        end += 1;
    }
    end
}

fn normalize_line_endings(source: &str) -> Cow<'_, str> {
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

struct OpenFence {
    language: String,
    lines: Vec<String>,
    opened_at: usize,
}

/// Mutable state of one pass. Lives only for the duration of [`compile`].
struct Pass<'o> {
    options: &'o CompileOptions,
    doc: CompiledDocument,
    heading_lines: Vec<usize>,
    open_list: Option<(ListKind, Vec<String>)>,
    fence: Option<OpenFence>,
    current_section: Option<usize>,
}

impl<'o> Pass<'o> {
    fn new(options: &'o CompileOptions) -> Self {
        Self {
            options,
            doc: CompiledDocument::default(),
            heading_lines: Vec::new(),
            open_list: None,
            fence: None,
            current_section: None,
        }
    }

    fn close_list(&mut self) {
        if let Some((kind, items)) = self.open_list.take() {
            self.doc.blocks.push(Block::List { kind, items });
        }
    }

    fn flush_fence(&mut self) {
        if let Some(fence) = self.fence.take() {
            let raw = fence.lines.join("\n");
            self.doc
                .blocks
                .push(Block::Code(CodeBlock::new(fence.language, raw)));
        }
    }

    fn heading_id(&self, level: u8, text: &str) -> Option<String> {
        let base = slug(text);
        if base.is_empty() {
            None
        } else if self.options.category_mode && level == 2 {
            Some(format!("cat-{base}"))
        } else if level >= self.options.section_heading_level {
            Some(format!("kw-{base}"))
        } else {
            Some(base)
        }
    }

    fn push_heading(&mut self, level: u8, text: &str, line_no: usize) {
        let ordinal = self.doc.headings.len();
        let id = self.heading_id(level, text).unwrap_or_else(|| {
            self.doc.diagnostics.push(Diagnostic::warn(
                format!("Heading '{text}' has no usable anchor text; using 'h-{ordinal}'"),
                line_no,
            ));
            format!("h-{ordinal}")
        });

        self.doc.headings.push(Heading {
            level,
            text: text.to_string(),
            id: id.clone(),
        });
        self.heading_lines.push(line_no);

        if level >= 2 {
            self.current_section = Some(self.doc.sections.len());
            self.doc.sections.push(Section {
                id: id.clone(),
                title: text.to_string(),
                level,
                start_offset: self.doc.blocks.len(),
                short_description: String::new(),
            });
        }

        self.doc.blocks.push(Block::Heading {
            level,
            id,
            text: text.to_string(),
        });
    }

    fn push_list_item(&mut self, kind: ListKind, text: &str) {
        let same_kind = matches!(&self.open_list, Some((open, _)) if *open == kind);
        if !same_kind {
            self.close_list();
            self.open_list = Some((kind, Vec::new()));
        }
        if let Some((_, items)) = self.open_list.as_mut() {
            items.push(format_inline(text));
        }
    }

    fn push_paragraph(&mut self, raw: &str) {
        let markup = format_inline(raw);
        if !is_type_line(raw) {
            if let Some(section) = self
                .current_section
                .and_then(|idx| self.doc.sections.get_mut(idx))
            {
                if section.short_description.is_empty() {
                    section.short_description = plain_text(&markup);
                }
            }
        }
        self.doc.blocks.push(Block::Paragraph { markup });
    }

    fn record_duplicates(&mut self) {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut found = Vec::new();
        for (heading, &line) in self.doc.headings.iter().zip(&self.heading_lines) {
            if let Some(&first) = first_seen.get(heading.id.as_str()) {
                found.push(Diagnostic::warn(
                    format!(
                        "Duplicate anchor id '{}' (first used on line {first})",
                        heading.id
                    ),
                    line,
                ));
            } else {
                first_seen.insert(heading.id.as_str(), line);
            }
        }
        self.doc.diagnostics.extend(found);
    }

    fn finish(mut self) -> CompiledDocument {
        self.close_list();
        if let Some(fence) = &self.fence {
            tracing::warn!(
                line = fence.opened_at,
                "code fence opened on line {} is never closed",
                fence.opened_at
            );
            self.doc.diagnostics.push(Diagnostic::warn(
                "Unterminated code fence; flushed at end of input",
                fence.opened_at,
            ));
        }
        self.flush_fence();
        self.record_duplicates();

        tracing::debug!(
            blocks = self.doc.blocks.len(),
            headings = self.doc.headings.len(),
            sections = self.doc.sections.len(),
            diagnostics = self.doc.diagnostics.len(),
            "compiled document"
        );
        self.doc
    }
}

/// Compile manual source text into a rendered tree, heading list and
/// section index.
#[must_use]
pub fn compile(source: &str, options: &CompileOptions) -> CompiledDocument {
    let normalized = normalize_line_endings(source);
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut pass = Pass::new(options);

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let line_no = i + 1;
        let kind = classify(line, pass.fence.is_some());

        if !matches!(
            kind,
            LineKind::ListItem { .. } | LineKind::FenceLine { .. }
        ) {
            pass.close_list();
        }

        match kind {
            LineKind::FenceOpen { language } => {
                pass.fence = Some(OpenFence {
                    language: language.to_lowercase(),
                    lines: Vec::new(),
                    opened_at: line_no,
                });
            },
            LineKind::FenceLine { closes: true } => pass.flush_fence(),
            LineKind::FenceLine { closes: false } => {
                if let Some(fence) = pass.fence.as_mut() {
                    fence.lines.push(line.to_string());
                }
            },
            LineKind::Heading { level, text } => pass.push_heading(level, text, line_no),
            LineKind::ListItem { kind, text } => pass.push_list_item(kind, text),
            LineKind::Blockquote { rest } => {
                pass.doc.blocks.push(Block::Blockquote {
                    markup: format_inline(rest),
                });
            },
            LineKind::Blank => pass.doc.blocks.push(Block::Blank),
            LineKind::Paragraph => {
                let end = paragraph_end(&lines, i);
                let raw = lines[i..end].join("\n");
                pass.push_paragraph(raw.trim());
                i = end;
                continue;
            },
        }
        i += 1;
    }

    pass.finish()
}
