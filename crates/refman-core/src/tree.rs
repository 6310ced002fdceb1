//! Rendered block tree and its HTML serialization.

use crate::inline::escape_html;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    const fn tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

/// A fenced code sample.
///
/// `raw` keeps the buffered lines verbatim for copy actions; `markup` starts
/// out as the escaped text and may later be replaced by a
/// [`Highlighter`](crate::Highlighter) pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: String,
    pub raw: String,
    pub markup: String,
}

impl CodeBlock {
    pub(crate) fn new(language: String, raw: String) -> Self {
        let markup = escape_html(&raw);
        Self {
            language,
            raw,
            markup,
        }
    }
}

/// One node of the rendered tree. Text-bearing variants hold inline markup
/// that has already been escaped and tagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, id: String, text: String },
    Code(CodeBlock),
    List { kind: ListKind, items: Vec<String> },
    Blockquote { markup: String },
    Blank,
    Paragraph { markup: String },
}

impl Block {
    /// Append this block's HTML to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Heading { level, id, text } => {
                let _ = write!(
                    out,
                    "<h{level} id=\"{id}\">{}<a class=\"permalink\" href=\"#{id}\" aria-label=\"Permalink\">#</a></h{level}>",
                    escape_html(text)
                );
            },
            Self::Code(code) => {
                let _ = write!(
                    out,
                    "<pre class=\"language-{}\"><button class=\"copy-btn\" title=\"Copy\">Copy</button><code>{}</code></pre>",
                    code.language, code.markup
                );
            },
            Self::List { kind, items } => {
                let tag = kind.tag();
                out.push('<');
                out.push_str(tag);
                out.push('>');
                for item in items {
                    out.push_str("<li>");
                    out.push_str(item);
                    out.push_str("</li>");
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            },
            Self::Blockquote { markup } => {
                out.push_str("<blockquote>");
                out.push_str(markup);
                out.push_str("</blockquote>");
            },
            Self::Blank => out.push('\n'),
            Self::Paragraph { markup } => {
                out.push_str("<p>");
                out.push_str(markup);
                out.push_str("</p>");
            },
        }
    }
}

/// Serialize a block list to a single HTML fragment.
#[must_use]
pub fn render_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        block.write_html(&mut out);
    }
    out
}
