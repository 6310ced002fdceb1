//! Assembly of the complete manual page from its two source documents.
//!
//! The alphabetical reference is compiled with `kw-` anchors at level 2 and
//! supplies the highlighter's keyword vocabulary. The by-category document
//! is compiled in category mode, so its level-2 headings become `cat-`
//! anchored groups and its level-3 headings the keywords inside them.

use crate::category::group_categories;
use crate::compiler::{CompiledDocument, compile};
use crate::config::{Config, ManualConfig};
use crate::highlight::Highlighter;
use crate::inline::{escape_html, format_inline};
use crate::search::{FilterView, apply_filter};
use crate::types::{Category, Diagnostic, Section};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Which source document a finding or section came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Reference,
    Category,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Category => "category",
        }
    }
}

/// A compiled, highlighted and indexed manual.
#[derive(Debug, Clone)]
pub struct Manual {
    pub overview: ManualConfig,
    pub reference: CompiledDocument,
    pub category: CompiledDocument,
    pub categories: Vec<Category>,
    /// Highlighter vocabulary, longest first.
    pub keywords: Vec<String>,
    /// Level-2 and level-3 sections of both documents, reference first.
    pub index: Vec<Section>,
}

/// Titles of the sections at `level`, in document order.
#[must_use]
pub fn keyword_titles(doc: &CompiledDocument, level: u8) -> Vec<String> {
    doc.sections
        .iter()
        .filter(|s| s.level == level)
        .map(|s| s.title.clone())
        .collect()
}

/// Read a manual source file, mapping a missing file to [`Error::NotFound`].
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file does not exist and [`Error::Io`]
/// for any other read failure.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
        _ => Error::Io(e),
    })
}

impl Manual {
    /// Compile both documents, highlight their code samples and build the
    /// search index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the highlighter cannot be built from the
    /// keyword set.
    pub fn build(reference_src: &str, category_src: &str, config: &Config) -> Result<Self> {
        let mut reference = compile(reference_src, &config.compile.reference_options());
        let mut category = compile(category_src, &config.compile.category_options());

        let keyword_level = config.compile.reference_section_level;
        let highlighter = Highlighter::new(
            keyword_titles(&reference, keyword_level),
            &config.highlight,
        )?;

        let language = config.highlight.language.to_lowercase();
        let mut highlighted = 0usize;
        for code in reference
            .code_blocks_mut()
            .chain(category.code_blocks_mut())
            .filter(|code| code.language == language)
        {
            code.markup = highlighter.highlight(&code.markup);
            highlighted += 1;
        }

        let categories = group_categories(&category.sections);
        let index: Vec<Section> = reference
            .sections
            .iter()
            .chain(&category.sections)
            .filter(|s| matches!(s.level, 2 | 3))
            .cloned()
            .collect();

        tracing::debug!(
            keywords = highlighter.keywords().len(),
            highlighted,
            categories = categories.len(),
            indexed = index.len(),
            "built manual"
        );

        Ok(Self {
            overview: config.manual.clone(),
            reference,
            category,
            categories,
            keywords: highlighter.keywords().to_vec(),
            index,
        })
    }

    /// Read both documents from disk and [`build`](Self::build) the manual.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read, or building fails.
    pub fn from_files(reference: &Path, category: &Path, config: &Config) -> Result<Self> {
        let reference_src = read_source(reference)?;
        let category_src = read_source(category)?;
        Self::build(&reference_src, &category_src, config)
    }

    /// Render the page body: top anchor, overview, then the alphabetical and
    /// by-category sections.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut out = String::from("<a id=\"top\"></a>");

        let _ = write!(
            out,
            "<section id=\"overview\"><h2>{}</h2>",
            escape_html(&self.overview.title)
        );
        for paragraph in &self.overview.intro {
            let _ = write!(out, "<p>{}</p>", format_inline(paragraph));
        }
        out.push_str("</section>");

        out.push_str(
            "<section id=\"alphabetical\"><h2>Alphabetical Reference<a class=\"permalink\" href=\"#alphabetical\">#</a></h2>",
        );
        out.push_str(&self.reference.to_html());
        out.push_str("</section>");

        out.push_str(
            "<section id=\"by-category\"><h2>By Category<a class=\"permalink\" href=\"#by-category\">#</a></h2>",
        );
        out.push_str(&self.category.to_html());
        out.push_str("</section>");

        out
    }

    /// Filter the search index and category groups with `query`.
    #[must_use]
    pub fn filter(&self, query: &str) -> FilterView {
        apply_filter(&self.index, &self.categories, query)
    }

    /// Diagnostics of both documents, reference first.
    pub fn diagnostics(&self) -> impl Iterator<Item = (Source, &Diagnostic)> {
        self.reference
            .diagnostics
            .iter()
            .map(|d| (Source::Reference, d))
            .chain(self.category.diagnostics.iter().map(|d| (Source::Category, d)))
    }

    /// The search index as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding fails.
    pub fn index_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.index)?)
    }
}
