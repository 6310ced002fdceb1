//! Live filtering and match highlighting over the search index.
//!
//! Filtering and highlighting deliberately disagree on what a hit is:
//! [`matches`] treats the query as a bag of whitespace-separated terms that
//! may occur anywhere in title or description, whereas [`highlight_spans`]
//! only marks occurrences of the whole trimmed query. A query such as
//! `out pri` therefore keeps `PRINT` visible without marking anything in it.

use crate::inline::escape_html;
use crate::types::{Category, Section};
use serde::{Deserialize, Serialize};

/// Anything that can appear in the search index.
pub trait Searchable {
    /// Anchor identifier the item links to.
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn short_description(&self) -> &str;
}

impl Searchable for Section {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn short_description(&self) -> &str {
        &self.short_description
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn short_description(&self) -> &str {
        (**self).short_description()
    }
}

/// True when every whitespace-separated term of `query` occurs, ignoring
/// case, in the item's title or short description.
///
/// An empty or whitespace-only query matches everything.
///
/// ```rust
/// use refman_core::{matches, Section};
///
/// let print = Section {
///     id: "kw-print".into(),
///     title: "PRINT".into(),
///     level: 2,
///     start_offset: 0,
///     short_description: "writes output".into(),
/// };
/// assert!(matches(&print, "out pri"));
/// assert!(!matches(&print, "input"));
/// ```
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    let haystack = format!("{} {}", item.title(), item.short_description()).to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .all(|term| haystack.contains(term))
}

/// Lowercase `text`, recording for each byte of the result the byte range of
/// the source character it came from. Lowercasing may change byte lengths
/// (and character counts), so lowered offsets cannot be reused directly.
fn lower_with_origins(text: &str) -> (String, Vec<(usize, usize)>) {
    let mut lowered = String::with_capacity(text.len());
    let mut origins = Vec::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        let end = start + ch.len_utf8();
        for lower in ch.to_lowercase() {
            lowered.push(lower);
            origins.extend(std::iter::repeat_n((start, end), lower.len_utf8()));
        }
    }
    (lowered, origins)
}

/// Escape `text` and wrap every case-insensitive occurrence of the trimmed
/// query in `<mark>`. Occurrences are found left to right and never overlap.
///
/// ```rust
/// use refman_core::highlight_spans;
///
/// assert_eq!(
///     highlight_spans("Print <x>", "pri"),
///     "<mark>Pri</mark>nt &lt;x&gt;"
/// );
/// assert_eq!(highlight_spans("writes output", "out pri"), "writes output");
/// ```
#[must_use]
pub fn highlight_spans(text: &str, query: &str) -> String {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return escape_html(text);
    }

    let (lowered, origins) = lower_with_origins(text);
    let mut out = String::with_capacity(text.len() + 16);
    let mut cursor = 0;

    for (idx, found) in lowered.match_indices(&needle) {
        let start = origins[idx].0;
        let end = origins[idx + found.len() - 1].1;
        // A hit that begins inside an already marked character is skipped.
        if start < cursor {
            continue;
        }
        out.push_str(&escape_html(&text[cursor..start]));
        out.push_str("<mark>");
        out.push_str(&escape_html(&text[start..end]));
        out.push_str("</mark>");
        cursor = end;
    }

    out.push_str(&escape_html(&text[cursor..]));
    out
}

/// Visibility and rendered markup of one indexed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: String,
    pub visible: bool,
    /// Highlighted title; `None` for hidden items.
    pub title_markup: Option<String>,
    /// Highlighted short description; `None` for hidden items.
    pub description_markup: Option<String>,
}

/// Visibility of one category group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: String,
    pub hidden: bool,
    pub open: bool,
}

/// Result of filtering the index with one query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterView {
    pub query: String,
    pub items: Vec<ItemView>,
    pub categories: Vec<CategoryView>,
}

impl FilterView {
    pub fn visible_items(&self) -> impl Iterator<Item = &ItemView> {
        self.items.iter().filter(|item| item.visible)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_items().count()
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ItemView> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&CategoryView> {
        self.categories.iter().find(|category| category.id == id)
    }
}

/// Compute which items and categories a query leaves visible.
///
/// With an empty query everything is visible and no category is forced
/// open. With an active query a category is hidden when none of its
/// keywords match, and opened otherwise.
pub fn apply_filter<T: Searchable>(items: &[T], categories: &[Category], query: &str) -> FilterView {
    let active = !query.trim().is_empty();

    let items = items
        .iter()
        .map(|item| {
            let visible = matches(item, query);
            ItemView {
                id: item.id().to_string(),
                visible,
                title_markup: visible.then(|| highlight_spans(item.title(), query)),
                description_markup: visible
                    .then(|| highlight_spans(item.short_description(), query)),
            }
        })
        .collect();

    let categories = categories
        .iter()
        .map(|category| {
            let any_visible = category.keywords.iter().any(|kw| matches(kw, query));
            CategoryView {
                id: category.id.clone(),
                hidden: active && !any_visible,
                open: active && any_visible,
            }
        })
        .collect();

    FilterView {
        query: query.to_string(),
        items,
        categories,
    }
}
