//! Anchor identifiers derived from heading text.
//!
//! [`slug`] is deterministic and pure. It never deduplicates: two headings
//! that normalize to the same text share an identifier, and
//! [`CompiledDocument::duplicate_ids`](crate::CompiledDocument::duplicate_ids)
//! is the hook for callers that want to detect that.

/// Characters dropped outright before separators are introduced.
const DELETED: &[char] = &[
    '.', '$', '%', '`', '\'', '"', '(', ')', '[', ']', '{', '}', ':', ';', '+', '*', ',', '!',
    '?',
];

/// Normalize heading text into a markup-safe anchor identifier.
///
/// - Lowercases and drops a leading run of `#` (`#CGI` becomes `cgi`)
/// - Deletes common punctuation, turns whitespace runs into a single `-`
/// - Maps anything outside `[a-z0-9_-]` to `-`, collapses and trims hyphens
///
/// Underscores survive untouched. An empty result is possible (for example
/// when the text is only punctuation); callers substitute a positional id.
///
/// ```rust
/// use refman_core::slug;
///
/// assert_eq!(slug("#CGI"), "cgi");
/// assert_eq!(slug("LEN$ (string)"), "len-string");
/// assert_eq!(slug("MY_VAR"), "my_var");
/// assert_eq!(slug("?!"), "");
/// ```
#[must_use]
pub fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let body = lowered.trim_start_matches('#');

    let mut out = String::with_capacity(body.len());
    let mut pending_hyphen = false;

    for ch in body.chars() {
        if DELETED.contains(&ch) {
            continue;
        }
        let mapped = if ch.is_whitespace() {
            '-'
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-' {
            ch
        } else {
            '-'
        };

        if mapped == '-' {
            pending_hyphen = true;
            continue;
        }
        if pending_hyphen && !out.is_empty() {
            out.push('-');
        }
        pending_hyphen = false;
        out.push(mapped);
    }

    out
}
