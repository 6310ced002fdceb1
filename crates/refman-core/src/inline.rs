//! Inline formatting for a single line or paragraph of manual text.
//!
//! Order is fixed: escape, bold, italic, code spans, links. Bold runs before
//! italic so `**x**` is never half-consumed by the single-star pattern.
//! Anything that does not match passes through literally.

use html_escape::{decode_html_entities, encode_text};
use regex::Regex;
use std::sync::LazyLock;

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Escape the three markup-sensitive characters `&`, `<` and `>`.
///
/// Quotes are left alone; every attribute value this crate emits is either
/// an identifier from [`slug`](crate::slug) or a link target taken verbatim
/// from the source.
#[must_use]
pub fn escape_html(text: &str) -> String {
    encode_text(text).into_owned()
}

/// Convert emphasis, inline code and links into tagged, escaped text.
///
/// ```rust
/// use refman_core::format_inline;
///
/// assert_eq!(
///     format_inline("**PRINT** writes `x < 1` to [out](#kw-out)"),
///     "<strong>PRINT</strong> writes <code>x &lt; 1</code> to <a href=\"#kw-out\">out</a>"
/// );
/// assert_eq!(format_inline("2 * 3"), "2 * 3");
/// ```
#[must_use]
pub fn format_inline(line: &str) -> String {
    let escaped = escape_html(line);
    let bold = BOLD_RE.replace_all(&escaped, "<strong>${1}</strong>");
    let italic = ITALIC_RE.replace_all(&bold, "<em>${1}</em>");
    let code = CODE_RE.replace_all(&italic, "<code>${1}</code>");
    LINK_RE
        .replace_all(&code, "<a href=\"${2}\">${1}</a>")
        .into_owned()
}

/// Remove every `<...>` run, leaving entity references untouched.
#[must_use]
pub fn strip_tags(markup: &str) -> String {
    let bytes = markup.as_bytes();
    let mut out = String::with_capacity(markup.len());
    let mut pos = 0;

    while let Some(open) = memchr::memchr(b'<', &bytes[pos..]).map(|i| i + pos) {
        // A tag needs at least one character before its closing `>`.
        let Some(close) = memchr::memchr(b'>', &bytes[open + 1..]).map(|i| i + open + 1) else {
            break;
        };
        if close == open + 1 {
            out.push_str(&markup[pos..=close]);
            pos = close + 1;
            continue;
        }
        out.push_str(&markup[pos..open]);
        pos = close + 1;
    }
    out.push_str(&markup[pos..]);
    out
}

/// Plain-text form of inline markup: tags stripped, entities decoded.
#[must_use]
pub fn plain_text(markup: &str) -> String {
    decode_html_entities(&strip_tags(markup)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_only_markup_characters() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_html("\"quoted\" 'single'"), "\"quoted\" 'single'");
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(format_inline("**x**"), "<strong>x</strong>");
        assert_eq!(
            format_inline("**bold** and *it*"),
            "<strong>bold</strong> and <em>it</em>"
        );
    }

    #[test]
    fn test_unmatched_star_is_literal() {
        assert_eq!(format_inline("a * b"), "a * b");
        assert_eq!(format_inline("*open only"), "*open only");
    }

    #[test]
    fn test_code_span_content_is_escaped() {
        assert_eq!(format_inline("`a<b`"), "<code>a&lt;b</code>");
        assert_eq!(format_inline("`unterminated"), "`unterminated");
    }

    #[test]
    fn test_emphasis_runs_before_code_spans() {
        // Stars inside a code span are still seen by the emphasis passes.
        assert_eq!(format_inline("`*x*`"), "<code><em>x</em></code>");
    }

    #[test]
    fn test_links() {
        assert_eq!(
            format_inline("see [PRINT](#kw-print)."),
            "see <a href=\"#kw-print\">PRINT</a>."
        );
        assert_eq!(format_inline("[no target]"), "[no target]");
        assert_eq!(format_inline("[](empty)"), "[](empty)");
    }

    #[test]
    fn test_type_line_formatting() {
        assert_eq!(
            format_inline("*Type:* statement"),
            "<em>Type:</em> statement"
        );
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<em>Type:</em> x"), "Type: x");
        assert_eq!(strip_tags("a &lt; b"), "a &lt; b");
        assert_eq!(strip_tags("dangling <tag"), "dangling <tag");
        assert_eq!(strip_tags("empty <> stays"), "empty <> stays");
    }

    #[test]
    fn test_plain_text_decodes_entities() {
        assert_eq!(
            plain_text(&format_inline("Compare `a < b` & **more**")),
            "Compare a < b & more"
        );
    }
}
