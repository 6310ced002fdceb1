//! Best-effort token highlighter for Basil code samples.
//!
//! The keyword vocabulary is not hard-coded: it comes from the titles of the
//! compiled reference sections, so adding a `## KEYWORD` entry to the manual
//! is enough to have it highlighted in every sample.
//!
//! Input is the *escaped* code markup of a [`CodeBlock`](crate::CodeBlock).
//! Four passes run in order, each over the previous pass's output:
//!
//! 1. quoted strings -> `tok-str`
//! 2. numeric literals -> `tok-num`
//! 3. line comments -> `tok-cmt`
//! 4. known keywords -> `tok-kw`
//!
//! Later passes do not know about spans inserted by earlier ones, so a
//! keyword inside a string or comment is tagged again, nested in that span.
//!
//! ```rust
//! use refman_core::Highlighter;
//!
//! let hl = Highlighter::with_keywords(["FOR", "FOR EACH", "PRINT"])?;
//! assert_eq!(
//!     hl.highlight("FOR EACH x"),
//!     "<span class=\"tok-kw\">FOR EACH</span> x"
//! );
//! # Ok::<(), refman_core::Error>(())
//! ```

use crate::config::HighlightConfig;
use crate::{Error, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"|'[^']*'"#).unwrap());

/// Highlights code using a keyword set fixed at construction.
#[derive(Debug, Clone)]
pub struct Highlighter {
    keywords: Vec<String>,
    keyword_re: Option<Regex>,
    comment_re: Option<Regex>,
}

impl Highlighter {
    /// Build a highlighter for `keywords`, treating each of the configured
    /// comment markers as the start of a line comment.
    ///
    /// Keywords are matched as whole words, longest first, so a multi-word
    /// keyword wins over any shorter keyword it contains.
    pub fn new<I, S>(keywords: I, config: &HighlightConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        let mut keywords: Vec<String> = unique.into_iter().collect();
        keywords.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let keyword_re = if keywords.is_empty() {
            None
        } else {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                Regex::new(&format!(r"\b(?:{alternation})\b"))
                    .map_err(|e| Error::Config(format!("Invalid keyword pattern: {e}")))?,
            )
        };

        let markers: Vec<String> = config
            .comment_markers
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(regex::escape)
            .collect();
        let comment_re = if markers.is_empty() {
            None
        } else {
            let pattern = format!(r"(?m)(^|\s)((?:{})(?:[ \t].*)?)$", markers.join("|"));
            Some(
                Regex::new(&pattern)
                    .map_err(|e| Error::Config(format!("Invalid comment marker: {e}")))?,
            )
        };

        tracing::debug!(
            keywords = keywords.len(),
            comment_markers = markers.len(),
            "built highlighter"
        );

        Ok(Self {
            keywords,
            keyword_re,
            comment_re,
        })
    }

    /// Build a highlighter with the default `REM` comment marker.
    pub fn with_keywords<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(keywords, &HighlightConfig::default())
    }

    /// Keywords in match priority order (longest first).
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Tag strings, numbers, comments and keywords in escaped code markup.
    #[must_use]
    pub fn highlight(&self, code: &str) -> String {
        let strings = STRING_RE.replace_all(code, "<span class=\"tok-str\">${0}</span>");
        let numbers = tag_numbers(&strings);
        let comments = match &self.comment_re {
            Some(re) => re
                .replace_all(&numbers, "${1}<span class=\"tok-cmt\">${2}</span>")
                .into_owned(),
            None => numbers,
        };
        match &self.keyword_re {
            Some(re) => re
                .replace_all(&comments, "<span class=\"tok-kw\">${0}</span>")
                .into_owned(),
            None => comments,
        }
    }
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// End of an unsigned literal at `start` (`12`, `1.5`, `3.`, `.5`) that is
/// not immediately followed by a word character or `@`. When the longest
/// reading is followed by one, the integer part alone is tried, so `1.5x`
/// yields `1`.
fn unsigned_number_end(bytes: &[u8], start: usize) -> Option<usize> {
    let int_digits = count_digits(bytes, start);
    let has_dot = bytes.get(start + int_digits) == Some(&b'.');
    let frac_digits = if has_dot {
        count_digits(bytes, start + int_digits + 1)
    } else {
        0
    };

    let mut candidates = Vec::with_capacity(2);
    if int_digits > 0 {
        if has_dot {
            candidates.push(start + int_digits + 1 + frac_digits);
        }
        candidates.push(start + int_digits);
    } else if has_dot && frac_digits > 0 {
        candidates.push(start + 1 + frac_digits);
    }

    candidates
        .into_iter()
        .find(|&end| !bytes.get(end).is_some_and(|&b| is_word_byte(b) || b == b'@'))
}

fn number_end(bytes: &[u8], start: usize) -> Option<usize> {
    if matches!(bytes.get(start), Some(b'+' | b'-')) {
        unsigned_number_end(bytes, start + 1)
    } else {
        unsigned_number_end(bytes, start)
    }
}

/// Wrap numeric literals that start the text or follow a non-word character.
fn tag_numbers(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while let Some(ch) = text.get(i..).and_then(|rest| rest.chars().next()) {
        let after = i + ch.len_utf8();
        let mut found = if i == 0 {
            number_end(bytes, 0).map(|end| (0, end))
        } else {
            None
        };
        if found.is_none() && !(ch.is_ascii_alphanumeric() || ch == '_') {
            found = number_end(bytes, after).map(|end| (after, end));
        }

        match found {
            Some((start, end)) => {
                out.push_str(&text[copied..start]);
                out.push_str("<span class=\"tok-num\">");
                out.push_str(&text[start..end]);
                out.push_str("</span>");
                copied = end;
                i = end;
            },
            None => i = after,
        }
    }

    out.push_str(&text[copied..]);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn basil() -> Highlighter {
        Highlighter::with_keywords(["PRINT", "FOR", "FOR EACH", "NEXT", "IF", "THEN"]).unwrap()
    }

    fn num(n: &str) -> String {
        format!("<span class=\"tok-num\">{n}</span>")
    }

    #[test]
    fn test_longest_keyword_wins() {
        let hl = Highlighter::with_keywords(["FOR", "FOR EACH"]).unwrap();
        assert_eq!(hl.keywords(), ["FOR EACH", "FOR"]);
        assert_eq!(
            hl.highlight("FOR EACH x"),
            "<span class=\"tok-kw\">FOR EACH</span> x"
        );
        assert_eq!(
            hl.highlight("FOR x"),
            "<span class=\"tok-kw\">FOR</span> x"
        );
    }

    #[test]
    fn test_keywords_are_whole_words() {
        let hl = basil();
        assert_eq!(hl.highlight("PRINTER IFFY"), "PRINTER IFFY");
        assert_eq!(
            hl.highlight("IF x THEN"),
            "<span class=\"tok-kw\">IF</span> x <span class=\"tok-kw\">THEN</span>"
        );
    }

    #[test]
    fn test_keyword_with_regex_metacharacters() {
        let hl = Highlighter::with_keywords(["LEN$", "A.B"]).unwrap();
        assert_eq!(hl.highlight("AxB"), "AxB");
        assert_eq!(hl.highlight("A.B"), "<span class=\"tok-kw\">A.B</span>");
    }

    #[test]
    fn test_strings() {
        let hl = Highlighter::with_keywords(Vec::<String>::new()).unwrap();
        assert_eq!(
            hl.highlight(r#"x = "hi" + 'yo'"#),
            r#"x = <span class="tok-str">"hi"</span> + <span class="tok-str">'yo'</span>"#
        );
        assert_eq!(hl.highlight(r#"say "open"#), r#"say "open"#);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tag_numbers("42"), num("42"));
        assert_eq!(tag_numbers("x = 3.14"), format!("x = {}", num("3.14")));
        assert_eq!(tag_numbers("-5 +2"), format!("{} {}", num("-5"), num("+2")));
        assert_eq!(tag_numbers("(.5)"), format!("({})", num(".5")));
        assert_eq!(tag_numbers("a,1"), format!("a,{}", num("1")));
    }

    #[test]
    fn test_numbers_inside_identifiers_are_skipped() {
        assert_eq!(tag_numbers("x1 = 2"), format!("x1 = {}", num("2")));
        assert_eq!(tag_numbers("12abc"), "12abc");
        assert_eq!(tag_numbers("3@"), "3@");
        assert_eq!(tag_numbers("var_9"), "var_9");
    }

    #[test]
    fn test_number_backs_off_to_integer_part() {
        assert_eq!(tag_numbers("1.5x"), format!("{}.5x", num("1")));
    }

    #[test]
    fn test_numbers_after_multibyte_characters() {
        assert_eq!(tag_numbers("é1"), format!("é{}", num("1")));
        assert_eq!(tag_numbers("π"), "π");
    }

    #[test]
    fn test_comments() {
        let hl = Highlighter::with_keywords(Vec::<String>::new()).unwrap();
        assert_eq!(
            hl.highlight("REM first\nx = y REM trailing"),
            "<span class=\"tok-cmt\">REM first</span>\nx = y <span class=\"tok-cmt\">REM trailing</span>"
        );
        assert_eq!(hl.highlight("REMARK x"), "REMARK x");
        assert_eq!(hl.highlight("xREM y"), "xREM y");
    }

    #[test]
    fn test_custom_comment_markers() {
        let config = HighlightConfig {
            comment_markers: vec!["//".to_string()],
            ..HighlightConfig::default()
        };
        let hl = Highlighter::new(["PRINT"], &config).unwrap();
        assert_eq!(
            hl.highlight("PRINT // note"),
            "<span class=\"tok-kw\">PRINT</span> <span class=\"tok-cmt\">// note</span>"
        );
        assert_eq!(hl.highlight("REM no"), "REM no");
    }

    #[test]
    fn test_no_comment_markers() {
        let config = HighlightConfig {
            comment_markers: Vec::new(),
            ..HighlightConfig::default()
        };
        let hl = Highlighter::new(["PRINT"], &config).unwrap();
        assert_eq!(hl.highlight("REM x"), "REM x");
    }

    #[test]
    fn test_keyword_nests_inside_string_span() {
        let hl = basil();
        assert_eq!(
            hl.highlight(r#"PRINT "PRINT""#),
            "<span class=\"tok-kw\">PRINT</span> <span class=\"tok-str\">\"<span class=\"tok-kw\">PRINT</span>\"</span>"
        );
    }

    #[test]
    fn test_pass_order_on_full_line() {
        let hl = basil();
        assert_eq!(
            hl.highlight("FOR i = 1 TO 10: PRINT i: NEXT REM loop"),
            format!(
                "<span class=\"tok-kw\">FOR</span> i = {} TO {}: <span class=\"tok-kw\">PRINT</span> i: <span class=\"tok-kw\">NEXT</span> <span class=\"tok-cmt\">REM loop</span>",
                num("1"),
                num("10")
            )
        );
    }

    #[test]
    fn test_escaped_markup_is_preserved() {
        let hl = basil();
        assert_eq!(
            hl.highlight("IF a &lt; 2 THEN"),
            format!(
                "<span class=\"tok-kw\">IF</span> a &lt; {} <span class=\"tok-kw\">THEN</span>",
                num("2")
            )
        );
    }

    #[test]
    fn test_empty_keyword_set_leaves_words_alone() {
        let hl = Highlighter::with_keywords(["", "   "]).unwrap();
        assert!(hl.keywords().is_empty());
        assert_eq!(hl.highlight("PRINT x"), "PRINT x");
    }
}
