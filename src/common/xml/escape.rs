use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so longer entities win (e.g. &amp; before &lt;)
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters in text or attribute values.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping,
/// which is the common case for attribute values on the encode path.
///
/// # Examples
///
/// ```
/// use xdrml::common::escape_xml;
/// assert_eq!(escape_xml("Chart 1"), "Chart 1");
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("\"x\" < 'y'"), "&quot;x&quot; &lt; &apos;y&apos;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if XML_ESCAPER.find(s).is_none() {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]))
    }
}

/// Unescape the five standard XML entities.
///
/// Unknown or malformed entities are left unchanged.
///
/// # Examples
///
/// ```
/// use xdrml::common::unescape_xml;
/// assert_eq!(unescape_xml("a &amp; b"), "a & b");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;"); // &amp; is matched first
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if XML_UNESCAPER.find(s).is_none() {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(XML_UNESCAPER.replace_all(s, &["&", "<", ">", "\"", "'"]))
    }
}
