//! Escaping for values interpolated into emitted markup.
//!
//! Shape names and ids come straight from the document, and the emitted
//! attributes are single-quoted, so both quote characters must be escaped.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Built once, shared across threads
static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build attribute escaper")
});

/// Escape a string for use inside an XML/HTML attribute value.
///
/// # Examples
///
/// ```
/// use slideshape::xml::escape_attr;
/// assert_eq!(escape_attr("Title 1"), "Title 1");
/// assert_eq!(escape_attr("a & 'b'"), "a &amp; &apos;b&apos;");
/// ```
#[inline]
pub fn escape_attr(s: &str) -> String {
    ATTR_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}
