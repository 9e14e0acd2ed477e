use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

const XML_SPECIALS: [&str; 5] = ["&", "<", ">", "\"", "'"];
const XML_ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(XML_SPECIALS)
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use deckframe::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hi\"</tag>"), "&lt;tag&gt;&quot;hi&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

/// Append `s` to `xml` with XML special characters escaped, without an
/// intermediate allocation. Used by the DrawingML writers.
#[inline]
pub fn push_escaped(xml: &mut String, s: &str) {
    XML_ESCAPER.replace_all_with(s, xml, |mat, _, dst| {
        dst.push_str(XML_ENTITIES[mat.pattern().as_usize()]);
        true
    });
}

/// Resolve one of the five predefined entity names (without `&` and `;`).
#[inline]
pub fn predefined_entity(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ => None,
    }
}
