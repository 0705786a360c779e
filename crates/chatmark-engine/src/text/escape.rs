use std::fmt::Write;
use std::sync::OnceLock;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;

/// Bytes percent-encoded in link targets, on top of controls and non-ASCII.
const HREF_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

fn entity_regex() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| Regex::new(r"&#?\w+;").expect("Invalid entity regex"))
}

/// Escapes `& < > " '`, leaving existing character references such as
/// `&amp;` or `&#8212;` untouched.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for entity in entity_regex().find_iter(s) {
        out.push_str(&html_escape::encode_quoted_attribute(&s[last..entity.start()]));
        out.push_str(entity.as_str());
        last = entity.end();
    }
    out.push_str(&html_escape::encode_quoted_attribute(&s[last..]));
    out
}

/// Escapes code span content. Every `&` is escaped, entities included.
pub fn escape_code(s: &str) -> String {
    html_escape::encode_quoted_attribute(s).into_owned()
}

/// Encodes a link target for use as an attribute value.
pub fn encode_href(href: &str) -> String {
    let encoded = utf8_percent_encode(href, HREF_ENCODE).to_string();
    escape_html(&encoded)
}

/// Whether a link target uses a scheme that runs code when followed.
pub fn is_script_href(href: &str) -> bool {
    let scheme: String = href
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ':')
        .collect::<String>()
        .to_ascii_lowercase();
    ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|prefix| scheme.starts_with(prefix))
}

/// Obfuscates an address as numeric character references, alternating
/// decimal and hexadecimal forms.
pub fn mangle_email(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 6);
    for (i, ch) in s.chars().enumerate() {
        let code = u32::from(ch);
        // Writing into a String cannot fail.
        let _ = if i % 2 == 0 {
            write!(out, "&#{code};")
        } else {
            write!(out, "&#x{code:x};")
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("a < b > c", "a &lt; b &gt; c")]
    #[case(r#"say "hi""#, "say &quot;hi&quot;")]
    #[case("fish & chips", "fish &amp; chips")]
    #[case("already &amp; done", "already &amp; done")]
    #[case("&#8212; and &mdash;", "&#8212; and &mdash;")]
    fn escapes_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_html(input), expected);
    }

    #[test]
    fn code_escapes_every_ampersand() {
        assert_eq!(escape_code("&amp; <x>"), "&amp;amp; &lt;x&gt;");
    }

    #[rstest]
    #[case("http://x.org/a b", "http://x.org/a%20b")]
    #[case("http://x.org/?a=1&b=2", "http://x.org/?a=1&amp;b=2")]
    #[case("http://x.org/ü", "http://x.org/%C3%BC")]
    #[case("http://x.org/%20", "http://x.org/%20")]
    fn encodes_hrefs(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode_href(input), expected);
    }

    #[rstest]
    #[case("javascript:alert(1)", true)]
    #[case("  JavaScript:alert(1)", true)]
    #[case("java\tscript:x", true)]
    #[case("vbscript:x", true)]
    #[case("data:text/html,x", true)]
    #[case("https://example.com", false)]
    #[case("/relative/javascript:", false)]
    fn detects_script_hrefs(#[case] href: &str, #[case] expected: bool) {
        assert_eq!(is_script_href(href), expected);
    }

    #[test]
    fn mangles_alternating_forms() {
        assert_eq!(mangle_email("a@b"), "&#97;&#x40;&#98;");
    }
}
