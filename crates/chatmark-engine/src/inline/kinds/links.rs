//! Escapes, autolinks, bare URLs, raw tags, links, reference links and
//! footnote references.

use std::sync::OnceLock;

use regex::Regex;

use super::{RuleMatch, cached, match_regex};

pub const LABEL_OPEN: char = '[';
pub const LABEL_CLOSE: char = ']';
pub const IMAGE_MARKER: &str = "![";

/// `\` followed by a character that would otherwise start a construct.
pub fn escape(src: &str) -> Option<RuleMatch<'_>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    match_regex(cached(&RE, r"^\\([\\`*{}\[\]()#+\-.!_>])"), src)
}

/// [`escape`] plus `~` and `|`.
pub fn gfm_escape(src: &str) -> Option<RuleMatch<'_>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    match_regex(cached(&RE, r"^\\([\\`*{}\[\]()#+\-.!_>~|])"), src)
}

/// `<target>` where the target contains `@` or `:/`.
///
/// Group 1 is the target, group 2 the separator that classified it.
pub fn autolink(src: &str) -> Option<RuleMatch<'_>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    match_regex(cached(&RE, r"^<([^ >]+(@|:/)[^ >]+)>"), src)
}

/// A bare `http://` or `https://` URL, without trailing punctuation.
pub fn url(src: &str) -> Option<RuleMatch<'_>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    match_regex(
        cached(&RE, r#"^(https?://[^\s<]+[^<.,:;"')\]\s])"#),
        src,
    )
}

/// An HTML comment or a single opening/closing tag.
pub fn raw_tag(src: &str) -> Option<RuleMatch<'_>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    match_regex(
        cached(
            &RE,
            r#"^(?:<!--[\s\S]*?-->|</?[A-Za-z0-9_]+(?:"[^"]*"|'[^']*'|[^'">])*?>)"#,
        ),
        src,
    )
}

/// `[text](href "title")` or `![alt](href "title")`.
///
/// Groups: 1 text, 2 href, 3 title.
pub fn link(src: &str) -> Option<RuleMatch<'_>> {
    static TAIL: OnceLock<Regex> = OnceLock::new();
    let tail = cached(
        &TAIL,
        r#"^\]\(\s*<?([\s\S]*?)>?(?:\s+['"]([\s\S]*?)['"])?\s*\)"#,
    );
    bracketed(src, tail)
}

/// `[text][id]` or `[text] [id]`; an empty id refers to the text itself.
///
/// Groups: 1 text, 2 id.
pub fn reference_link(src: &str) -> Option<RuleMatch<'_>> {
    static TAIL: OnceLock<Regex> = OnceLock::new();
    bracketed(src, cached(&TAIL, r"^\]\s*\[([^\]]*)\]"))
}

/// `[text]` with no id, resolved through the text.
pub fn shortcut_link(src: &str) -> Option<RuleMatch<'_>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    match_regex(
        cached(&RE, r"^!?\[((?:\[[^\]]*\]|[^\[\]])*)\]"),
        src,
    )
}

/// `[^id]`.
pub fn footnote_reference(src: &str) -> Option<RuleMatch<'_>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    match_regex(cached(&RE, r"^\[\^([^\]]+)\]"), src)
}

/// Matches `[label` + `tail` where `tail` starts at the closing bracket.
///
/// Label ends are tried longest first, so the result is the one a greedy
/// backtracking match of the label would settle on.
fn bracketed<'a>(src: &'a str, tail: &Regex) -> Option<RuleMatch<'a>> {
    let open = if src.starts_with(IMAGE_MARKER) {
        IMAGE_MARKER.len()
    } else if src.starts_with(LABEL_OPEN) {
        LABEL_OPEN.len_utf8()
    } else {
        return None;
    };
    let body = &src[open..];

    label_ends(body).into_iter().rev().find_map(|end| {
        if !body[end..].starts_with(LABEL_CLOSE) {
            return None;
        }
        let caps = tail.captures(&body[end..])?;
        let consumed = open + end + caps.get(0)?.len();
        let mut m = RuleMatch::new(&src[..consumed]).with_group(1, &body[..end]);
        for index in 1..=2 {
            if let Some(group) = caps.get(index) {
                m = m.with_group(index + 1, group.as_str());
            }
        }
        Some(m)
    })
}

/// Every offset at which a link label body may end, shortest first.
///
/// A label body is a sequence of: a nested `[...]` without inner `]`, any
/// character other than a bracket, or a `]` that is followed by another `]`
/// before any `[`. At each offset at most one of these applies, so the
/// possible ends form a single chain.
fn label_ends(body: &str) -> Vec<usize> {
    let mut ends = vec![0];
    let mut pos = 0;
    while let Some(ch) = body[pos..].chars().next() {
        let next = match ch {
            LABEL_OPEN => match body[pos + 1..].find(LABEL_CLOSE) {
                Some(close) => pos + 1 + close + 1,
                None => break,
            },
            LABEL_CLOSE => {
                let ahead = body[pos + 1..].find([LABEL_OPEN, LABEL_CLOSE]);
                match ahead.map(|i| body[pos + 1 + i..].starts_with(LABEL_CLOSE)) {
                    Some(true) => pos + 1,
                    _ => break,
                }
            }
            other => pos + other.len_utf8(),
        };
        ends.push(next);
        pos = next;
    }
    ends
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn groups<'a>(m: &RuleMatch<'a>) -> (&'a str, Option<&'a str>, Option<&'a str>, Option<&'a str>) {
        (m.full, m.group(1), m.group(2), m.group(3))
    }

    #[rstest]
    #[case(r"\*x", Some("*"))]
    #[case(r"\>", Some(">"))]
    #[case(r"\a", None)]
    #[case(r"\~", None)]
    fn escapes(#[case] src: &str, #[case] expected: Option<&str>) {
        assert_eq!(escape(src).and_then(|m| m.group(1)), expected);
    }

    #[test]
    fn gfm_escapes_tilde_and_pipe() {
        assert_eq!(gfm_escape(r"\~").unwrap().group(1), Some("~"));
        assert_eq!(gfm_escape(r"\|").unwrap().group(1), Some("|"));
    }

    #[rstest]
    #[case("<me@example.com> hi", Some(("<me@example.com>", "@")))]
    #[case("<http://a.org/x>", Some(("<http://a.org/x>", ":/")))]
    #[case("<not a link>", None)]
    #[case("<plain>", None)]
    fn autolinks(#[case] src: &str, #[case] expected: Option<(&str, &str)>) {
        let got = autolink(src).map(|m| (m.full, m.group(2).unwrap()));
        assert_eq!(got, expected);
    }

    #[rstest]
    #[case("http://a.org/x. Next", Some("http://a.org/x"))]
    #[case("https://a.org/(x)", Some("https://a.org/(x"))]
    #[case("https://a.org<b>", Some("https://a.org"))]
    #[case("ftp://a.org", None)]
    #[case("see http://a.org", None)]
    fn bare_urls(#[case] src: &str, #[case] expected: Option<&str>) {
        assert_eq!(url(src).map(|m| m.full), expected);
    }

    #[rstest]
    #[case("<b>bold", Some("<b>"))]
    #[case("</span> x", Some("</span>"))]
    #[case(r#"<a href="x>y">t"#, Some(r#"<a href="x>y">"#))]
    #[case("<!-- hidden --> x", Some("<!-- hidden -->"))]
    #[case("< b>", None)]
    #[case("<b", None)]
    fn raw_tags(#[case] src: &str, #[case] expected: Option<&str>) {
        assert_eq!(raw_tag(src).map(|m| m.full), expected);
    }

    #[test]
    fn inline_link_groups() {
        let m = link(r#"[a *b*](http://x "T") rest"#).unwrap();
        assert_eq!(
            groups(&m),
            (r#"[a *b*](http://x "T")"#, Some("a *b*"), Some("http://x"), Some("T"))
        );
    }

    #[test]
    fn image_link_groups() {
        let m = link("![alt](<pic.png>)").unwrap();
        assert!(m.is_image());
        assert_eq!(groups(&m), ("![alt](<pic.png>)", Some("alt"), Some("pic.png"), None));
    }

    #[test]
    fn link_label_with_nested_brackets() {
        let m = link("[a [b] c](u)").unwrap();
        assert_eq!(m.group(1), Some("a [b] c"));
        assert_eq!(m.group(2), Some("u"));
    }

    #[test]
    fn link_label_with_balanced_stray_bracket() {
        let m = link("[a]b](u)").unwrap();
        assert_eq!(m.group(1), Some("a]b"));
    }

    #[test]
    fn link_label_prefers_longest_end() {
        let m = link("[a](x) [b](y)").unwrap();
        assert_eq!(m.full, "[a](x)");
    }

    #[test]
    fn unclosed_link_does_not_match() {
        assert!(link("[a](b").is_none());
        assert!(link("[a] (b)").is_none());
    }

    #[rstest]
    #[case("[text][id]", Some(("text", "id")))]
    #[case("[text] [id]", Some(("text", "id")))]
    #[case("[foo][]", Some(("foo", "")))]
    #[case("![pic][img]", Some(("pic", "img")))]
    #[case("[foo]", None)]
    fn reference_links(#[case] src: &str, #[case] expected: Option<(&str, &str)>) {
        let got = reference_link(src).map(|m| (m.group(1).unwrap(), m.group(2).unwrap()));
        assert_eq!(got, expected);
    }

    #[rstest]
    #[case("[foo] bar", Some("[foo]"))]
    #[case("[a [b] c]", Some("[a [b] c]"))]
    #[case("![img]", Some("![img]"))]
    #[case("[open", None)]
    fn shortcut_links(#[case] src: &str, #[case] expected: Option<&str>) {
        assert_eq!(shortcut_link(src).map(|m| m.full), expected);
    }

    #[rstest]
    #[case("[^1] after", Some("1"))]
    #[case("[^note-a]", Some("note-a"))]
    #[case("[^]", None)]
    #[case("[1]", None)]
    fn footnotes(#[case] src: &str, #[case] expected: Option<&str>) {
        assert_eq!(footnote_reference(src).and_then(|m| m.group(1)), expected);
    }

    #[test]
    fn label_end_chain() {
        assert_eq!(label_ends("ab]"), vec![0, 1, 2]);
        assert_eq!(label_ends("[x]]"), vec![0, 3]);
        assert_eq!(label_ends("a]b]"), vec![0, 1, 2, 3]);
    }
}
