//! Hard line breaks and the plain-text catch-all.

use super::RuleMatch;

/// Characters that may start a construct in every flavor.
pub const STOP_CHARS: &[char] = &['\\', '<', '!', '[', '_', '*', '`'];
/// Extra stop characters in GFM.
pub const GFM_STOP_CHARS: &[char] = &['\\', '<', '!', '[', '_', '*', '`', '~'];
pub const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Two or more spaces before a newline that is not the end of the input.
pub fn line_break(src: &str) -> Option<RuleMatch<'_>> {
    hard_break(src, 2)
}

/// Any newline (with optional trailing spaces) that is not the end of the input.
pub fn newline_break(src: &str) -> Option<RuleMatch<'_>> {
    hard_break(src, 0)
}

/// A run of plain text up to the next potential construct.
pub fn text(src: &str) -> Option<RuleMatch<'_>> {
    text_run(src, STOP_CHARS, false, 2)
}

/// [`text`] that also stops at `~` and bare URLs.
pub fn gfm_text(src: &str) -> Option<RuleMatch<'_>> {
    text_run(src, GFM_STOP_CHARS, true, 2)
}

/// [`gfm_text`] that stops at every newline.
pub fn breaks_text(src: &str) -> Option<RuleMatch<'_>> {
    text_run(src, GFM_STOP_CHARS, true, 0)
}

fn hard_break(src: &str, min_spaces: usize) -> Option<RuleMatch<'_>> {
    let spaces = leading_spaces(src);
    if spaces < min_spaces {
        return None;
    }
    let rest = src[spaces..].strip_prefix('\n')?;
    if rest.trim().is_empty() {
        return None;
    }
    Some(RuleMatch::new(&src[..spaces + 1]))
}

fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b' ').count()
}

fn break_ahead(rest: &str, min_spaces: usize) -> bool {
    let spaces = leading_spaces(rest);
    spaces >= min_spaces && rest[spaces..].starts_with('\n')
}

/// Always consumes at least one character of non-empty input; this is what
/// makes a rule set total.
fn text_run<'a>(
    src: &'a str,
    stops: &[char],
    urls: bool,
    break_spaces: usize,
) -> Option<RuleMatch<'a>> {
    if src.is_empty() {
        return None;
    }
    let end = src
        .char_indices()
        .skip(1)
        .find(|&(i, c)| {
            let rest = &src[i..];
            stops.contains(&c)
                || (urls && URL_SCHEMES.iter().any(|scheme| rest.starts_with(scheme)))
                || break_ahead(rest, break_spaces)
        })
        .map_or(src.len(), |(i, _)| i);
    Some(RuleMatch::new(&src[..end]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("  \nnext", Some("  \n"))]
    #[case("    \nnext", Some("    \n"))]
    #[case(" \nnext", None)]
    #[case("\nnext", None)]
    #[case("  \n", None)]
    #[case("  \n  \n ", None)]
    fn two_space_breaks(#[case] src: &str, #[case] expected: Option<&str>) {
        assert_eq!(line_break(src).map(|m| m.full), expected);
    }

    #[rstest]
    #[case("\nnext", Some("\n"))]
    #[case(" \nnext", Some(" \n"))]
    #[case("\n", None)]
    fn newline_breaks(#[case] src: &str, #[case] expected: Option<&str>) {
        assert_eq!(newline_break(src).map(|m| m.full), expected);
    }

    #[rstest]
    #[case("hello world", "hello world")]
    #[case("hello *x*", "hello ")]
    #[case("a\\b", "a")]
    #[case("*", "*")]
    #[case("**", "*")]
    #[case("line  \nnext", "line")]
    #[case("line \nnext", "line \nnext")]
    #[case("a ~~b~~", "a ~~b~~")]
    #[case("see http://x.org", "see http://x.org")]
    fn normal_text_runs(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(text(src).unwrap().full, expected);
    }

    #[rstest]
    #[case("a ~~b~~", "a ")]
    #[case("see http://x.org", "see ")]
    #[case("see https://x.org", "see ")]
    #[case("line\nnext", "line\nnext")]
    fn gfm_text_runs(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(gfm_text(src).unwrap().full, expected);
    }

    #[rstest]
    #[case("line\nnext", "line")]
    #[case("line \nnext", "line")]
    #[case("\nnext", "\nnext")]
    fn breaks_text_runs(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(breaks_text(src).unwrap().full, expected);
    }

    #[test]
    fn empty_input_has_no_text() {
        assert!(text("").is_none());
    }

    #[test]
    fn first_character_is_always_taken() {
        for src in ["\\", "<", "!", "[", "_", "*", "`", "~", "é"] {
            assert_eq!(gfm_text(src).unwrap().full, src);
        }
    }
}
