//! Strong, emphasis and strikethrough.
//!
//! Each construct is its delimiter, a non-empty inner span and the same
//! delimiter again. The inner span is always the shortest that closes.

use std::collections::HashSet;

use super::RuleMatch;

pub const STRONG_DELIMS: [&str; 2] = ["__", "**"];
pub const STRIKE: &str = "~~";
pub const UNDERSCORE: char = '_';
pub const STAR: char = '*';

/// `__inner__` or `**inner**`; the closer may not be followed by another
/// delimiter character.
pub fn strong(src: &str) -> Option<RuleMatch<'_>> {
    STRONG_DELIMS
        .iter()
        .find_map(|delim| shortest_delimited(src, delim, false, delim.chars().next()))
}

/// Strong whose inner span starts and ends with a non-whitespace character.
pub fn pedantic_strong(src: &str) -> Option<RuleMatch<'_>> {
    STRONG_DELIMS
        .iter()
        .find_map(|delim| shortest_delimited(src, delim, true, delim.chars().next()))
}

/// `_inner_` or `*inner*`.
///
/// The inner span is the shortest run of tokens (a doubled delimiter or any
/// single character) followed by a closer. An underscore closes only before
/// a non-word character or the end of input, so `_snake_case_` is one
/// emphasis while `_it_x` is none. A star closes unless another star follows.
pub fn emphasis(src: &str) -> Option<RuleMatch<'_>> {
    delimited_emphasis(src, UNDERSCORE, |after| {
        after.chars().next().is_none_or(|c| !is_word_char(c))
    })
    .or_else(|| delimited_emphasis(src, STAR, |after| !after.starts_with(STAR)))
}

/// Emphasis whose inner span starts and ends with a non-whitespace character.
pub fn pedantic_emphasis(src: &str) -> Option<RuleMatch<'_>> {
    [UNDERSCORE, STAR].iter().find_map(|&delim| {
        let mut buf = [0u8; 4];
        shortest_delimited(src, delim.encode_utf8(&mut buf), true, Some(delim))
    })
}

/// `~~inner~~` with non-whitespace at both inner edges.
pub fn strikethrough(src: &str) -> Option<RuleMatch<'_>> {
    shortest_delimited(src, STRIKE, true, None)
}

/// Finds the shortest non-empty `inner` such that `src` starts with
/// `delim inner delim`.
///
/// With `flanked`, inner must start and end with non-whitespace. With
/// `reject_after`, a closer followed by that character does not count.
fn shortest_delimited<'a>(
    src: &'a str,
    delim: &str,
    flanked: bool,
    reject_after: Option<char>,
) -> Option<RuleMatch<'a>> {
    let body = src.strip_prefix(delim)?;
    if flanked && body.chars().next().is_none_or(char::is_whitespace) {
        return None;
    }

    for (end, _) in body.char_indices().skip(1) {
        let Some(after) = body[end..].strip_prefix(delim) else {
            continue;
        };
        if let Some(reject) = reject_after
            && after.starts_with(reject)
        {
            continue;
        }
        let inner = &body[..end];
        if flanked && inner.chars().next_back().is_some_and(char::is_whitespace) {
            continue;
        }
        let consumed = delim.len() + end + delim.len();
        return Some(RuleMatch::new(&src[..consumed]).with_group(1, inner));
    }
    None
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == UNDERSCORE
}

fn delimited_emphasis(
    src: &str,
    delim: char,
    closes_before: impl Fn(&str) -> bool,
) -> Option<RuleMatch<'_>> {
    let body = src.strip_prefix(delim)?;
    let mut visited = 0;
    let end = lazy_close(body, delim, &closes_before, &mut visited)?;
    let full = &src[..2 * delim.len_utf8() + end];
    Some(RuleMatch::new(full).with_group(1, &body[..end]))
}

/// Finds where the shortest inner span of `body` ends.
///
/// Walks token boundaries depth first, trying a doubled delimiter before a
/// single character, and stops at the first boundary holding a closer.
/// Boundaries already explored are skipped, so each is visited at most once
/// and the walk ends as soon as a closer is found. `visited` counts the
/// boundaries examined.
fn lazy_close(
    body: &str,
    delim: char,
    closes_before: &dyn Fn(&str) -> bool,
    visited: &mut usize,
) -> Option<usize> {
    let width = delim.len_utf8();
    let closes_at = |p: usize| {
        body[p..]
            .strip_prefix(delim)
            .is_some_and(|after| closes_before(after))
    };
    let successors = |p: usize| {
        let rest = &body[p..];
        let pair = rest
            .strip_prefix(delim)
            .and_then(|r| r.strip_prefix(delim))
            .map(|_| p + 2 * width);
        let single = rest.chars().next().map(|c| p + c.len_utf8());
        (pair, single)
    };

    let mut seen = HashSet::new();
    let mut stack = Vec::new();
    let push = |stack: &mut Vec<usize>, (pair, single): (Option<usize>, Option<usize>)| {
        stack.extend(single);
        stack.extend(pair);
    };
    push(&mut stack, successors(0));

    while let Some(p) = stack.pop() {
        if !seen.insert(p) {
            continue;
        }
        *visited += 1;
        if closes_at(p) {
            return Some(p);
        }
        push(&mut stack, successors(p));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn inner(m: Option<RuleMatch<'_>>) -> Option<(&str, &str)> {
        m.map(|m| (m.full, m.group(1).unwrap_or_default()))
    }

    #[rstest]
    #[case("**bold** rest", Some(("**bold**", "bold")))]
    #[case("__bold__", Some(("__bold__", "bold")))]
    #[case("**a *b* c**", Some(("**a *b* c**", "a *b* c")))]
    #[case("**a***", Some(("**a***", "a*")))]
    #[case("** spaced **", Some(("** spaced **", " spaced ")))]
    #[case("**open", None)]
    #[case("****", None)]
    fn strong_cases(#[case] src: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(inner(strong(src)), expected);
    }

    #[rstest]
    #[case("**bold**", Some(("**bold**", "bold")))]
    #[case("** spaced **", None)]
    #[case("**a **b**", Some(("**a **b**", "a **b")))]
    fn pedantic_strong_cases(#[case] src: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(inner(pedantic_strong(src)), expected);
    }

    #[rstest]
    #[case("*it* x", Some(("*it*", "it")))]
    #[case("_it_ x", Some(("_it_", "it")))]
    #[case("_it_x", None)]
    #[case("_snake_case_", Some(("_snake_case_", "snake_case")))]
    #[case("_a_b_", Some(("_a_b_", "a_b")))]
    #[case("_foo_bar_ baz", Some(("_foo_bar_", "foo_bar")))]
    #[case("_a_\u{e9}_", Some(("_a_\u{e9}_", "a_\u{e9}")))]
    #[case("_a__b_", Some(("_a__b_", "a__b")))]
    #[case("*a**b*", Some(("*a**b*", "a**b")))]
    #[case("*a**", Some(("*a**", "a*")))]
    #[case("**a*", Some(("**a*", "*a")))]
    #[case("*a", None)]
    #[case("* a *", Some(("* a *", " a ")))]
    fn emphasis_cases(#[case] src: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(inner(emphasis(src)), expected);
    }

    #[rstest]
    #[case("*it*", Some(("*it*", "it")))]
    #[case("* a *", None)]
    #[case("_a_b_", Some(("_a_", "a")))]
    fn pedantic_emphasis_cases(#[case] src: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(inner(pedantic_emphasis(src)), expected);
    }

    #[rstest]
    #[case("~~gone~~", Some(("~~gone~~", "gone")))]
    #[case("~~a~~ b ~~c~~", Some(("~~a~~", "a")))]
    #[case("~~ a~~", None)]
    #[case("~~a ~~b~~", Some(("~~a ~~b~~", "a ~~b")))]
    fn strikethrough_cases(#[case] src: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(inner(strikethrough(src)), expected);
    }

    #[test]
    fn closer_search_stops_at_first_close() {
        let body = format!("a* {}", "*a* ".repeat(10_000));
        let mut visited = 0;
        let end = lazy_close(&body, STAR, &|after: &str| !after.starts_with(STAR), &mut visited);
        assert_eq!(end, Some(1));
        assert_eq!(visited, 1);
    }

    #[test]
    fn unclosed_search_visits_each_boundary_once() {
        let body = "a**".repeat(100);
        let mut visited = 0;
        let end = lazy_close(&body, UNDERSCORE, &|_: &str| true, &mut visited);
        assert_eq!(end, None);
        assert!(visited <= body.len(), "visited {visited} boundaries");
    }

    #[test]
    fn multibyte_inner() {
        assert_eq!(inner(emphasis("*héllo*")), Some(("*héllo*", "héllo")));
        assert_eq!(inner(strong("**日本**")), Some(("**日本**", "日本")));
    }
}
