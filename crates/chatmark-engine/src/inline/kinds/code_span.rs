use super::RuleMatch;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: their content is never scanned for other
/// constructs.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';
}

/// A run of backticks, content, and a closing run of the same length.
///
/// Group 1 is the untrimmed content. The closing run may not be followed
/// by another backtick and the content may not end with one. When no closer
/// of the full opening length exists, shorter openings are tried, leaving
/// the extra backticks in the content.
pub fn code_span(src: &str) -> Option<RuleMatch<'_>> {
    let run = src.bytes().take_while(|&b| b == CodeSpan::TICK).count();

    (1..=run).rev().find_map(|n| {
        let body = &src.as_bytes()[n..];
        let last_start = body.len().checked_sub(n)?;
        (1..=last_start)
            .find(|&close| {
                body[close..close + n].iter().all(|&b| b == CodeSpan::TICK)
                    && body.get(close + n) != Some(&CodeSpan::TICK)
                    && body[close - 1] != CodeSpan::TICK
            })
            .map(|close| {
                RuleMatch::new(&src[..n + close + n]).with_group(1, &src[n..n + close])
            })
    })
}
