//! # Inline Kinds
//!
//! Prefix matchers, one module per family of constructs. Every matcher is
//! anchored at the start of the remaining input and either returns the
//! consumed prefix with its capture groups or `None`.
//!
//! Delimiters live as constants next to the matcher that owns them; the
//! scanner and handlers never hardcode `**` or `` ` ``.
//!
//! The `regex` crate has no look-around or back-references, so constructs
//! that need them (emphasis closers, code span fences, link labels) are
//! matched by hand with the same first-match behaviour a backtracking engine
//! would give.

pub mod code_span;
pub mod emphasis;
pub mod links;
pub mod text;

use std::sync::OnceLock;

use regex::{Captures, Regex};

const MAX_GROUPS: usize = 3;

/// A successful prefix match: the consumed text plus numbered capture groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// The consumed prefix of the remaining input.
    pub full: &'a str,
    groups: [Option<&'a str>; MAX_GROUPS],
}

impl<'a> RuleMatch<'a> {
    pub fn new(full: &'a str) -> Self {
        Self {
            full,
            groups: [None; MAX_GROUPS],
        }
    }

    /// Sets capture group `index` (1-based, like regex groups).
    pub fn with_group(mut self, index: usize, value: &'a str) -> Self {
        if let Some(slot) = index.checked_sub(1).and_then(|i| self.groups.get_mut(i)) {
            *slot = Some(value);
        }
        self
    }

    /// Capture group `index` (1-based), if it participated in the match.
    pub fn group(&self, index: usize) -> Option<&'a str> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i).copied().flatten())
    }

    /// Number of bytes consumed.
    pub fn len(&self) -> usize {
        self.full.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    /// Whether a link-like match carries the leading `!` image marker.
    pub fn is_image(&self) -> bool {
        self.full.starts_with('!')
    }

    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let mut m = Self::new(caps.get(0)?.as_str());
        for index in 1..=MAX_GROUPS {
            if let Some(group) = caps.get(index) {
                m = m.with_group(index, group.as_str());
            }
        }
        Some(m)
    }
}

/// Returns the compiled regex stored in `cell`, compiling it on first use.
///
/// Patterns are compile-time constants; a failure here is a programming error.
fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid inline rule regex"))
}

/// Matches an anchored regex against the start of `src`.
fn match_regex<'a>(re: &Regex, src: &'a str) -> Option<RuleMatch<'a>> {
    re.captures(src)
        .and_then(|caps| RuleMatch::from_captures(&caps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_one_based() {
        let m = RuleMatch::new("[a](b)").with_group(1, "a").with_group(2, "b");
        assert_eq!(m.group(0), None);
        assert_eq!(m.group(1), Some("a"));
        assert_eq!(m.group(2), Some("b"));
        assert_eq!(m.group(3), None);
        assert_eq!(m.group(9), None);
        assert_eq!(m.len(), 6);
    }

    #[test]
    fn out_of_range_group_is_ignored() {
        let m = RuleMatch::new("x").with_group(7, "x");
        assert_eq!(m.group(7), None);
    }

    #[test]
    fn image_marker() {
        assert!(RuleMatch::new("![a](b)").is_image());
        assert!(!RuleMatch::new("[a](b)").is_image());
    }
}
