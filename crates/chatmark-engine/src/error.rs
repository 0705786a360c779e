use crate::inline::RuleName;

/// Internal failures of the inline scanner.
///
/// Neither is reachable with a rule set produced by
/// [`RuleSet::build`](crate::inline::RuleSet::build): the plain-text rule
/// always consumes at least one character. A rule set with a gap or a rule
/// that matches without consuming surfaces here instead of looping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("no inline rule matched at byte offset {offset}")]
    NoRuleMatched { offset: usize },
    /// A scan took more steps than its input has bytes, plus one. `rule` and
    /// `offset` are the match that went over.
    #[error("inline scan exceeded its iteration limit of {limit} at byte offset {offset} (rule `{rule}`)")]
    IterationLimit {
        limit: usize,
        rule: RuleName,
        offset: usize,
    },
}
