//! # Rule Sets
//!
//! A rule set maps every construct name to a prefix pattern. The scanner
//! tries the dispatched rules in [`RuleName::PRIORITY`] order and the first
//! match wins.
//!
//! Rule sets are derived from a base grammar by overriding entries:
//!
//! - **GFM**: escapes gain `~` and `|`, strikethrough is enabled, the bare
//!   URL pattern is filled in, and text runs stop before `~` and URLs. The
//!   URL rule is only dispatched when `bare_urls` is also set.
//! - **GFM + breaks**: every newline is a hard break.
//! - **Pedantic** (without GFM): strong and emphasis need non-whitespace
//!   just inside their delimiters.
//! - **Footnotes**: `[^id]` references are recognised.
//!
//! Constructs a flavor does not support keep a [`Pattern::Never`] entry, so
//! every set is total over construct names.

use std::fmt;
use std::sync::OnceLock;

use crate::options::{Flavor, Options};

use super::kinds::{RuleMatch, code_span, emphasis, links, text};

/// A prefix matcher.
pub type MatchFn = for<'a> fn(&'a str) -> Option<RuleMatch<'a>>;

/// Inline construct names, declared in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleName {
    Escape,
    Autolink,
    /// Bare URL. Present in GFM sets, dispatched only with `bare_urls`.
    Url,
    RawTag,
    Link,
    ReferenceLink,
    FootnoteReference,
    /// Reference link without an id: `[text]`.
    ShortcutLink,
    Strikethrough,
    Strong,
    Emphasis,
    CodeSpan,
    LineBreak,
    Text,
}

impl RuleName {
    /// Every construct, in the order the scanner tries the dispatched ones.
    pub const PRIORITY: [RuleName; 14] = [
        RuleName::Escape,
        RuleName::Autolink,
        RuleName::Url,
        RuleName::RawTag,
        RuleName::Link,
        RuleName::ReferenceLink,
        RuleName::FootnoteReference,
        RuleName::ShortcutLink,
        RuleName::Strikethrough,
        RuleName::Strong,
        RuleName::Emphasis,
        RuleName::CodeSpan,
        RuleName::LineBreak,
        RuleName::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleName::Escape => "escape",
            RuleName::Autolink => "autolink",
            RuleName::Url => "url",
            RuleName::RawTag => "raw-tag",
            RuleName::Link => "link",
            RuleName::ReferenceLink => "reference-link",
            RuleName::FootnoteReference => "footnote-reference",
            RuleName::ShortcutLink => "shortcut-link",
            RuleName::Strikethrough => "strikethrough",
            RuleName::Strong => "strong",
            RuleName::Emphasis => "emphasis",
            RuleName::CodeSpan => "code-span",
            RuleName::LineBreak => "line-break",
            RuleName::Text => "text",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule recognises its construct.
#[derive(Clone, Copy)]
pub enum Pattern {
    /// Matches a prefix of the remaining input.
    Prefix(MatchFn),
    /// Disabled in this flavor.
    Never,
}

impl Pattern {
    pub fn match_prefix<'a>(&self, src: &'a str) -> Option<RuleMatch<'a>> {
        match self {
            Pattern::Prefix(f) => f(src),
            Pattern::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Pattern::Never)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Prefix(_) => f.write_str("Prefix(..)"),
            Pattern::Never => f.write_str("Never"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: RuleName,
    pub pattern: Pattern,
}

/// Immutable mapping from construct name to pattern.
#[derive(Debug, Clone)]
pub struct RuleSet {
    flavor: Flavor,
    footnotes: bool,
    bare_urls: bool,
    rules: [Rule; 14],
}

impl RuleSet {
    /// Builds a fresh rule set for `options`.
    pub fn build(options: &Options) -> Self {
        Self::from_parts(options.flavor(), options.footnotes, options.bare_urls)
    }

    /// Returns the shared rule set for `options`, building all variants on
    /// first use.
    pub fn for_options(options: &Options) -> &'static RuleSet {
        static SETS: OnceLock<Vec<RuleSet>> = OnceLock::new();
        let sets = SETS.get_or_init(|| {
            let mut sets = Vec::with_capacity(FLAVORS.len() * 4);
            for flavor in FLAVORS {
                for footnotes in [false, true] {
                    for bare_urls in [false, true] {
                        sets.push(Self::from_parts(flavor, footnotes, bare_urls));
                    }
                }
            }
            sets
        });
        let flavor = options.flavor();
        let index = FLAVORS
            .iter()
            .position(|&f| f == flavor)
            .unwrap_or_default();
        &sets[index * 4 + usize::from(options.footnotes) * 2 + usize::from(options.bare_urls)]
    }

    fn from_parts(flavor: Flavor, footnotes: bool, bare_urls: bool) -> Self {
        let mut set = Self::base(flavor, footnotes);
        match flavor {
            Flavor::Gfm | Flavor::GfmBreaks => {
                set.bare_urls = bare_urls;
                set.replace(RuleName::Escape, links::gfm_escape);
                set.replace(RuleName::Url, links::url);
                set.replace(RuleName::Strikethrough, emphasis::strikethrough);
                set.replace(RuleName::Text, text::gfm_text);
                if flavor == Flavor::GfmBreaks {
                    set.replace(RuleName::LineBreak, text::newline_break);
                    set.replace(RuleName::Text, text::breaks_text);
                }
            }
            Flavor::Pedantic => {
                set.replace(RuleName::Strong, emphasis::pedantic_strong);
                set.replace(RuleName::Emphasis, emphasis::pedantic_emphasis);
            }
            Flavor::Normal => {}
        }
        if footnotes {
            set.replace(RuleName::FootnoteReference, links::footnote_reference);
        }
        set
    }

    fn base(flavor: Flavor, footnotes: bool) -> Self {
        let pattern = |name| match name {
            RuleName::Escape => Pattern::Prefix(links::escape),
            RuleName::Autolink => Pattern::Prefix(links::autolink),
            RuleName::RawTag => Pattern::Prefix(links::raw_tag),
            RuleName::Link => Pattern::Prefix(links::link),
            RuleName::ReferenceLink => Pattern::Prefix(links::reference_link),
            RuleName::ShortcutLink => Pattern::Prefix(links::shortcut_link),
            RuleName::Strong => Pattern::Prefix(emphasis::strong),
            RuleName::Emphasis => Pattern::Prefix(emphasis::emphasis),
            RuleName::CodeSpan => Pattern::Prefix(code_span::code_span),
            RuleName::LineBreak => Pattern::Prefix(text::line_break),
            RuleName::Text => Pattern::Prefix(text::text),
            RuleName::Url | RuleName::FootnoteReference | RuleName::Strikethrough => Pattern::Never,
        };
        Self {
            flavor,
            footnotes,
            bare_urls: false,
            rules: RuleName::PRIORITY.map(|name| Rule {
                name,
                pattern: pattern(name),
            }),
        }
    }

    fn replace(&mut self, name: RuleName, f: MatchFn) {
        self.rules[name as usize].pattern = Pattern::Prefix(f);
    }

    pub fn get(&self, name: RuleName) -> &Rule {
        &self.rules[name as usize]
    }

    /// Every rule, in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// The rules the scanner tries, in priority order.
    pub fn dispatched(&self) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(|rule| self.bare_urls || rule.name != RuleName::Url)
    }

    /// Whether bare URLs are dispatched.
    pub fn bare_urls(&self) -> bool {
        self.bare_urls
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn footnotes(&self) -> bool {
        self.footnotes
    }

    #[cfg(test)]
    pub(crate) fn override_for_tests(&mut self, rule: Rule) {
        self.rules[rule.name as usize] = rule;
    }
}

const FLAVORS: [Flavor; 4] = [
    Flavor::Normal,
    Flavor::Pedantic,
    Flavor::Gfm,
    Flavor::GfmBreaks,
];
