use std::borrow::Cow;

use crate::options::Options;
use crate::references::{FootnoteTable, LinkTable};
use crate::render::Render;
use crate::text::{escape_html, is_script_href, smartypants};

use super::rules::RuleSet;

/// Substitution applied to plain-text runs before escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prettify {
    #[default]
    Identity,
    SmartyPants,
}

impl Prettify {
    pub fn apply<'a>(self, text: &'a str) -> Cow<'a, str> {
        match self {
            Prettify::Identity => Cow::Borrowed(text),
            Prettify::SmartyPants => Cow::Owned(smartypants(text)),
        }
    }
}

/// Treatment of raw tags and link targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sanitize {
    #[default]
    Passthrough,
    /// Raw tags are escaped and script link targets replaced by `#`.
    Escape,
}

impl Sanitize {
    pub fn tag<'a>(self, tag: &'a str) -> Cow<'a, str> {
        match self {
            Sanitize::Passthrough => Cow::Borrowed(tag),
            Sanitize::Escape => Cow::Owned(escape_html(tag)),
        }
    }

    pub fn href<'a>(self, href: &'a str) -> &'a str {
        match self {
            Sanitize::Escape if is_script_href(href) => {
                log::debug!("neutralized script link target");
                "#"
            }
            _ => href,
        }
    }
}

/// Everything a conversion reads: the rule set, reference tables, the
/// renderer and the two text hooks. Shared by reference across all nested
/// scans and never mutated.
pub struct Context<'a, R: Render> {
    rules: &'a RuleSet,
    links: &'a LinkTable,
    footnotes: &'a FootnoteTable,
    renderer: &'a R,
    prettify: Prettify,
    sanitize: Sanitize,
}

impl<'a, R: Render> Context<'a, R> {
    pub fn new(
        options: &Options,
        links: &'a LinkTable,
        footnotes: &'a FootnoteTable,
        renderer: &'a R,
    ) -> Self {
        Self {
            rules: RuleSet::for_options(options),
            links,
            footnotes,
            renderer,
            prettify: if options.smartypants {
                Prettify::SmartyPants
            } else {
                Prettify::Identity
            },
            sanitize: if options.sanitize {
                Sanitize::Escape
            } else {
                Sanitize::Passthrough
            },
        }
    }

    /// Replaces the rule set picked from the options.
    pub fn with_rules(mut self, rules: &'a RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    pub fn links(&self) -> &'a LinkTable {
        self.links
    }

    pub fn footnotes(&self) -> &'a FootnoteTable {
        self.footnotes
    }

    pub fn renderer(&self) -> &'a R {
        self.renderer
    }

    pub fn prettify(&self) -> Prettify {
        self.prettify
    }

    pub fn sanitize(&self) -> Sanitize {
        self.sanitize
    }
}
