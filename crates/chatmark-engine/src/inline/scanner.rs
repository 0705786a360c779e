use crate::error::ConvertError;
use crate::render::Render;

use super::context::Context;
use super::cursor::Cursor;
use super::handlers;
use super::kinds::RuleMatch;
use super::rules::{RuleName, RuleSet};
use super::span::Span;

/// State inherited by nested scans.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Scope {
    /// Inside markdown link text.
    pub in_link: bool,
    /// Inside a raw `<a ...>` element opened in this or an enclosing span.
    pub in_raw_anchor: bool,
}

impl Scope {
    /// Bare URLs are never linked inside another link.
    fn links_urls(self) -> bool {
        !(self.in_link || self.in_raw_anchor)
    }
}

/// Converts one inline span into renderer outputs, in source order.
///
/// # Errors
/// Only when the rule set fails to make progress, which cannot happen with
/// sets built by [`RuleSet::build`].
pub fn convert<R: Render>(
    source: &str,
    ctx: &Context<'_, R>,
) -> Result<Vec<R::Output>, ConvertError> {
    scan(source, ctx, Scope::default())
}

/// Converts several lines as one span joined by `\n`.
pub fn convert_lines<R: Render, S: AsRef<str>>(
    lines: &[S],
    ctx: &Context<'_, R>,
) -> Result<Vec<R::Output>, ConvertError> {
    let joined = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    convert(&joined, ctx)
}

/// Reports which rule consumed which part of `source` at the top level,
/// without rendering anything.
pub fn scan_spans(source: &str, rules: &RuleSet) -> Result<Vec<(RuleName, Span)>, ConvertError> {
    let mut spans = Vec::new();
    walk(source, rules, Scope::default(), |name, _, span, _| {
        spans.push((name, span));
        Ok(())
    })?;
    Ok(spans)
}

pub(crate) fn scan<R: Render>(
    source: &str,
    ctx: &Context<'_, R>,
    scope: Scope,
) -> Result<Vec<R::Output>, ConvertError> {
    let mut out = Vec::new();
    walk(source, ctx.rules(), scope, |name, m, _, scope| {
        if let Some(output) = handlers::dispatch(name, m, ctx, scope)? {
            out.push(output);
        }
        Ok(())
    })?;
    Ok(out)
}

/// The dispatch loop: at each position the first rule in priority order
/// that matches consumes its prefix and is handed to `visit`.
fn walk<F>(source: &str, rules: &RuleSet, scope: Scope, mut visit: F) -> Result<(), ConvertError>
where
    F: FnMut(RuleName, &RuleMatch<'_>, Span, Scope) -> Result<(), ConvertError>,
{
    let mut cur = Cursor::new(source);
    let mut scope = scope;
    // A scan that makes progress needs at most one step per byte.
    let limit = source.len() + 1;
    let mut steps = 0;

    while !cur.eof() {
        let offset = cur.pos();
        let (name, m) = first_match(cur.rest(), rules, scope)
            .ok_or(ConvertError::NoRuleMatched { offset })?;
        steps += 1;
        if steps > limit {
            return Err(ConvertError::IterationLimit {
                limit,
                rule: name,
                offset,
            });
        }
        log::trace!("{name} at {offset}: {:?}", m.full);

        if name == RuleName::RawTag {
            scope.in_raw_anchor = anchor_state(m.full, scope.in_raw_anchor);
        }
        let span = Span {
            start: offset,
            end: offset + m.len(),
        };
        visit(name, &m, span, scope)?;
        cur.bump_n(m.len());
    }
    Ok(())
}

fn first_match<'a>(
    rest: &'a str,
    rules: &RuleSet,
    scope: Scope,
) -> Option<(RuleName, RuleMatch<'a>)> {
    rules
        .dispatched()
        .filter(|rule| scope.links_urls() || rule.name != RuleName::Url)
        .find_map(|rule| rule.pattern.match_prefix(rest).map(|m| (rule.name, m)))
}

/// Tracks whether a raw tag opens or closes an `<a>` element.
fn anchor_state(tag: &str, in_raw_anchor: bool) -> bool {
    let lower = tag.to_ascii_lowercase();
    if !in_raw_anchor && lower.starts_with("<a ") {
        true
    } else if in_raw_anchor && lower.starts_with("</a>") {
        false
    } else {
        in_raw_anchor
    }
}
