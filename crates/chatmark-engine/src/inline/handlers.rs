//! Construct handlers: one per [`RuleName`], each turning a match into at
//! most one renderer output.

use crate::error::ConvertError;
use crate::render::Render;
use crate::text::{encode_href, escape_code, escape_html, mangle_email};

use super::context::Context;
use super::kinds::RuleMatch;
use super::rules::RuleName;
use super::scanner::{Scope, scan};

const MAILTO: &str = "mailto:";

/// Runs the handler for `name`.
///
/// Returns `Ok(None)` when the construct produces no output (an unresolved
/// footnote reference).
pub(crate) fn dispatch<R: Render>(
    name: RuleName,
    m: &RuleMatch<'_>,
    ctx: &Context<'_, R>,
    scope: Scope,
) -> Result<Option<R::Output>, ConvertError> {
    let r = ctx.renderer();
    let output = match name {
        RuleName::Escape => r.text(&escape_html(m.group(1).unwrap_or_default())),
        RuleName::Autolink => autolink(m, ctx),
        RuleName::Url => bare_url(m.full, ctx),
        RuleName::RawTag => r.raw(&ctx.sanitize().tag(m.full)),
        RuleName::Link => {
            let title = m.group(3).filter(|t| !t.is_empty());
            link_or_image(
                m.is_image(),
                m.group(1).unwrap_or_default(),
                m.group(2).unwrap_or_default(),
                title,
                ctx,
            )?
        }
        RuleName::ReferenceLink | RuleName::ShortcutLink => reference_link(m, ctx)?,
        RuleName::FootnoteReference => return Ok(footnote_reference(m, ctx)),
        RuleName::Strikethrough => r.strikethrough(inner(m, ctx, scope)?),
        RuleName::Strong => r.strong(inner(m, ctx, scope)?),
        RuleName::Emphasis => r.emphasis(inner(m, ctx, scope)?),
        RuleName::CodeSpan => r.code_span(&escape_code(m.group(1).unwrap_or_default().trim())),
        RuleName::LineBreak => r.line_break(),
        RuleName::Text => r.text(&escape_html(&ctx.prettify().apply(m.full))),
    };
    Ok(Some(output))
}

fn inner<R: Render>(
    m: &RuleMatch<'_>,
    ctx: &Context<'_, R>,
    scope: Scope,
) -> Result<Vec<R::Output>, ConvertError> {
    scan(m.group(1).unwrap_or_default(), ctx, scope)
}

fn autolink<R: Render>(m: &RuleMatch<'_>, ctx: &Context<'_, R>) -> R::Output {
    let target = m.group(1).unwrap_or_default();
    if m.group(2) != Some("@") {
        return bare_url(target, ctx);
    }

    let address = match target.get(..MAILTO.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(MAILTO) => &target[MAILTO.len()..],
        _ => target,
    };
    let text = mangle_email(address);
    let href = format!("{MAILTO}{text}");
    let r = ctx.renderer();
    r.link(&href, vec![r.text(&text)], None)
}

/// A URL written out literally; the escaped form is both target and text.
fn bare_url<R: Render>(url: &str, ctx: &Context<'_, R>) -> R::Output {
    let text = escape_html(url);
    let href = match ctx.sanitize().href(url) {
        safe if safe == url => text.clone(),
        neutralized => neutralized.to_string(),
    };
    let r = ctx.renderer();
    r.link(&href, vec![r.text(&text)], None)
}

fn link_or_image<R: Render>(
    image: bool,
    text: &str,
    href: &str,
    title: Option<&str>,
    ctx: &Context<'_, R>,
) -> Result<R::Output, ConvertError> {
    let r = ctx.renderer();
    let href = encode_href(ctx.sanitize().href(href));
    let title = title.map(escape_html);
    if image {
        return Ok(r.image(&href, &escape_html(text), title.as_deref()));
    }
    let scope = Scope {
        in_link: true,
        ..Scope::default()
    };
    let children = scan(text, ctx, scope)?;
    Ok(r.link(&href, children, title.as_deref()))
}

/// Resolves `[text][id]`, `[text][]` and `[text]` through the link table.
///
/// Unknown ids leave the source text as it was written.
fn reference_link<R: Render>(
    m: &RuleMatch<'_>,
    ctx: &Context<'_, R>,
) -> Result<R::Output, ConvertError> {
    let text = m.group(1).unwrap_or_default();
    let id = m.group(2).filter(|id| !id.is_empty()).unwrap_or(text);

    match ctx.links().get(id) {
        Some(definition) if !definition.url.is_empty() => link_or_image(
            m.is_image(),
            text,
            &definition.url,
            definition.title.as_deref().filter(|t| !t.is_empty()),
            ctx,
        ),
        _ => {
            log::debug!("unresolved link reference `{id}`");
            Ok(ctx.renderer().text(&escape_html(m.full)))
        }
    }
}

/// Unknown footnote ids produce nothing.
fn footnote_reference<R: Render>(m: &RuleMatch<'_>, ctx: &Context<'_, R>) -> Option<R::Output> {
    let id = m.group(1)?;
    let Some(ordinal) = ctx.footnotes().get(id) else {
        log::debug!("unresolved footnote reference `{id}`");
        return None;
    };
    Some(ctx.renderer().footnote_link(
        &format!("fn:{ordinal}"),
        &format!("fnref:{ordinal}"),
        ordinal,
    ))
}
