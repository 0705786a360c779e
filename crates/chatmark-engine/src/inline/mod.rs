//! # Inline Conversion
//!
//! Rule-driven scanning of a single inline span (a paragraph, heading text,
//! a template line) into renderer outputs.
//!
//! ## Architecture
//!
//! Block structure is resolved elsewhere; this module receives text that is
//! already known to be inline content, together with reference tables built
//! by the block pass.
//!
//! The scanner repeatedly asks the [`RuleSet`] which construct starts at the
//! current position, hands the match to its handler and moves past it.
//! Handlers for emphasis, strong, strikethrough and link text scan their
//! inner span recursively with the same [`Context`].
//!
//! ## Modules
//!
//! - **`rules`**: [`RuleName`], [`Pattern`] and the flavor-dependent [`RuleSet`]
//! - **`kinds`**: prefix matchers with owned delimiters
//! - **`cursor`**: [`Cursor`] over the unconsumed remainder
//! - **`context`**: [`Context`] plus the prettify and sanitize hooks
//! - **`handlers`**: one handler per construct
//! - **`scanner`**: [`convert()`] main entry point and [`scan_spans`]
//!
//! ## Precedence
//!
//! Rules are tried in one fixed order, earlier rules shadowing later ones:
//! escape, autolink, raw tag, link, reference link, footnote, shortcut link,
//! strikethrough, strong, emphasis, code span, line break, text. Text is the
//! catch-all and always consumes at least one character.
//!
//! With `bare_urls` in a GFM flavor, bare URLs are tried right after
//! autolinks, except inside link text or a raw `<a>` element.

pub mod context;
pub mod cursor;
mod handlers;
pub mod kinds;
pub mod rules;
pub mod scanner;
pub mod span;

pub use context::{Context, Prettify, Sanitize};
pub use cursor::Cursor;
pub use kinds::RuleMatch;
pub use rules::{Pattern, Rule, RuleName, RuleSet};
pub use scanner::{convert, convert_lines, scan_spans};
pub use span::Span;
