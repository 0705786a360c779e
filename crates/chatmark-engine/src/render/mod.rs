//! # Render Capability
//!
//! The scanner never produces markup itself. Every recognized construct is
//! handed to a [`Render`] implementation, which owns the target dialect
//! (HTML, a chat client's markup, a tree for inspection, ...).
//!
//! Outputs are opaque to the engine: it only collects them in source order
//! and passes nested sequences back into wrapping operations.
//!
//! - **`tree`**: [`TreeRenderer`] builds an [`InlineNode`] tree.

pub mod tree;

pub use tree::{InlineNode, TreeRenderer};

/// One operation per inline construct.
///
/// String arguments arrive already escaped by the engine; implementations
/// must not escape them again.
pub trait Render {
    type Output;

    /// A run of plain text.
    fn text(&self, text: &str) -> Self::Output;

    fn emphasis(&self, inner: Vec<Self::Output>) -> Self::Output;

    fn strong(&self, inner: Vec<Self::Output>) -> Self::Output;

    fn strikethrough(&self, inner: Vec<Self::Output>) -> Self::Output;

    fn code_span(&self, code: &str) -> Self::Output;

    fn link(&self, href: &str, inner: Vec<Self::Output>, title: Option<&str>) -> Self::Output;

    fn image(&self, href: &str, alt: &str, title: Option<&str>) -> Self::Output;

    fn line_break(&self) -> Self::Output;

    /// A footnote reference. `forward` is the id of the note itself,
    /// `backward` the id the note links back to.
    fn footnote_link(&self, forward: &str, backward: &str, ordinal: usize) -> Self::Output;

    /// A raw inline tag, after the sanitize hook ran. Emitted verbatim.
    ///
    /// Defaults to [`Render::text`] for dialects without a raw passthrough.
    fn raw(&self, literal: &str) -> Self::Output {
        self.text(literal)
    }
}
