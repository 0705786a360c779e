use serde::{Deserialize, Serialize};

/// Feature flags controlling which inline grammar is used and which text
/// hooks run.
///
/// Deserializes from a partial table; missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// GitHub flavored extensions: bare URLs, `~~strikethrough~~`, `\~` escapes.
    pub gfm: bool,
    /// Treat every newline as a hard break. Only honoured together with `gfm`.
    pub breaks: bool,
    /// Stricter emphasis grammar. Ignored when `gfm` is on.
    pub pedantic: bool,
    /// Recognise `[^id]` footnote references.
    pub footnotes: bool,
    /// Escape raw inline tags and neutralize script link targets.
    pub sanitize: bool,
    /// Typographic quotes, dashes and ellipses in plain text.
    pub smartypants: bool,
    /// Turn bare `http://` and `https://` URLs into links. Only honoured
    /// together with `gfm`.
    pub bare_urls: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: false,
            pedantic: false,
            footnotes: false,
            sanitize: false,
            smartypants: false,
            bare_urls: false,
        }
    }
}

/// The grammar variant selected by a combination of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Normal,
    Pedantic,
    Gfm,
    GfmBreaks,
}

impl Options {
    /// Resolves the effective grammar flavor.
    ///
    /// `breaks` has no effect without `gfm`, and `pedantic` has no effect with it.
    pub fn flavor(&self) -> Flavor {
        match (self.gfm, self.breaks, self.pedantic) {
            (true, true, _) => Flavor::GfmBreaks,
            (true, false, _) => Flavor::Gfm,
            (false, _, true) => Flavor::Pedantic,
            (false, _, false) => Flavor::Normal,
        }
    }
}
