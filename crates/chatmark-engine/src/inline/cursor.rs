/// Scan position over the source of one inline conversion.
///
/// The scanner only ever looks at the unconsumed remainder and moves forward
/// by whole matches, so positions always sit on character boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    s: &'a str,
    /// Current byte index into `s`.
    i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte offset.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if everything has been consumed.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// The unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or_default()
    }

    /// Advances by `n` bytes, clamped to the end of the input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }
}
