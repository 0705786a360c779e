//! Reference tables built by the block-level pass and consumed read-only by
//! the inline scanner.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Target of a reference-style link definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDefinition {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl LinkDefinition {
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            url: url.into(),
            title,
        }
    }
}

/// Normalizes a reference id: whitespace runs collapse to one space and the
/// result is lowercased.
///
/// Both insertion and lookup go through this so `[Foo  Bar]` finds a
/// definition written as `[foo bar]`.
pub fn normalize_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut in_space = false;
    for ch in id.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out.to_lowercase()
}

/// Link reference id to definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, LinkDefinition>")]
pub struct LinkTable {
    entries: HashMap<String, LinkDefinition>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition. The first definition of an id wins, matching how
    /// duplicate definitions behave in documents.
    pub fn insert(&mut self, id: &str, definition: LinkDefinition) {
        self.entries.entry(normalize_id(id)).or_insert(definition);
    }

    pub fn get(&self, id: &str) -> Option<&LinkDefinition> {
        self.entries.get(&normalize_id(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, LinkDefinition>> for LinkTable {
    fn from(raw: HashMap<String, LinkDefinition>) -> Self {
        raw.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<(S, LinkDefinition)> for LinkTable {
    fn from_iter<I: IntoIterator<Item = (S, LinkDefinition)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (id, definition) in iter {
            table.insert(id.as_ref(), definition);
        }
        table
    }
}

/// Footnote id to its ordinal in the document. Ids are matched verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootnoteTable {
    entries: HashMap<String, usize>,
}

impl FootnoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, ordinal: usize) {
        self.entries.insert(id.into(), ordinal);
    }

    pub fn get(&self, id: &str) -> Option<usize> {
        self.entries.get(id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for FootnoteTable {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(id, n)| (id.into(), n)).collect(),
        }
    }
}
