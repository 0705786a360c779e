//! # chatmark-engine
//!
//! Inline markdown conversion for chat-bot message templates.
//!
//! Text goes in, a sequence of outputs from a caller-supplied [`Render`]
//! implementation comes out. The grammar is selected by [`Options`]: plain,
//! GitHub flavored (optionally with newline breaks), pedantic, with or
//! without footnotes.
//!
//! ```
//! use chatmark_engine::{
//!     Context, FootnoteTable, InlineNode, LinkTable, Options, TreeRenderer, convert,
//! };
//!
//! let (links, footnotes) = (LinkTable::new(), FootnoteTable::new());
//! let ctx = Context::new(&Options::default(), &links, &footnotes, &TreeRenderer);
//! let nodes = convert("hi *there*", &ctx).unwrap();
//! assert_eq!(nodes[0], InlineNode::Text("hi ".into()));
//! ```

pub mod error;
pub mod inline;
pub mod options;
pub mod references;
pub mod render;
pub mod text;

pub use error::ConvertError;
pub use inline::{Context, RuleName, RuleSet, convert, convert_lines, scan_spans};
pub use options::{Flavor, Options};
pub use references::{FootnoteTable, LinkDefinition, LinkTable, normalize_id};
pub use render::{InlineNode, Render, TreeRenderer};
