//! Text transformations applied by construct handlers: escaping, href
//! encoding, address obfuscation and typographic substitution.

pub mod escape;
pub mod smartypants;

pub use escape::{encode_href, escape_code, escape_html, is_script_href, mangle_email};
pub use smartypants::smartypants;
