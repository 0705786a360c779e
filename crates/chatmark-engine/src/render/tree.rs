use super::Render;

/// Renderer output as a plain tree, one node per construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(String),
    Raw(String),
    Emphasis(Vec<InlineNode>),
    Strong(Vec<InlineNode>),
    Strikethrough(Vec<InlineNode>),
    CodeSpan(String),
    Link {
        href: String,
        title: Option<String>,
        children: Vec<InlineNode>,
    },
    Image {
        href: String,
        alt: String,
        title: Option<String>,
    },
    LineBreak,
    FootnoteRef {
        forward: String,
        backward: String,
        ordinal: usize,
    },
}

impl InlineNode {
    /// Concatenated text content of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            InlineNode::Text(s) | InlineNode::Raw(s) | InlineNode::CodeSpan(s) => out.push_str(s),
            InlineNode::Emphasis(children)
            | InlineNode::Strong(children)
            | InlineNode::Strikethrough(children)
            | InlineNode::Link { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            InlineNode::Image { alt, .. } => out.push_str(alt),
            InlineNode::LineBreak => out.push('\n'),
            InlineNode::FootnoteRef { ordinal, .. } => out.push_str(&ordinal.to_string()),
        }
    }
}

/// Builds [`InlineNode`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRenderer;

impl Render for TreeRenderer {
    type Output = InlineNode;

    fn text(&self, text: &str) -> InlineNode {
        InlineNode::Text(text.to_string())
    }

    fn emphasis(&self, inner: Vec<InlineNode>) -> InlineNode {
        InlineNode::Emphasis(inner)
    }

    fn strong(&self, inner: Vec<InlineNode>) -> InlineNode {
        InlineNode::Strong(inner)
    }

    fn strikethrough(&self, inner: Vec<InlineNode>) -> InlineNode {
        InlineNode::Strikethrough(inner)
    }

    fn code_span(&self, code: &str) -> InlineNode {
        InlineNode::CodeSpan(code.to_string())
    }

    fn link(&self, href: &str, inner: Vec<InlineNode>, title: Option<&str>) -> InlineNode {
        InlineNode::Link {
            href: href.to_string(),
            title: title.map(str::to_string),
            children: inner,
        }
    }

    fn image(&self, href: &str, alt: &str, title: Option<&str>) -> InlineNode {
        InlineNode::Image {
            href: href.to_string(),
            alt: alt.to_string(),
            title: title.map(str::to_string),
        }
    }

    fn line_break(&self) -> InlineNode {
        InlineNode::LineBreak
    }

    fn footnote_link(&self, forward: &str, backward: &str, ordinal: usize) -> InlineNode {
        InlineNode::FootnoteRef {
            forward: forward.to_string(),
            backward: backward.to_string(),
            ordinal,
        }
    }

    fn raw(&self, literal: &str) -> InlineNode {
        InlineNode::Raw(literal.to_string())
    }
}
