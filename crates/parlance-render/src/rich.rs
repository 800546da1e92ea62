//! The renderer-facing result of rich substitution.

use std::fmt;

use parlance_markup::TextStyle;

/// One node of substituted rich text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<F> {
    /// Text with the style copied from the template.
    Text { content: String, style: TextStyle },
    /// A caller fragment, untouched.
    Fragment(F),
    /// Separates two template lines.
    LineBreak,
}

impl<F> Node<F> {
    pub fn text(content: impl Into<String>, style: TextStyle) -> Self {
        Node::Text {
            content: content.into(),
            style,
        }
    }
}

/// A flat sequence of nodes, one run per template line, with
/// [`Node::LineBreak`] between lines.
///
/// A document with `n` lines always contains exactly `n - 1` line breaks
/// (none for an empty document).
#[derive(Debug, Clone, PartialEq)]
pub struct RichText<F> {
    nodes: Vec<Node<F>>,
    line_count: usize,
}

impl<F> RichText<F> {
    pub(crate) fn from_nodes(nodes: Vec<Node<F>>, line_count: usize) -> Self {
        Self { nodes, line_count }
    }

    pub fn nodes(&self) -> &[Node<F>] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node<F>> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of template lines this text was built from.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Iterates over the nodes of each line, without the line breaks.
    pub fn lines(&self) -> impl Iterator<Item = &[Node<F>]> {
        self.nodes
            .split(|node| matches!(node, Node::LineBreak))
            .take(self.line_count)
    }

    /// Iterates over the fragments in output order.
    pub fn fragments(&self) -> impl Iterator<Item = &F> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Fragment(fragment) => Some(fragment),
            _ => None,
        })
    }
}

impl<F> IntoIterator for RichText<F> {
    type Item = Node<F>;
    type IntoIter = std::vec::IntoIter<Node<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// Writes the unstyled content, fragments via their own `Display`.
impl<F: fmt::Display> fmt::Display for RichText<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            match node {
                Node::Text { content, .. } => f.write_str(content)?,
                Node::Fragment(fragment) => write!(f, "{}", fragment)?,
                Node::LineBreak => f.write_str("\n")?,
            }
        }
        Ok(())
    }
}
