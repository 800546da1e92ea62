//! Multi-line text documents and placeholder substitution.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use parlance_markup::Markup;

use crate::line::{Segment, TemplateLine};
use crate::rich::{Node, RichText};
use crate::value::{PlainValue, SubstitutionValue};

/// Where a placeholder occurrence sits: line index and segment index.
///
/// The segment index always points at a [`Segment::Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceholderLocation {
    pub line: usize,
    pub segment: usize,
}

impl PlaceholderLocation {
    pub const fn new(line: usize, segment: usize) -> Self {
        Self { line, segment }
    }
}

/// An ordered set of template lines with a placeholder index.
///
/// Every line is fully decoded at construction, and substitution returns new
/// values, so a document can be shared freely between threads.
///
/// Two documents are equal when their original lines are equal; derived forms
/// and the markup prefix do not take part in comparison.
///
/// # Example
///
/// ```rust
/// use parlance_render::{PlaceholderLocation, TextDocument};
///
/// let doc = TextDocument::new(["A {x} B", "C {x} D"]);
/// assert_eq!(
///     doc.locations("x"),
///     [PlaceholderLocation::new(0, 1), PlaceholderLocation::new(1, 1)]
/// );
/// assert_eq!(doc.substitute_plain([("x", "Q")]), "A Q B\nC Q D");
/// ```
#[derive(Debug, Clone)]
pub struct TextDocument {
    lines: Vec<TemplateLine>,
    markup: Markup,
    index: HashMap<String, Vec<PlaceholderLocation>>,
    // Distinct names in first-occurrence order
    names: Vec<String>,
}

impl TextDocument {
    /// Builds a document from zero or more lines using the default prefix.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_markup(Markup::new(), lines)
    }

    /// Builds a document with a custom markup prefix.
    pub fn with_markup<I, S>(markup: Markup, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<TemplateLine> = lines
            .into_iter()
            .map(|line| TemplateLine::with_markup(line, &markup))
            .collect();

        let mut index: HashMap<String, Vec<PlaceholderLocation>> = HashMap::new();
        let mut names = Vec::new();
        for (line_index, line) in lines.iter().enumerate() {
            for (segment_index, slot) in line.slots() {
                let location = PlaceholderLocation::new(line_index, segment_index);
                match index.get_mut(&slot.name) {
                    Some(locations) => locations.push(location),
                    None => {
                        names.push(slot.name.clone());
                        index.insert(slot.name.clone(), vec![location]);
                    }
                }
            }
        }

        tracing::trace!(
            lines = lines.len(),
            placeholders = names.len(),
            "built text document"
        );

        Self {
            lines,
            markup,
            index,
            names,
        }
    }

    /// An empty document (no lines).
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    pub fn lines(&self) -> &[TemplateLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&TemplateLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn markup(&self) -> Markup {
        self.markup
    }

    /// Distinct placeholder names, in order of first occurrence.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Every location of `name`, in document order. Empty if unknown.
    pub fn locations(&self, name: &str) -> &[PlaceholderLocation] {
        self.index.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of placeholder occurrences.
    pub fn slot_count(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    /// The author's lines, joined with `\n`.
    pub fn plain_text(&self) -> String {
        self.join(TemplateLine::original)
    }

    /// Lines with color macros expanded, joined with `\n`.
    pub fn expanded_text(&self) -> String {
        self.join(TemplateLine::expanded)
    }

    /// Lines in their `§`-marker form, joined with `\n`.
    pub fn styled_text(&self) -> String {
        self.join(TemplateLine::styled)
    }

    /// Number of visible characters across all lines, ignoring color codes.
    pub fn visible_len(&self) -> usize {
        self.lines
            .iter()
            .map(|line| self.markup.visible_len(line.original()))
            .sum()
    }

    fn join(&self, view: fn(&TemplateLine) -> &str) -> String {
        self.lines.iter().map(view).collect::<Vec<_>>().join("\n")
    }

    /// Replaces `{name}` text in the styled form with plain values.
    ///
    /// Bindings are applied in order, each replacing every literal `{name}`
    /// in the whole joined text. Unbound placeholders stay as `{name}`.
    ///
    /// ```rust
    /// use parlance_render::TextDocument;
    ///
    /// let doc = TextDocument::from("&aPi is {pi}, {unbound} stays");
    /// assert_eq!(doc.substitute_plain([("pi", 3.14159)]), "§aPi is 3.14, {unbound} stays");
    /// ```
    pub fn substitute_plain<I, K, V>(&self, bindings: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PlainValue>,
    {
        let mut text = self.styled_text();
        for (name, value) in bindings {
            let token = format!("{{{}}}", name.as_ref());
            text = text.replace(&token, &value.into().to_string());
        }
        text
    }

    /// Substitutes slots with plain values or fragments, keeping styles.
    ///
    /// Each binding fills every slot indexed under its name. A plain value
    /// becomes a text node with the slot's style; a fragment is cloned in
    /// as-is. If a name is bound twice, the later binding wins. Unbound
    /// slots become `{name}` text in the slot's style.
    ///
    /// ```rust
    /// use parlance_render::{Bindings, Node, TextDocument};
    ///
    /// let doc = TextDocument::from("&lHello {who}");
    /// let rich = doc.substitute_rich(Bindings::new().fragment("who", "<player>"));
    /// assert!(matches!(rich.nodes()[1], Node::Fragment("<player>")));
    /// ```
    pub fn substitute_rich<F, I, K>(&self, bindings: I) -> RichText<F>
    where
        F: Clone,
        I: IntoIterator<Item = (K, SubstitutionValue<F>)>,
        K: AsRef<str>,
    {
        // Resolve every bound slot first, then build the output in one pass
        let mut filled: Vec<Vec<Option<Node<F>>>> = self
            .lines
            .iter()
            .map(|line| line.segments().iter().map(|_| None).collect())
            .collect();

        for (name, value) in bindings {
            let locations = self.locations(name.as_ref());
            if locations.is_empty() {
                continue;
            }
            for location in locations {
                let node = match &value {
                    SubstitutionValue::Fragment(fragment) => Node::Fragment(fragment.clone()),
                    SubstitutionValue::Plain(plain) => {
                        Node::text(plain.to_string(), self.slot_style(*location))
                    }
                };
                filled[location.line][location.segment] = Some(node);
            }
        }

        let mut nodes = Vec::new();
        for (line_index, (line, slots)) in self.lines.iter().zip(filled).enumerate() {
            if line_index > 0 {
                nodes.push(Node::LineBreak);
            }
            for (segment, replacement) in line.segments().iter().zip(slots) {
                match segment {
                    Segment::Text(spans) => nodes.extend(
                        spans
                            .iter()
                            .map(|span| Node::text(span.text.clone(), span.style)),
                    ),
                    Segment::Slot(slot) => nodes.push(
                        replacement.unwrap_or_else(|| Node::text(slot.token(), slot.style)),
                    ),
                }
            }
        }

        RichText::from_nodes(nodes, self.lines.len())
    }

    fn slot_style(&self, location: PlaceholderLocation) -> parlance_markup::TextStyle {
        self.lines[location.line].segments()[location.segment]
            .as_slot()
            .map(|slot| slot.style)
            .unwrap_or_default()
    }
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for TextDocument {
    fn eq(&self, other: &Self) -> bool {
        self.lines.len() == other.lines.len()
            && self
                .lines
                .iter()
                .zip(&other.lines)
                .all(|(a, b)| a.original() == b.original())
    }
}

impl Eq for TextDocument {}

impl Hash for TextDocument {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lines.len().hash(state);
        for line in &self.lines {
            line.original().hash(state);
        }
    }
}

impl From<&str> for TextDocument {
    fn from(line: &str) -> Self {
        Self::new([line])
    }
}

impl From<String> for TextDocument {
    fn from(line: String) -> Self {
        Self::new([line])
    }
}

impl From<Vec<String>> for TextDocument {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl From<&[&str]> for TextDocument {
    fn from(lines: &[&str]) -> Self {
        Self::new(lines.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<S> for TextDocument {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::value::Bindings;
    use proptest::prelude::*;

    fn template_line() -> impl Strategy<Value = String> {
        "[a-c {}&l0-9_]{0,30}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn slot_count_matches_index(lines in prop::collection::vec(template_line(), 0..5)) {
            let doc = TextDocument::new(lines);
            let slots: usize = doc
                .lines()
                .iter()
                .map(|line| line.segments().iter().filter(|s| s.is_slot()).count())
                .sum();
            prop_assert_eq!(slots, doc.slot_count());
            let listed: usize = doc.placeholders().map(|name| doc.locations(name).len()).sum();
            prop_assert_eq!(listed, slots);
        }

        #[test]
        fn unbound_rich_matches_plain_visible_text(line in "[a-z {}_]{0,30}") {
            let doc = TextDocument::from(line.as_str());
            let rich = doc.substitute_rich(Bindings::<String>::new());
            prop_assert_eq!(rich.to_string(), line);
        }

        #[test]
        fn slot_positions_follow_split(line in template_line()) {
            let doc = TextDocument::from(line.as_str());
            let pieces = parlance_markup::split(doc.lines()[0].styled());
            let mut expected = Vec::new();
            let mut index = 0;
            for (k, piece) in pieces.iter().enumerate() {
                if !piece.is_empty() {
                    index += 1;
                }
                if k + 1 < pieces.len() {
                    expected.push(index);
                    index += 1;
                }
            }
            let actual: Vec<_> = doc.lines()[0].slots().map(|(i, _)| i).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn line_breaks_are_lines_minus_one(lines in prop::collection::vec(template_line(), 1..5)) {
            let doc = TextDocument::new(lines.clone());
            let rich = doc.substitute_rich(Bindings::<()>::new());
            let breaks = rich.nodes().iter().filter(|n| matches!(n, Node::LineBreak)).count();
            prop_assert_eq!(breaks, lines.len() - 1);
        }
    }
}
