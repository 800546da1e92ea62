//! A single template line and its segment decomposition.

use parlance_markup::{parse_spans, Markup, Span, TextStyle, Token, Tokenizer};

/// A placeholder slot inside a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Placeholder name, without braces.
    pub name: String,
    /// Style in effect where the placeholder appears.
    pub style: TextStyle,
}

impl Slot {
    /// The literal `{name}` form of this slot.
    pub fn token(&self) -> String {
        format!("{{{}}}", self.name)
    }
}

/// One element of a line: styled text or a placeholder slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Visible text as style runs.
    Text(Vec<Span>),
    /// A substitutable placeholder.
    Slot(Slot),
}

impl Segment {
    pub fn is_slot(&self) -> bool {
        matches!(self, Segment::Slot(_))
    }

    pub fn as_slot(&self) -> Option<&Slot> {
        match self {
            Segment::Slot(slot) => Some(slot),
            Segment::Text(_) => None,
        }
    }
}

/// One line of a template, with all derived forms computed up front.
///
/// | Field | Content |
/// |-------|---------|
/// | `original` | the author's text |
/// | `expanded` | color macros expanded to longhand |
/// | `styled` | prefixes converted to `§` markers |
/// | `segments` | text runs and slots decoded from `styled` |
///
/// The line is immutable; a changed template needs a new line.
///
/// ```rust
/// use parlance_render::{Segment, TemplateLine};
///
/// let line = TemplateLine::new("&aHello {name}!");
/// assert_eq!(line.styled(), "§aHello {name}!");
/// assert_eq!(line.segments().len(), 3);
/// assert!(line.segments()[1].is_slot());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateLine {
    original: String,
    expanded: String,
    styled: String,
    segments: Vec<Segment>,
}

impl TemplateLine {
    /// Builds a line using the default `&` prefix.
    pub fn new(original: impl Into<String>) -> Self {
        Self::with_markup(original, &Markup::new())
    }

    /// Builds a line with a custom markup prefix.
    pub fn with_markup(original: impl Into<String>, markup: &Markup) -> Self {
        let original = original.into();
        let expanded = markup.expand(&original).into_owned();
        let styled = markup.to_style_marker(&expanded);
        let segments = Self::decompose(&styled);
        Self {
            original,
            expanded,
            styled,
            segments,
        }
    }

    /// Splits styled text into alternating text and slot segments.
    ///
    /// Style state starts plain and carries across slots. Every non-empty text
    /// piece becomes a segment, even one made only of style codes, so slot
    /// indices line up with [`split`](parlance_markup::split) on the styled text.
    fn decompose(styled: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut style = TextStyle::default();

        for token in Tokenizer::new(styled) {
            match token {
                Token::Text(text) => {
                    let (spans, end) = parse_spans(text, style);
                    style = end;
                    segments.push(Segment::Text(spans));
                }
                Token::Placeholder(placeholder) => segments.push(Segment::Slot(Slot {
                    name: placeholder.name.to_string(),
                    style,
                })),
            }
        }

        if segments.is_empty() {
            segments.push(Segment::Text(Vec::new()));
        }
        segments
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn expanded(&self) -> &str {
        &self.expanded
    }

    pub fn styled(&self) -> &str {
        &self.styled
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterates over the slots with their segment indices.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, segment)| segment.as_slot().map(|slot| (i, slot)))
    }
}

impl From<&str> for TemplateLine {
    fn from(original: &str) -> Self {
        Self::new(original)
    }
}

impl From<String> for TemplateLine {
    fn from(original: String) -> Self {
        Self::new(original)
    }
}
