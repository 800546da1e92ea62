//! `{name}` placeholder scanning.
//!
//! Offsets reported here are byte offsets into the scanned string, with an
//! exclusive end, so `&text[p.start..p.end]` is always the `{name}` token.

/// A placeholder occurrence within a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder<'a> {
    /// The name between the braces (may be empty).
    pub name: &'a str,
    /// Byte offset of the opening `{`.
    pub start: usize,
    /// Byte offset just past the closing `}`.
    pub end: usize,
}

/// Token types produced by the [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text, including any braces that are not placeholders.
    Text(&'a str),
    /// A `{name}` placeholder.
    Placeholder(Placeholder<'a>),
}

/// Splits a string into alternating text and placeholder tokens.
///
/// Text tokens are never empty; two placeholders in a row produce two
/// consecutive placeholder tokens.
///
/// ```rust
/// use parlance_markup::{Token, Tokenizer};
///
/// let tokens: Vec<_> = Tokenizer::new("Hi {name}!").collect();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[0], Token::Text("Hi "));
/// assert_eq!(tokens[2], Token::Text("!"));
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn is_name_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_'
    }

    /// Returns the byte length of the placeholder starting at `s[0] == '{'`.
    fn match_placeholder(s: &str) -> Option<usize> {
        let bytes = s.as_bytes();
        let mut i = 1;
        while i < bytes.len() && Self::is_name_byte(bytes[i]) {
            i += 1;
        }
        (bytes.get(i) == Some(&b'}')).then_some(i + 1)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];
        let mut search = 0;

        while let Some(offset) = remaining[search..].find('{') {
            let open = search + offset;
            if let Some(len) = Self::match_placeholder(&remaining[open..]) {
                if open > 0 {
                    // Emit the text first; the placeholder is found again next call
                    self.pos += open;
                    return Some(Token::Text(&remaining[..open]));
                }
                let start = self.pos;
                let end = start + len;
                self.pos = end;
                return Some(Token::Placeholder(Placeholder {
                    name: &self.input[start + 1..end - 1],
                    start,
                    end,
                }));
            }
            // Not a placeholder - the brace is literal
            search = open + 1;
        }

        self.pos = self.input.len();
        Some(Token::Text(remaining))
    }
}

/// Finds every placeholder in `text`, in order.
///
/// ```rust
/// use parlance_markup::find;
///
/// let found = find("{a} and {b_2} but not {c-d} or {{e}");
/// let names: Vec<_> = found.iter().map(|p| p.name).collect();
/// assert_eq!(names, ["a", "b_2", "e"]);
/// assert_eq!((found[0].start, found[0].end), (0, 3));
/// ```
pub fn find(text: &str) -> Vec<Placeholder<'_>> {
    Tokenizer::new(text)
        .filter_map(|token| match token {
            Token::Placeholder(p) => Some(p),
            Token::Text(_) => None,
        })
        .collect()
}

/// Splits `text` into the pieces between placeholders.
///
/// The result always has one more element than [`find`] returns; leading,
/// trailing and in-between pieces may be empty.
///
/// ```rust
/// use parlance_markup::split;
///
/// assert_eq!(split("{color} apple!"), ["", " apple!"]);
/// assert_eq!(split("wow, {something}"), ["wow, ", ""]);
/// assert_eq!(split("plain text"), ["plain text"]);
/// ```
pub fn split(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for placeholder in find(text) {
        pieces.push(&text[last..placeholder.start]);
        last = placeholder.end;
    }
    pieces.push(&text[last..]);
    pieces
}
