//! Persistence of text documents as a scalar or a sequence of scalars.
//!
//! | Lines | Encoded as |
//! |-------|------------|
//! | 0 | `""` |
//! | 1 | the line, as a bare string |
//! | 2+ | a sequence of strings |
//!
//! Decoding accepts a scalar (string, number or boolean) as a one-line
//! document and a sequence of scalars as one line per element. Objects, nulls
//! and nested sequences are rejected.
//!
//! An empty document encodes as `""`, which decodes as one empty line.
//!
//! [`TextDocument`] implements `Serialize` and `Deserialize` with the default
//! prefix, so structs of documents derive serde directly:
//!
//! ```rust
//! use parlance_render::TextDocument;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Messages {
//!     welcome: TextDocument,
//!     help: TextDocument,
//! }
//!
//! let json = r#"{"welcome": "&aHello {player}", "help": ["Line one", "Line two"]}"#;
//! let messages: Messages = serde_json::from_str(json).unwrap();
//! assert_eq!(messages.help.len(), 2);
//! assert_eq!(messages.welcome.placeholders().collect::<Vec<_>>(), ["player"]);
//! ```

use std::fmt;

use parlance_markup::Markup;
use serde::de::{self, DeserializeSeed, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::document::TextDocument;
use crate::error::{FormatError, Result};

/// Encodes and decodes documents, building them with a given markup prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCodec {
    markup: Markup,
}

impl TextCodec {
    /// A codec using the default `&` prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the markup used for decoded documents.
    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    pub fn markup(&self) -> Markup {
        self.markup
    }

    /// Encodes a document's original lines as a JSON value.
    pub fn encode(&self, document: &TextDocument) -> Value {
        match document.lines() {
            [] => Value::String(String::new()),
            [line] => Value::String(line.original().to_string()),
            lines => Value::Array(
                lines
                    .iter()
                    .map(|line| Value::String(line.original().to_string()))
                    .collect(),
            ),
        }
    }

    /// Decodes a JSON value into a document.
    ///
    /// ```rust
    /// use parlance_render::{FormatError, TextCodec};
    /// use serde_json::json;
    ///
    /// let codec = TextCodec::new();
    /// assert_eq!(codec.decode(&json!(["a", 2, true]))?.plain_text(), "a\n2\ntrue");
    /// assert!(codec.decode(&json!({"a": 1})).is_err());
    /// # Ok::<(), FormatError>(())
    /// ```
    pub fn decode(&self, value: &Value) -> Result<TextDocument> {
        let lines = match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    scalar_text(item).ok_or(FormatError::NonScalarLine {
                        index,
                        found: describe(item),
                    })
                })
                .collect::<Result<Vec<_>>>(),
            other => scalar_text(other)
                .map(|line| vec![line])
                .ok_or(FormatError::UnexpectedShape {
                    found: describe(other),
                }),
        };

        match lines {
            Ok(lines) => Ok(TextDocument::with_markup(self.markup, lines)),
            Err(err) => {
                tracing::debug!(error = %err, "rejected persisted text");
                Err(err)
            }
        }
    }

    /// Writes a document to any serde format.
    pub fn serialize<S: Serializer>(
        &self,
        document: &TextDocument,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match document.lines() {
            [] => serializer.serialize_str(""),
            [line] => serializer.serialize_str(line.original()),
            lines => serializer.collect_seq(lines.iter().map(|line| line.original())),
        }
    }

    /// Reads a document from any self-describing serde format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> std::result::Result<TextDocument, D::Error> {
        self.seed().deserialize(deserializer)
    }

    /// A `DeserializeSeed` that builds documents with this codec's markup.
    pub fn seed(&self) -> DocumentSeed {
        DocumentSeed {
            markup: self.markup,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Writes a float the way a `serde_json::Value` number prints, so every
/// decode path turns the same number into the same line.
fn float_text(value: f64) -> String {
    serde_json::Number::from_f64(value)
        .map(|n| n.to_string())
        .unwrap_or_else(|| value.to_string())
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}

/// Deserializes a [`TextDocument`] with a chosen markup prefix.
///
/// ```rust
/// use parlance_markup::Markup;
/// use parlance_render::TextCodec;
/// use serde::de::DeserializeSeed;
///
/// let codec = TextCodec::new().with_markup(Markup::with_prefix('$'));
/// let mut de = serde_json::Deserializer::from_str(r#""$aHi""#);
/// let doc = codec.seed().deserialize(&mut de).unwrap();
/// assert_eq!(doc.styled_text(), "§aHi");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DocumentSeed {
    markup: Markup,
}

impl<'de> DeserializeSeed<'de> for DocumentSeed {
    type Value = TextDocument;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<TextDocument, D::Error> {
        deserializer.deserialize_any(DocumentVisitor {
            markup: self.markup,
        })
    }
}

struct DocumentVisitor {
    markup: Markup,
}

impl DocumentVisitor {
    fn single(self, line: String) -> TextDocument {
        TextDocument::with_markup(self.markup, [line])
    }
}

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = TextDocument;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or a sequence of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<TextDocument, E> {
        Ok(self.single(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<TextDocument, E> {
        Ok(self.single(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<TextDocument, E> {
        Ok(self.single(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<TextDocument, E> {
        Ok(self.single(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<TextDocument, E> {
        Ok(self.single(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<TextDocument, E> {
        Ok(self.single(float_text(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<TextDocument, A::Error> {
        let mut lines = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(line) = seq.next_element_seed(LineSeed)? {
            lines.push(line);
        }
        Ok(TextDocument::with_markup(self.markup, lines))
    }
}

/// One sequence element: any scalar, as text.
struct LineSeed;

impl<'de> DeserializeSeed<'de> for LineSeed {
    type Value = String;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<String, D::Error> {
        deserializer.deserialize_any(LineSeed)
    }
}

impl<'de> Visitor<'de> for LineSeed {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar line of text")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
        Ok(float_text(v))
    }
}

impl Serialize for TextDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        TextCodec::new()
            .with_markup(self.markup())
            .serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for TextDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        TextCodec::new().deserialize(deserializer)
    }
}
