//! Values substituted into placeholder slots.
//!
//! A [`SubstitutionValue`] is either a [`PlainValue`], rendered to text and
//! styled like the slot it fills, or a caller-built fragment inserted
//! verbatim. The variant is chosen once, when the binding is created.
//!
//! # Number Formatting
//!
//! Floating-point values always print with exactly two fractional digits,
//! truncated toward zero rather than rounded:
//!
//! ```rust
//! use parlance_render::PlainValue;
//!
//! assert_eq!(PlainValue::from(3.14159).to_string(), "3.14");
//! assert_eq!(PlainValue::from(3.149).to_string(), "3.14");
//! assert_eq!(PlainValue::from(-2.5).to_string(), "-2.50");
//! assert_eq!(PlainValue::from(42).to_string(), "42");
//! ```

use std::fmt;

/// A value rendered to text at substitution time.
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for PlainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlainValue::Text(s) => f.write_str(s),
            PlainValue::Integer(n) => write!(f, "{}", n),
            PlainValue::Unsigned(n) => write!(f, "{}", n),
            PlainValue::Float(x) => f.write_str(&format_truncated(*x)),
            PlainValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Formats a float with two fractional digits, truncating toward zero.
///
/// Truncation works on the shortest decimal representation of the value, so
/// `0.29` prints as `0.29` even though its binary value is slightly below.
/// A result of zero never carries a sign.
fn format_truncated(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let repr = value.to_string();
    let (negative, digits) = match repr.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, repr.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut fixed: String = fraction.chars().take(2).collect();
    while fixed.len() < 2 {
        fixed.push('0');
    }

    let is_zero = whole.bytes().all(|b| b == b'0') && fixed == "00";
    let sign = if negative && !is_zero { "-" } else { "" };
    format!("{}{}.{}", sign, whole, fixed)
}

macro_rules! plain_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for PlainValue {
                fn from(value: $ty) -> Self {
                    PlainValue::$variant(value.into())
                }
            }
        )*
    };
}

plain_from!(Integer: i8, i16, i32, i64);
plain_from!(Unsigned: u8, u16, u32, u64);
plain_from!(Float: f64);
plain_from!(Bool: bool);
plain_from!(Text: String, &str, char);

// Widening keeps the f32's own shortest digits, so 0.29f32 stays 0.29.
impl From<f32> for PlainValue {
    fn from(value: f32) -> Self {
        PlainValue::Float(value.to_string().parse().unwrap_or(value as f64))
    }
}

impl From<usize> for PlainValue {
    fn from(value: usize) -> Self {
        PlainValue::Unsigned(value as u64)
    }
}

impl From<isize> for PlainValue {
    fn from(value: isize) -> Self {
        PlainValue::Integer(value as i64)
    }
}

impl From<&String> for PlainValue {
    fn from(value: &String) -> Self {
        PlainValue::Text(value.clone())
    }
}

/// A value bound to a placeholder name for rich substitution.
///
/// `F` is the caller's rich-text fragment type; fragments are cloned into the
/// output once per slot they fill and are never re-styled.
#[derive(Debug, Clone, PartialEq)]
pub enum SubstitutionValue<F> {
    /// Rendered to text and styled like the slot it replaces.
    Plain(PlainValue),
    /// Inserted as-is.
    Fragment(F),
}

impl<F> SubstitutionValue<F> {
    pub fn plain(value: impl Into<PlainValue>) -> Self {
        SubstitutionValue::Plain(value.into())
    }

    pub fn fragment(fragment: F) -> Self {
        SubstitutionValue::Fragment(fragment)
    }
}

impl<F> From<PlainValue> for SubstitutionValue<F> {
    fn from(value: PlainValue) -> Self {
        SubstitutionValue::Plain(value)
    }
}

/// An ordered list of name/value bindings.
///
/// Order matters: bindings are applied in insertion order, and repeating a
/// name is allowed.
///
/// ```rust
/// use parlance_render::{Bindings, TextDocument};
///
/// let doc = TextDocument::from("{who} has {n} coins");
/// let bindings = Bindings::<String>::new()
///     .plain("who", "Ada")
///     .plain("n", 12);
/// assert_eq!(doc.substitute_rich(bindings).to_string(), "Ada has 12 coins");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings<F> {
    entries: Vec<(String, SubstitutionValue<F>)>,
}

impl<F> Bindings<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Binds a plain value.
    pub fn plain(mut self, name: impl Into<String>, value: impl Into<PlainValue>) -> Self {
        self.entries
            .push((name.into(), SubstitutionValue::Plain(value.into())));
        self
    }

    /// Binds a pre-built fragment.
    pub fn fragment(mut self, name: impl Into<String>, fragment: F) -> Self {
        self.entries
            .push((name.into(), SubstitutionValue::Fragment(fragment)));
        self
    }

    /// Adds a binding in place.
    pub fn insert(&mut self, name: impl Into<String>, value: SubstitutionValue<F>) {
        self.entries.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubstitutionValue<F>)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<F> Default for Bindings<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> IntoIterator for Bindings<F> {
    type Item = (String, SubstitutionValue<F>);
    type IntoIter = std::vec::IntoIter<(String, SubstitutionValue<F>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<F, K: Into<String>> FromIterator<(K, SubstitutionValue<F>)> for Bindings<F> {
    fn from_iter<I: IntoIterator<Item = (K, SubstitutionValue<F>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
