//! Error types for the text codec.
//!
//! Decoding is the only fallible operation in this crate: template
//! construction and substitution never fail. Unbound placeholders, stray
//! braces and unknown style codes are rendered as literal text instead.

use thiserror::Error;

/// A persisted value did not have the shape of a text document.
///
/// Documents persist as a scalar (one line) or a sequence of scalars
/// (several lines); anything else is rejected rather than coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The value is neither a scalar nor a sequence.
    #[error("expected a string or a sequence of strings, found {found}")]
    UnexpectedShape { found: &'static str },

    /// A sequence element is not a scalar.
    #[error("expected a scalar at line {index} of the text, found {found}")]
    NonScalarLine { index: usize, found: &'static str },
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, FormatError>;
