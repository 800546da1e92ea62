//! # Parlance Render - Template Documents and Rich Substitution
//!
//! `parlance-render` turns author template strings into pre-computed documents
//! and fills their placeholders, either as a plain styled string or as a
//! renderer-neutral rich-text tree.
//!
//! This crate is the engine behind the `parlance` facade, but can be used on
//! its own by anything that needs styled, parameterized messages.
//!
//! ## Core Concepts
//!
//! - [`TemplateLine`]: One line with its expanded, styled and segmented forms
//! - [`TextDocument`]: Ordered lines plus a `name -> locations` placeholder index
//! - [`SubstitutionValue`]: A plain value or a pre-built rich fragment
//! - [`RichText`]: The result of rich substitution, consumed by a [`Renderer`]
//! - [`TextCodec`]: The scalar-or-sequence persistence contract
//!
//! ## Quick Start
//!
//! ```rust
//! use parlance_render::{Bindings, OutputMode, Renderer, TerminalRenderer, TextDocument};
//!
//! let doc = TextDocument::new(["&6Balance: &l{amount}", "&7Updated {when}"]);
//!
//! // Plain substitution works on the styled form
//! let plain = doc.substitute_plain([("amount", "12.50"), ("when", "now")]);
//! assert_eq!(plain, "§6Balance: §l12.50\n§7Updated now");
//!
//! // Rich substitution keeps each slot's style on the value
//! let rich = doc.substitute_rich(
//!     Bindings::<String>::new()
//!         .plain("amount", 12.5)
//!         .plain("when", "now"),
//! );
//! let text = TerminalRenderer::new(OutputMode::Text).render(&rich);
//! assert_eq!(text, "Balance: 12.50\nUpdated now");
//! ```
//!
//! ## Segments
//!
//! Each line decodes into alternating text and slot segments. Text segments
//! are lists of [`Span`]s; a slot records the style in effect where its
//! placeholder appears, so substituted values look like the text around them.
//!
//! ```rust
//! use parlance_render::{Segment, TemplateLine};
//!
//! let line = TemplateLine::new("&cWarning: {msg}");
//! match &line.segments()[1] {
//!     Segment::Slot(slot) => {
//!         assert_eq!(slot.name, "msg");
//!         assert!(slot.style.color.is_some());
//!     }
//!     Segment::Text(_) => unreachable!(),
//! }
//! ```

mod codec;
mod document;
mod error;
mod line;
mod output;
mod rich;
mod util;
mod value;

pub use codec::{DocumentSeed, TextCodec};
pub use document::{PlaceholderLocation, TextDocument};
pub use error::{FormatError, Result};
pub use line::{Segment, Slot, TemplateLine};
pub use output::{OutputMode, Renderer, TerminalRenderer};
pub use rich::{Node, RichText};
pub use util::rgb_to_ansi256;
pub use value::{Bindings, PlainValue, SubstitutionValue};

pub use parlance_markup::{Color, LegacyColor, Markup, Span, TextStyle, STYLE_MARKER};
