//! # Parlance - Styled Message Templates
//!
//! Parlance turns author-written message templates into styled, parameterized
//! text. Templates use a compact color markup and `{name}` placeholders:
//!
//! ```text
//! &#66ccffHello &l{player}&r, you have &e{coins} coins.
//! ```
//!
//! It provides:
//!
//! - Color macro expansion (`&#RRGGBB`) and legacy style codes (`&a`, `&l`, ...)
//! - Placeholder discovery and a per-document placeholder index
//! - Plain substitution into the styled string form
//! - Rich substitution into a style-preserving tree, with nested fragments
//! - Terminal rendering (ANSI, plain text, or legacy `§` codes)
//! - Language files: whole structs of templates loaded from JSON or YAML
//!
//! ## Core Concepts
//!
//! - [`TextDocument`]: One or more template lines, decoded once at construction
//! - [`Bindings`]: Name/value pairs for rich substitution
//! - [`RichText`]: Substitution output, consumed by a [`Renderer`]
//! - [`Loader`]: Reads and writes language files
//!
//! ## Quick Start
//!
//! ```rust
//! use parlance::{Bindings, OutputMode, Renderer, TerminalRenderer, TextDocument};
//!
//! let doc = TextDocument::from("&aWelcome back, &l{player}&r!");
//!
//! assert_eq!(
//!     doc.substitute_plain([("player", "Ada")]),
//!     "§aWelcome back, §lAda§r!"
//! );
//!
//! let rich = doc.substitute_rich(Bindings::<String>::new().plain("player", "Ada"));
//! let out = TerminalRenderer::new(OutputMode::Text).render(&rich);
//! assert_eq!(out, "Welcome back, Ada!");
//! ```
//!
//! ## Nested Fragments
//!
//! A placeholder can be filled with a pre-built fragment of the caller's own
//! rich-text type. Fragments are inserted as-is and keep their own styling:
//!
//! ```rust
//! use parlance::{Bindings, Node, TextDocument};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Hover { label: String, tooltip: String }
//!
//! let doc = TextDocument::from("&7Click {link} to continue");
//! let link = Hover { label: "here".into(), tooltip: "Opens the shop".into() };
//! let rich = doc.substitute_rich(Bindings::new().fragment("link", link.clone()));
//!
//! assert_eq!(rich.fragments().collect::<Vec<_>>(), [&link]);
//! assert!(matches!(rich.nodes()[1], Node::Fragment(_)));
//! ```
//!
//! ## Language Files
//!
//! See the [`loader`] module. Documents serialize as a string for one line
//! and as a list of strings for several, so language structs simply derive
//! serde.

pub mod loader;

mod error;

// Markup layer (from parlance-markup)
pub use parlance_markup::{
    find, parse_spans, split, strip_codes, visible_len, Color, LegacyColor, Markup, Placeholder,
    Span, TextStyle, Token, Tokenizer, DEFAULT_PREFIX, STYLE_MARKER,
};

// Document and substitution exports (from parlance-render)
pub use parlance_render::{
    Bindings, Node, PlaceholderLocation, PlainValue, RichText, Segment, Slot, SubstitutionValue,
    TemplateLine, TextDocument,
};

// Codec exports (from parlance-render)
pub use parlance_render::{DocumentSeed, FormatError, TextCodec};

// Output exports (from parlance-render)
pub use parlance_render::{rgb_to_ansi256, OutputMode, Renderer, TerminalRenderer};

// Language file store
pub use error::{LoadError, Result};
pub use loader::{Format, Loader};
