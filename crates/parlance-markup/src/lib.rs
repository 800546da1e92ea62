//! Compact color markup and placeholder scanning for localized text.
//!
//! Authors write templates with a short color syntax and `{name}` placeholders:
//!
//! ```text
//! &#66ccffHello &l{player}&r, welcome back!
//! ```
//!
//! This crate turns such strings into their canonical forms in three steps:
//!
//! 1. **Expansion**: `&#RRGGBB` becomes the longhand `&x&R&R&G&G&B&B`.
//! 2. **Style markers**: every author prefix becomes the internal marker `§`,
//!    except a doubled prefix (`&&`), which stays as one literal `&`.
//! 3. **Scanning**: `{name}` placeholders are located by byte span, and the
//!    styled text between them is decoded into style runs.
//!
//! # Example
//!
//! ```rust
//! use parlance_markup::{find, parse_spans, Markup, TextStyle};
//!
//! let markup = Markup::new();
//! let expanded = markup.expand("&#66ccff Hello {color} world!");
//! assert_eq!(expanded, "&x&6&6&c&c&f&f Hello {color} world!");
//!
//! let styled = markup.to_style_marker(&expanded);
//! assert_eq!(styled, "§x§6§6§c§c§f§f Hello {color} world!");
//!
//! let placeholders = find(&styled);
//! assert_eq!(placeholders.len(), 1);
//! assert_eq!(placeholders[0].name, "color");
//!
//! let (spans, _) = parse_spans("§lbold§r plain", TextStyle::default());
//! assert_eq!(spans[0].text, "bold");
//! assert!(spans[0].style.bold);
//! ```
//!
//! # Placeholder Syntax
//!
//! A placeholder is `{`, zero or more ASCII word characters (`A-Z`, `a-z`,
//! `0-9`, `_`), then `}`. Anything else involving braces is literal text:
//! there is no nesting and no escaping, and a stray `{` or `}` is never an
//! error.

mod color;
mod placeholder;
mod style;

pub use color::{strip_codes, visible_len, Markup, DEFAULT_PREFIX};
pub use placeholder::{find, split, Placeholder, Token, Tokenizer};
pub use style::{parse_spans, Color, LegacyColor, Span, TextStyle, STYLE_MARKER};
