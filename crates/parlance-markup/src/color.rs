//! Color macro expansion and style-marker conversion.
//!
//! The author-facing prefix (default `&`) introduces both color macros and
//! legacy style codes:
//!
//! | Author form | Meaning |
//! |-------------|---------|
//! | `&#66ccff` | RGB color macro, expanded to `&x&6&6&c&c&f&f` |
//! | `&a`, `&l`, `&r` | legacy color / decoration / reset codes |
//! | `&&` | one literal `&` |

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

use crate::style::STYLE_MARKER;

/// The prefix used when none is configured.
pub const DEFAULT_PREFIX: char = '&';

/// Codes that may follow the prefix in author text (case-insensitive).
const LEGACY_CODES: &str = "0123456789abcdefklmnorx";

/// Markup configuration: which character introduces color and style codes.
///
/// # Example
///
/// ```rust
/// use parlance_markup::Markup;
///
/// let markup = Markup::with_prefix('$');
/// assert_eq!(markup.expand("$#ff9900hi"), "$x$f$f$9$9$0$0hi");
/// assert_eq!(markup.to_style_marker("$ahi $$5"), "§ahi $5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Markup {
    prefix: char,
}

impl Markup {
    /// Creates the default markup (`&` prefix).
    pub const fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX,
        }
    }

    /// Creates markup with a custom prefix character.
    pub const fn with_prefix(prefix: char) -> Self {
        Self { prefix }
    }

    /// Returns the prefix character.
    pub const fn prefix(&self) -> char {
        self.prefix
    }

    /// Expands every `prefix#RRGGBB` macro into its longhand escape.
    ///
    /// Matches are found left to right without overlap. Text without any
    /// macro is returned borrowed and unchanged. Digit case is preserved.
    pub fn expand<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let Some(first) = self.next_macro(text, 0) else {
            return Cow::Borrowed(text);
        };

        // Each macro grows from 8 to 14 prefix-and-digit characters.
        let mut out = String::with_capacity(text.len() + 8);
        let mut last = 0;
        let mut found = Some(first);
        while let Some(start) = found {
            out.push_str(&text[last..start]);
            let digits_at = start + self.prefix.len_utf8() + 1;
            out.push(self.prefix);
            out.push('x');
            for digit in text[digits_at..digits_at + 6].chars() {
                out.push(self.prefix);
                out.push(digit);
            }
            last = digits_at + 6;
            found = self.next_macro(text, last);
        }
        out.push_str(&text[last..]);
        Cow::Owned(out)
    }

    /// Converts author prefixes into the internal style marker.
    ///
    /// Every prefix becomes `§` first; every resulting `§§` then becomes one
    /// literal prefix. The order matters: `&&a` yields `&a` (literal), while
    /// `&a` yields `§a` (a style code).
    pub fn to_style_marker(&self, text: &str) -> String {
        let marker = STYLE_MARKER.to_string();
        let doubled = marker.repeat(2);
        text.replace(self.prefix, &marker)
            .replace(&doubled, self.prefix.encode_utf8(&mut [0; 4]))
    }

    /// Counts the characters of author text that remain visible once color
    /// macros and legacy codes are removed.
    pub fn visible_len(&self, text: &str) -> usize {
        visible_len(text, self.prefix)
    }

    /// Display width (terminal columns) of the visible characters.
    pub fn visible_width(&self, text: &str) -> usize {
        strip_codes(text, self.prefix).width()
    }

    /// Finds the byte offset of the next macro at or after `from`.
    fn next_macro(&self, text: &str, from: usize) -> Option<usize> {
        let mut search = from;
        while let Some(offset) = text[search..].find(self.prefix) {
            let start = search + offset;
            if is_macro_at(text, start, self.prefix) {
                return Some(start);
            }
            search = start + self.prefix.len_utf8();
        }
        None
    }
}

impl Default for Markup {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true when `text[start..]` begins with `prefix#` and six hex digits.
fn is_macro_at(text: &str, start: usize, prefix: char) -> bool {
    let rest = &text[start + prefix.len_utf8()..];
    let Some(hex) = rest.strip_prefix('#') else {
        return false;
    };
    hex.len() >= 6 && hex.as_bytes()[..6].iter().all(u8::is_ascii_hexdigit)
}

/// Counts the visible characters of author text written with `prefix`.
///
/// ```rust
/// assert_eq!(parlance_markup::visible_len("&#66ccff Hello &lworld", '&'), 12);
/// ```
pub fn visible_len(text: &str, prefix: char) -> usize {
    strip_codes(text, prefix).chars().count()
}

/// Removes color macros and legacy codes from author text.
///
/// A doubled prefix is not treated specially: `&&a` strips the `&a` and keeps
/// the first `&`, matching how codes are counted in author text.
///
/// ```rust
/// use parlance_markup::strip_codes;
///
/// assert_eq!(strip_codes("&#66ccffHi &lthere", '&'), "Hi there");
/// assert_eq!(strip_codes("50&% off", '&'), "50&% off");
/// ```
pub fn strip_codes(text: &str, prefix: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(offset) = text[pos..].find(prefix) {
        let start = pos + offset;
        out.push_str(&text[pos..start]);
        let after = start + prefix.len_utf8();
        if is_macro_at(text, start, prefix) {
            pos = after + 7;
        } else if let Some(code) = text[after..].chars().next().filter(|c| is_legacy_code(*c)) {
            pos = after + code.len_utf8();
        } else {
            out.push(prefix);
            pos = after;
        }
    }
    out.push_str(&text[pos..]);
    out
}

fn is_legacy_code(c: char) -> bool {
    LEGACY_CODES.contains(c.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod expand {
        use super::*;

        #[test]
        fn single_macro() {
            let markup = Markup::new();
            assert_eq!(markup.expand("&#66ccff"), "&x&6&6&c&c&f&f");
        }

        #[test]
        fn text_around_macro() {
            let markup = Markup::new();
            assert_eq!(
                markup.expand("a &#66CCFFb c"),
                "a &x&6&6&C&C&F&Fb c"
            );
        }

        #[test]
        fn no_macro_is_borrowed() {
            let markup = Markup::new();
            let out = markup.expand("plain &a text");
            assert!(matches!(out, Cow::Borrowed("plain &a text")));
        }

        #[test]
        fn adjacent_macros_are_independent() {
            let markup = Markup::new();
            assert_eq!(
                markup.expand("&#000000&#ffffff"),
                "&x&0&0&0&0&0&0&x&f&f&f&f&f&f"
            );
        }

        #[test]
        fn short_or_invalid_digits_pass_through() {
            let markup = Markup::new();
            assert_eq!(markup.expand("&#12345"), "&#12345");
            assert_eq!(markup.expand("&#12345g"), "&#12345g");
            assert_eq!(markup.expand("&#"), "&#");
            assert_eq!(markup.expand("&"), "&");
        }

        #[test]
        fn seventh_digit_is_plain_text() {
            let markup = Markup::new();
            assert_eq!(markup.expand("&#1234567"), "&x&1&2&3&4&5&67");
        }

        #[test]
        fn macro_after_multibyte_text() {
            let markup = Markup::new();
            assert_eq!(markup.expand("héllo&#abcdef!"), "héllo&x&a&b&c&d&e&f!");
        }

        #[test]
        fn custom_multibyte_prefix() {
            let markup = Markup::with_prefix('¤');
            assert_eq!(markup.expand("¤#102030"), "¤x¤1¤0¤2¤0¤3¤0");
        }

        #[test]
        fn expansion_is_idempotent() {
            let markup = Markup::new();
            let once = markup.expand("&#66ccff Hello &#ff9900{x}").into_owned();
            assert_eq!(markup.expand(&once), once);
        }
    }

    mod style_marker {
        use super::*;

        #[test]
        fn prefix_becomes_marker() {
            assert_eq!(Markup::new().to_style_marker("&ahi"), "§ahi");
        }

        #[test]
        fn doubled_prefix_is_literal() {
            assert_eq!(Markup::new().to_style_marker("&&x"), "&x");
        }

        #[test]
        fn tripled_prefix_is_literal_then_marker() {
            assert_eq!(Markup::new().to_style_marker("&&&a"), "&§a");
        }

        #[test]
        fn expanded_escape_has_no_doubles() {
            let markup = Markup::new();
            let styled = markup.to_style_marker(&markup.expand("&#66ccff"));
            assert_eq!(styled, "§x§6§6§c§c§f§f");
        }

        #[test]
        fn doubled_prefix_before_macro_misfires() {
            // `&&#66ccff` expands the macro first, so the author's escape
            // swallows the `&x` introducer of the expanded escape.
            let markup = Markup::new();
            let styled = markup.to_style_marker(&markup.expand("&&#66ccff"));
            assert_eq!(styled, "&x§6§6§c§c§f§f");
        }
    }

    mod visible {
        use super::*;

        #[test]
        fn counts_without_codes() {
            let markup = Markup::new();
            assert_eq!(markup.visible_len("&#66ccffHello &lworld"), 11);
        }

        #[test]
        fn codes_are_case_insensitive() {
            let markup = Markup::new();
            assert_eq!(markup.visible_len("&Aa&Lb&Rc&Xd"), 4);
        }

        #[test]
        fn unknown_code_is_visible() {
            let markup = Markup::new();
            assert_eq!(markup.visible_len("&z"), 2);
        }

        #[test]
        fn width_counts_wide_characters() {
            let markup = Markup::new();
            assert_eq!(markup.visible_len("&a日本"), 2);
            assert_eq!(markup.visible_width("&a日本"), 4);
        }

        #[test]
        fn trailing_prefix_is_visible() {
            assert_eq!(strip_codes("end&", '&'), "end&");
        }
    }
}
