//! Rendering rich text to strings.
//!
//! The [`OutputMode`] enum decides how styles are written:
//!
//! - `Auto` - Detect terminal capabilities automatically (default behavior)
//! - `Term` - ANSI escape codes
//! - `Text` - Content only, no styling
//! - `Legacy` - `§` style codes, readable by clients that speak the legacy format
//!
//! # Example
//!
//! ```rust
//! use parlance_render::{Bindings, OutputMode, Renderer, TerminalRenderer, TextDocument};
//!
//! let doc = TextDocument::from("&aHello {who}");
//! let rich = doc.substitute_rich(Bindings::<String>::new().plain("who", "Ada"));
//!
//! let plain = TerminalRenderer::new(OutputMode::Text).render(&rich);
//! assert_eq!(plain, "Hello Ada");
//!
//! let legacy = TerminalRenderer::new(OutputMode::Legacy).render(&rich);
//! assert_eq!(legacy, "§aHello Ada");
//! ```

use std::fmt::{self, Write};

use console::Term;
use parlance_markup::{TextStyle, STYLE_MARKER};

use crate::rich::{Node, RichText};
use crate::util::to_console_style;

/// Controls how styles are written by [`TerminalRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Auto-detect terminal capabilities
    #[default]
    Auto,
    /// Always use ANSI escape codes (terminal output)
    Term,
    /// Never write styles (plain text)
    Text,
    /// Write `§` style codes
    Legacy,
}

impl OutputMode {
    /// Resolves the output mode to a concrete decision about whether to use color.
    ///
    /// - `Auto` checks terminal capabilities
    /// - `Term` always returns `true`
    /// - `Text` and `Legacy` return `false`
    pub fn should_use_color(&self) -> bool {
        match self {
            OutputMode::Auto => Term::stdout().features().colors_supported(),
            OutputMode::Term => true,
            OutputMode::Text => false,
            OutputMode::Legacy => false,
        }
    }

    /// Returns true if styles are written as `§` codes.
    pub fn is_legacy(&self) -> bool {
        matches!(self, OutputMode::Legacy)
    }
}

/// Turns rich text into some output form.
///
/// Substitution produces a renderer-neutral [`RichText`]; implementations
/// decide what styles and fragments become.
pub trait Renderer<F> {
    type Output;

    fn render(&self, text: &RichText<F>) -> Self::Output;
}

/// Renders rich text to a `String` for terminals or legacy clients.
///
/// Fragments are written through their `Display` implementation and are
/// never styled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalRenderer {
    mode: OutputMode,
}

impl TerminalRenderer {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn write_styled<F: fmt::Display>(&self, out: &mut String, text: &RichText<F>) -> fmt::Result {
        for node in text.nodes() {
            match node {
                Node::Text { content, style } if !style.is_plain() => {
                    write!(out, "{}", to_console_style(style).force_styling(true).apply_to(content))?
                }
                Node::Text { content, .. } => out.push_str(content),
                Node::Fragment(fragment) => write!(out, "{}", fragment)?,
                Node::LineBreak => out.push('\n'),
            }
        }
        Ok(())
    }

    fn write_legacy<F: fmt::Display>(&self, out: &mut String, text: &RichText<F>) -> fmt::Result {
        // None after a fragment: its effect on the style is unknown
        let mut current = Some(TextStyle::default());
        for node in text.nodes() {
            match node {
                Node::Text { content, style } => {
                    match current {
                        Some(previous) => out.push_str(&previous.transition_to(style)),
                        None => {
                            // A color code clears decorations on its own
                            if style.color.is_none() {
                                out.push(STYLE_MARKER);
                                out.push('r');
                            }
                            out.push_str(&style.to_legacy());
                        }
                    }
                    out.push_str(content);
                    current = Some(*style);
                }
                Node::Fragment(fragment) => {
                    write!(out, "{}", fragment)?;
                    current = None;
                }
                Node::LineBreak => {
                    out.push('\n');
                    current = Some(TextStyle::default());
                }
            }
        }
        Ok(())
    }
}

impl<F: fmt::Display> Renderer<F> for TerminalRenderer {
    type Output = String;

    fn render(&self, text: &RichText<F>) -> String {
        let mut out = String::new();
        let result = match self.mode {
            OutputMode::Legacy => self.write_legacy(&mut out, text),
            mode if mode.should_use_color() => self.write_styled(&mut out, text),
            _ => write!(out, "{}", text),
        };
        if result.is_err() {
            tracing::debug!("fragment formatting failed during render");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bindings, TextDocument};

    fn render(mode: OutputMode, rich: &RichText<String>) -> String {
        TerminalRenderer::new(mode).render(rich)
    }

    mod modes {
        use super::*;

        #[test]
        fn test_output_mode_default_is_auto() {
            assert_eq!(OutputMode::default(), OutputMode::Auto);
            assert_eq!(TerminalRenderer::default().mode(), OutputMode::Auto);
        }

        #[test]
        fn test_output_mode_term_should_use_color() {
            assert!(OutputMode::Term.should_use_color());
        }

        #[test]
        fn test_output_mode_text_and_legacy_should_not_use_color() {
            assert!(!OutputMode::Text.should_use_color());
            assert!(!OutputMode::Legacy.should_use_color());
            assert!(OutputMode::Legacy.is_legacy());
            assert!(!OutputMode::Term.is_legacy());
        }
    }

    mod text {
        use super::*;

        #[test]
        fn test_text_strips_styles() {
            let doc = TextDocument::new(["&a&lOK {n}", "&#ff0000second"]);
            let rich = doc.substitute_rich(Bindings::new().plain("n", 3));
            assert_eq!(render(OutputMode::Text, &rich), "OK 3\nsecond");
        }

        #[test]
        fn test_fragments_use_display() {
            let doc = TextDocument::from("[{item}]");
            let rich = doc.substitute_rich(Bindings::new().fragment("item", "sword".to_string()));
            assert_eq!(render(OutputMode::Text, &rich), "[sword]");
        }
    }

    mod term {
        use super::*;

        #[test]
        fn test_term_writes_ansi_codes() {
            let doc = TextDocument::from("&cwarn &rok");
            let rich = doc.substitute_rich(Bindings::<String>::new());
            let out = render(OutputMode::Term, &rich);
            assert!(out.contains("\x1b["));
            assert!(out.contains("warn "));
            assert!(out.ends_with("ok"));
        }

        #[test]
        fn test_term_plain_text_untouched() {
            let doc = TextDocument::from("nothing styled");
            let rich = doc.substitute_rich(Bindings::<String>::new());
            assert_eq!(render(OutputMode::Term, &rich), "nothing styled");
        }
    }

    mod legacy {
        use super::*;

        #[test]
        fn test_legacy_minimal_transitions() {
            let doc = TextDocument::from("&aHi &l{name}&r!");
            let rich = doc.substitute_rich(Bindings::new().plain("name", "Ada"));
            assert_eq!(render(OutputMode::Legacy, &rich), "§aHi §a§lAda§r!");
        }

        #[test]
        fn test_legacy_decoration_only() {
            let doc = TextDocument::from("a &lb &oc");
            let rich = doc.substitute_rich(Bindings::<String>::new());
            assert_eq!(render(OutputMode::Legacy, &rich), "a §lb §oc");
        }

        #[test]
        fn test_legacy_resets_per_line() {
            let doc = TextDocument::new(["&cred", "plain", "&cred"]);
            let rich = doc.substitute_rich(Bindings::<String>::new());
            assert_eq!(render(OutputMode::Legacy, &rich), "§cred\nplain\n§cred");
        }

        #[test]
        fn test_legacy_restates_style_after_fragment() {
            let doc = TextDocument::from("&e{a}&e tail");
            let rich = doc.substitute_rich(Bindings::new().fragment("a", "§bX".to_string()));
            assert_eq!(render(OutputMode::Legacy, &rich), "§bX§e tail");
        }

        #[test]
        fn test_legacy_resets_after_fragment_before_plain() {
            let doc = TextDocument::from("{a} tail");
            let rich = doc.substitute_rich(Bindings::new().fragment("a", "§cX".to_string()));
            assert_eq!(render(OutputMode::Legacy, &rich), "§cX§r tail");
        }

        #[test]
        fn test_legacy_rgb() {
            let doc = TextDocument::from("&#66ccffsky");
            let rich = doc.substitute_rich(Bindings::<String>::new());
            assert_eq!(
                render(OutputMode::Legacy, &rich),
                "§x§6§6§c§c§f§fsky"
            );
        }
    }
}
