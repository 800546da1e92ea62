//! Color conversion for terminal output.

use console::{Color as ConsoleColor, Style};
use parlance_markup::{Color, LegacyColor, TextStyle};

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// # Example
///
/// ```rust
/// use parlance_render::rgb_to_ansi256;
///
/// // Pure red maps to ANSI 196
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
///
/// // Mid gray lands on the grayscale ramp
/// assert_eq!(rgb_to_ansi256((128, 128, 128)), 243);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// Maps a text color to the console palette.
///
/// Dark legacy colors use the basic ANSI colors; the bright half uses
/// palette indices 8-15. RGB colors go through the 256-color cube.
pub(crate) fn to_console_color(color: Color) -> ConsoleColor {
    match color {
        Color::Legacy(legacy) => match legacy {
            LegacyColor::Black => ConsoleColor::Black,
            LegacyColor::DarkBlue => ConsoleColor::Blue,
            LegacyColor::DarkGreen => ConsoleColor::Green,
            LegacyColor::DarkAqua => ConsoleColor::Cyan,
            LegacyColor::DarkRed => ConsoleColor::Red,
            LegacyColor::DarkPurple => ConsoleColor::Magenta,
            LegacyColor::Gold => ConsoleColor::Yellow,
            LegacyColor::Gray => ConsoleColor::White,
            LegacyColor::DarkGray => ConsoleColor::Color256(8),
            LegacyColor::Red => ConsoleColor::Color256(9),
            LegacyColor::Green => ConsoleColor::Color256(10),
            LegacyColor::Yellow => ConsoleColor::Color256(11),
            LegacyColor::Blue => ConsoleColor::Color256(12),
            LegacyColor::LightPurple => ConsoleColor::Color256(13),
            LegacyColor::Aqua => ConsoleColor::Color256(14),
            LegacyColor::White => ConsoleColor::Color256(15),
        },
        Color::Rgb(r, g, b) => ConsoleColor::Color256(rgb_to_ansi256((r, g, b))),
    }
}

/// Builds a console style for a text style. Obfuscated text blinks.
pub(crate) fn to_console_style(style: &TextStyle) -> Style {
    let mut out = Style::new();
    if let Some(color) = style.color {
        out = out.fg(to_console_color(color));
    }
    if style.bold {
        out = out.bold();
    }
    if style.italic {
        out = out.italic();
    }
    if style.underlined {
        out = out.underlined();
    }
    if style.strikethrough {
        out = out.strikethrough();
    }
    if style.obfuscated {
        out = out.blink();
    }
    out
}
