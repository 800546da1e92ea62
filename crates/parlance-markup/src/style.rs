//! Style codes in styled text.
//!
//! After marker conversion, styles are introduced by [`STYLE_MARKER`] (`§`)
//! followed by one code character (case-insensitive):
//!
//! | Code | Effect |
//! |------|--------|
//! | `0`-`9`, `a`-`f` | legacy color; clears decorations |
//! | `k` | obfuscated |
//! | `l` | bold |
//! | `m` | strikethrough |
//! | `n` | underlined |
//! | `o` | italic |
//! | `r` | reset to the plain style |
//! | `x` + six `§<hex>` | RGB color; clears decorations |
//!
//! Any other code, an incomplete `§x` sequence, or a trailing marker is kept
//! as literal text.

use std::fmt;

/// The internal style-introduction character.
pub const STYLE_MARKER: char = '§';

/// The sixteen legacy palette colors, in code order (`0` through `f`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl LegacyColor {
    const ALL: [LegacyColor; 16] = [
        LegacyColor::Black,
        LegacyColor::DarkBlue,
        LegacyColor::DarkGreen,
        LegacyColor::DarkAqua,
        LegacyColor::DarkRed,
        LegacyColor::DarkPurple,
        LegacyColor::Gold,
        LegacyColor::Gray,
        LegacyColor::DarkGray,
        LegacyColor::Blue,
        LegacyColor::Green,
        LegacyColor::Aqua,
        LegacyColor::Red,
        LegacyColor::LightPurple,
        LegacyColor::Yellow,
        LegacyColor::White,
    ];

    /// Looks up a color by its code character (`0`-`9`, `a`-`f`, any case).
    pub fn from_code(code: char) -> Option<Self> {
        code.to_digit(16).map(|index| Self::ALL[index as usize])
    }

    /// Returns the lowercase code character.
    pub fn code(self) -> char {
        // Discriminants are 0..=15 in declaration order
        std::char::from_digit(self.index() as u32, 16).unwrap_or('f')
    }

    /// Palette index, 0 through 15.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The conventional RGB value of this palette entry.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            LegacyColor::Black => (0x00, 0x00, 0x00),
            LegacyColor::DarkBlue => (0x00, 0x00, 0xaa),
            LegacyColor::DarkGreen => (0x00, 0xaa, 0x00),
            LegacyColor::DarkAqua => (0x00, 0xaa, 0xaa),
            LegacyColor::DarkRed => (0xaa, 0x00, 0x00),
            LegacyColor::DarkPurple => (0xaa, 0x00, 0xaa),
            LegacyColor::Gold => (0xff, 0xaa, 0x00),
            LegacyColor::Gray => (0xaa, 0xaa, 0xaa),
            LegacyColor::DarkGray => (0x55, 0x55, 0x55),
            LegacyColor::Blue => (0x55, 0x55, 0xff),
            LegacyColor::Green => (0x55, 0xff, 0x55),
            LegacyColor::Aqua => (0x55, 0xff, 0xff),
            LegacyColor::Red => (0xff, 0x55, 0x55),
            LegacyColor::LightPurple => (0xff, 0x55, 0xff),
            LegacyColor::Yellow => (0xff, 0xff, 0x55),
            LegacyColor::White => (0xff, 0xff, 0xff),
        }
    }
}

/// A text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the sixteen palette colors.
    Legacy(LegacyColor),
    /// True color RGB.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Returns the RGB value, resolving palette colors.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Legacy(color) => color.rgb(),
            Color::Rgb(r, g, b) => (r, g, b),
        }
    }
}

/// The style in effect for a run of text.
///
/// `TextStyle::default()` is the plain style: no color, no decorations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub color: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
}

impl TextStyle {
    /// A style with only a color set.
    pub fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underlined = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn obfuscated(mut self) -> Self {
        self.obfuscated = true;
        self
    }

    /// Returns true if no color and no decoration is set.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if every decoration set on `other` is also set here.
    pub fn has_decorations_of(&self, other: &TextStyle) -> bool {
        (self.bold || !other.bold)
            && (self.italic || !other.italic)
            && (self.underlined || !other.underlined)
            && (self.strikethrough || !other.strikethrough)
            && (self.obfuscated || !other.obfuscated)
    }

    /// Encodes this style as marker codes, starting from the plain style.
    ///
    /// ```rust
    /// use parlance_markup::{Color, LegacyColor, TextStyle};
    ///
    /// let style = TextStyle::colored(Color::Legacy(LegacyColor::Green)).bold();
    /// assert_eq!(style.to_legacy(), "§a§l");
    /// assert_eq!(TextStyle::colored(Color::Rgb(0x66, 0xcc, 0xff)).to_legacy(), "§x§6§6§c§c§f§f");
    /// ```
    pub fn to_legacy(&self) -> String {
        let mut out = String::new();
        match self.color {
            Some(Color::Legacy(color)) => {
                out.push(STYLE_MARKER);
                out.push(color.code());
            }
            Some(Color::Rgb(r, g, b)) => {
                out.push(STYLE_MARKER);
                out.push('x');
                for digit in format!("{:02x}{:02x}{:02x}", r, g, b).chars() {
                    out.push(STYLE_MARKER);
                    out.push(digit);
                }
            }
            None => {}
        }
        self.push_decoration_codes(&mut out, &TextStyle::default());
        out
    }

    /// Appends codes for the decorations set here but not on `base`.
    fn push_decoration_codes(&self, out: &mut String, base: &TextStyle) {
        let flags = [
            (self.obfuscated && !base.obfuscated, 'k'),
            (self.bold && !base.bold, 'l'),
            (self.strikethrough && !base.strikethrough, 'm'),
            (self.underlined && !base.underlined, 'n'),
            (self.italic && !base.italic, 'o'),
        ];
        for (set, code) in flags {
            if set {
                out.push(STYLE_MARKER);
                out.push(code);
            }
        }
    }

    /// Codes that switch from `self` to `next` without disturbing text.
    ///
    /// Uses a color code or `§r` whenever a decoration or the color has to be
    /// dropped, since legacy codes can only add decorations.
    pub fn transition_to(&self, next: &TextStyle) -> String {
        if self == next {
            return String::new();
        }
        if next.color.is_some() {
            return next.to_legacy();
        }
        if self.color.is_none() && next.has_decorations_of(self) {
            let mut out = String::new();
            next.push_decoration_codes(&mut out, self);
            return out;
        }
        let mut out = format!("{}r", STYLE_MARKER);
        out.push_str(&next.to_legacy());
        out
    }
}

/// A run of visible text with a single style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parsed style code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    Color(LegacyColor),
    Obfuscated,
    Bold,
    Strikethrough,
    Underlined,
    Italic,
    Reset,
    Hex,
}

impl Code {
    fn from_char(c: char) -> Option<Self> {
        if let Some(color) = LegacyColor::from_code(c) {
            return Some(Code::Color(color));
        }
        match c.to_ascii_lowercase() {
            'k' => Some(Code::Obfuscated),
            'l' => Some(Code::Bold),
            'm' => Some(Code::Strikethrough),
            'n' => Some(Code::Underlined),
            'o' => Some(Code::Italic),
            'r' => Some(Code::Reset),
            'x' => Some(Code::Hex),
            _ => None,
        }
    }
}

/// Accumulates text into spans, merging runs that share a style.
struct Runs {
    spans: Vec<Span>,
    buffer: String,
    style: TextStyle,
}

impl Runs {
    fn new(style: TextStyle) -> Self {
        Self {
            spans: Vec::new(),
            buffer: String::new(),
            style,
        }
    }

    fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    fn set_style(&mut self, style: TextStyle) {
        self.flush();
        self.style = style;
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        match self.spans.last_mut() {
            Some(last) if last.style == self.style => last.text.push_str(&text),
            _ => self.spans.push(Span::new(text, self.style)),
        }
    }

    fn finish(mut self) -> (Vec<Span>, TextStyle) {
        self.flush();
        (self.spans, self.style)
    }
}

/// Reads the six `§<hex>` pairs that follow `§x`.
///
/// `chars` is positioned just after the `x`. Returns `None` (leaving the
/// caller's iterator untouched) when the sequence is incomplete.
fn read_hex_color(chars: &std::iter::Peekable<std::str::Chars<'_>>) -> Option<(Color, usize)> {
    let mut ahead = chars.clone();
    let mut digits = [0u8; 6];
    for digit in digits.iter_mut() {
        if ahead.next()? != STYLE_MARKER {
            return None;
        }
        *digit = ahead.next()?.to_digit(16)? as u8;
    }
    let color = Color::Rgb(
        digits[0] * 16 + digits[1],
        digits[2] * 16 + digits[3],
        digits[4] * 16 + digits[5],
    );
    // Twelve characters: six markers and six digits
    Some((color, 12))
}

/// Decodes styled text into style runs.
///
/// Parsing starts from `start` and returns the style in effect at the end of
/// the text, so a line split around placeholders can be parsed piece by piece
/// with the style carried across.
///
/// ```rust
/// use parlance_markup::{parse_spans, Color, LegacyColor, TextStyle};
///
/// let (spans, end) = parse_spans("§aGreen §lbold", TextStyle::default());
/// assert_eq!(spans.len(), 2);
/// assert_eq!(spans[0].text, "Green ");
/// assert_eq!(spans[1].style, TextStyle::colored(Color::Legacy(LegacyColor::Green)).bold());
/// assert_eq!(end, spans[1].style);
/// ```
pub fn parse_spans(text: &str, start: TextStyle) -> (Vec<Span>, TextStyle) {
    let mut runs = Runs::new(start);
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != STYLE_MARKER {
            runs.push(ch);
            continue;
        }

        let Some(code) = chars.peek().copied().and_then(Code::from_char) else {
            // Trailing or unknown code - the marker is literal
            runs.push(ch);
            continue;
        };

        let current = runs.style;
        let next = match code {
            Code::Color(color) => TextStyle::colored(Color::Legacy(color)),
            Code::Obfuscated => current.obfuscated(),
            Code::Bold => current.bold(),
            Code::Strikethrough => current.strikethrough(),
            Code::Underlined => current.underlined(),
            Code::Italic => current.italic(),
            Code::Reset => TextStyle::default(),
            Code::Hex => {
                let mut after_x = chars.clone();
                after_x.next();
                match read_hex_color(&after_x) {
                    Some((color, consumed)) => {
                        chars = after_x;
                        for _ in 0..consumed {
                            chars.next();
                        }
                        runs.set_style(TextStyle::colored(color));
                        continue;
                    }
                    None => {
                        runs.push(ch);
                        continue;
                    }
                }
            }
        };
        chars.next();
        runs.set_style(next);
    }

    runs.finish()
}
