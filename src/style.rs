// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal styles: colors and typography as ANSI escape sequences.
//!
//! A [`Style`] carries a foreground color, a background color and a typographic attribute.
//! Colors come in one of three mutually exclusive modes:
//!
//! | Mode        | Types                  | Foreground sequence  |
//! |-------------|------------------------|----------------------|
//! | 16 colors   | [`Fg`], [`Bg`]         | `ESC[31m`            |
//! | 256 colors  | [`Color256`]           | `ESC[38;5;196m`      |
//! | 16M colors  | [`ColorRgb`]           | `ESC[38;2;255;0;0m`  |
//!
//! Every mode can express "no color" for either channel, in which case nothing at all is
//! emitted for that channel.
//!
//! # Building styles
//!
//! Parts may be given in any order:
//!
//! ```rust
//! use scopelog::style::{Bg, Fg, Style, Typo};
//!
//! let a = Style::new().with(Fg::Red).with(Bg::Black).with(Typo::Bold);
//! let b = Style::new().with(Typo::Bold).with(Bg::Black).with(Fg::Red);
//! assert_eq!(a, b);
//! assert_eq!(a.escape(), "\x1b[31;40;1m");
//! ```
//!
//! Extended modes use the positional constructors:
//!
//! ```rust
//! use scopelog::style::{Bg, ColorRgb, Style, Typo};
//!
//! let greyish = Style::indexed(250u8, Bg::None);
//! assert_eq!(greyish.escape(), "\x1b[38;5;250m");
//!
//! let gold = Style::rgb(ColorRgb::new(200, 150, 0), "#000000").with(Typo::Underline);
//! assert_eq!(gold.escape(), "\x1b[38;2;200;150;0m\x1b[48;2;0;0;0m\x1b[4m");
//!
//! // Malformed hex strings are "no color", not an error.
//! assert_eq!(ColorRgb::hex("#12345"), ColorRgb::NONE);
//! ```
//!
//! # Wrapping text
//!
//! ```rust
//! use scopelog::style::{Fg, Style};
//!
//! assert_eq!(Style::none().wrap("X"), "X");
//! assert_eq!(Style::from(Fg::Green).wrap("X"), "\x1b[32mX\x1b[0m");
//! ```

use std::fmt::{Display, Write};

/// The sequence that clears every attribute.
pub const RESET: &str = "\x1b[0m";

/// Foreground color in 16-color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fg {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// No foreground color.
    None,
}

/// Background color in 16-color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bg {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// No background color.
    None,
}

/// Typographic attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Typo {
    Reset,
    Bold,
    Underline,
    Inverse,
    /// No attribute.
    None,
}

// Offset of a color in the 16-color palette; bright colors start at 8.
const fn palette_offset(index: u8) -> u8 {
    if index < 8 { index } else { 60 + index - 8 }
}

impl Fg {
    /// The SGR parameter, or `None` for [Fg::None].
    pub const fn code(self) -> Option<u8> {
        match self {
            Fg::None => None,
            other => Some(30 + palette_offset(other as u8)),
        }
    }
}

impl Bg {
    /// The SGR parameter, or `None` for [Bg::None].
    pub const fn code(self) -> Option<u8> {
        match self {
            Bg::None => None,
            other => Some(40 + palette_offset(other as u8)),
        }
    }
}

impl Typo {
    /// The SGR parameter, or `None` for [Typo::None].
    pub const fn code(self) -> Option<u8> {
        match self {
            Typo::Reset => Some(0),
            Typo::Bold => Some(1),
            Typo::Underline => Some(4),
            Typo::Inverse => Some(7),
            Typo::None => None,
        }
    }
}

/// A color of the 256-color palette, or no color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color256(Option<u8>);

impl Color256 {
    pub const NONE: Color256 = Color256(None);

    pub const fn new(index: u8) -> Self {
        Color256(Some(index))
    }

    pub const fn index(self) -> Option<u8> {
        self.0
    }
}

impl From<u8> for Color256 {
    fn from(index: u8) -> Self {
        Color256::new(index)
    }
}

/// Named colors have no counterpart here; only the "no color" meaning carries over.
impl From<Fg> for Color256 {
    fn from(_: Fg) -> Self {
        Color256::NONE
    }
}

impl From<Bg> for Color256 {
    fn from(_: Bg) -> Self {
        Color256::NONE
    }
}

/// A 24-bit color, or no color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorRgb(Option<[u8; 3]>);

impl ColorRgb {
    pub const NONE: ColorRgb = ColorRgb(None);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        ColorRgb(Some([red, green, blue]))
    }

    /**
    Parses `#rrggbb` (the `#` is optional).

    Anything that is not exactly six hex digits yields [ColorRgb::NONE].
    */
    pub fn hex(srgb: &str) -> Self {
        let digits = srgb.strip_prefix('#').unwrap_or(srgb);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return ColorRgb::NONE;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match (channel(0), channel(2), channel(4)) {
            (Some(r), Some(g), Some(b)) => ColorRgb::new(r, g, b),
            _ => ColorRgb::NONE,
        }
    }

    pub const fn channels(self) -> Option<[u8; 3]> {
        self.0
    }
}

impl From<(u8, u8, u8)> for ColorRgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorRgb::new(r, g, b)
    }
}

impl From<[u8; 3]> for ColorRgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        ColorRgb::new(r, g, b)
    }
}

impl From<&str> for ColorRgb {
    fn from(srgb: &str) -> Self {
        ColorRgb::hex(srgb)
    }
}

impl From<Fg> for ColorRgb {
    fn from(_: Fg) -> Self {
        ColorRgb::NONE
    }
}

impl From<Bg> for ColorRgb {
    fn from(_: Bg) -> Self {
        ColorRgb::NONE
    }
}

/// The color channels of a style, in exactly one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colors {
    Ansi16 { fg: Fg, bg: Bg },
    Ansi256 { fg: Color256, bg: Color256 },
    Ansi16M { fg: ColorRgb, bg: ColorRgb },
}

impl Colors {
    const NONE: Colors = Colors::Ansi16 {
        fg: Fg::None,
        bg: Bg::None,
    };

    fn is_none(&self) -> bool {
        match *self {
            Colors::Ansi16 { fg, bg } => fg == Fg::None && bg == Bg::None,
            Colors::Ansi256 { fg, bg } => fg == Color256::NONE && bg == Color256::NONE,
            Colors::Ansi16M { fg, bg } => fg == ColorRgb::NONE && bg == ColorRgb::NONE,
        }
    }
}

/// One constituent of a [Style], accepted by [Style::with].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Fg(Fg),
    Bg(Bg),
    Fg256(Color256),
    Bg256(Color256),
    FgRgb(ColorRgb),
    BgRgb(ColorRgb),
    Typo(Typo),
}

impl From<Fg> for Part {
    fn from(fg: Fg) -> Self {
        Part::Fg(fg)
    }
}

impl From<Bg> for Part {
    fn from(bg: Bg) -> Self {
        Part::Bg(bg)
    }
}

impl From<Typo> for Part {
    fn from(typo: Typo) -> Self {
        Part::Typo(typo)
    }
}

/**
A terminal style.

The default style is "none": it renders as the empty string and leaves wrapped text untouched.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    colors: Colors,
    typo: Typo,
}

impl Style {
    /// A style that emits nothing.
    pub const fn none() -> Self {
        Style {
            colors: Colors::NONE,
            typo: Typo::None,
        }
    }

    /// Same as [Style::none]; start of a [Style::with] chain.
    pub const fn new() -> Self {
        Style::none()
    }

    /// 16-color foreground and background.
    pub const fn ansi16(fg: Fg, bg: Bg) -> Self {
        Style {
            colors: Colors::Ansi16 { fg, bg },
            typo: Typo::None,
        }
    }

    /// 256-color foreground and background.
    pub fn indexed(fg: impl Into<Color256>, bg: impl Into<Color256>) -> Self {
        Style {
            colors: Colors::Ansi256 {
                fg: fg.into(),
                bg: bg.into(),
            },
            typo: Typo::None,
        }
    }

    /// 24-bit foreground and background.
    pub fn rgb(fg: impl Into<ColorRgb>, bg: impl Into<ColorRgb>) -> Self {
        Style {
            colors: Colors::Ansi16M {
                fg: fg.into(),
                bg: bg.into(),
            },
            typo: Typo::None,
        }
    }

    /**
    Returns a copy with `part` applied.

    Applying a color of another mode switches the style to that mode; the channel that is not
    being set becomes "no color". The `None` sentinels of [Fg] and [Bg] clear the channel
    without changing mode, so `Fg::None` combines with any mode.
    */
    pub fn with(self, part: impl Into<Part>) -> Self {
        let mut style = self;
        style.colors = match (part.into(), self.colors) {
            (Part::Typo(typo), colors) => {
                style.typo = typo;
                colors
            }

            (Part::Fg(fg), Colors::Ansi16 { bg, .. }) => Colors::Ansi16 { fg, bg },
            (Part::Bg(bg), Colors::Ansi16 { fg, .. }) => Colors::Ansi16 { fg, bg },
            (Part::Fg(Fg::None), Colors::Ansi256 { bg, .. }) => Colors::Ansi256 {
                fg: Color256::NONE,
                bg,
            },
            (Part::Bg(Bg::None), Colors::Ansi256 { fg, .. }) => Colors::Ansi256 {
                fg,
                bg: Color256::NONE,
            },
            (Part::Fg(Fg::None), Colors::Ansi16M { bg, .. }) => Colors::Ansi16M {
                fg: ColorRgb::NONE,
                bg,
            },
            (Part::Bg(Bg::None), Colors::Ansi16M { fg, .. }) => Colors::Ansi16M {
                fg,
                bg: ColorRgb::NONE,
            },
            (Part::Fg(fg), _) => Colors::Ansi16 { fg, bg: Bg::None },
            (Part::Bg(bg), _) => Colors::Ansi16 { fg: Fg::None, bg },

            (Part::Fg256(fg), Colors::Ansi256 { bg, .. }) => Colors::Ansi256 { fg, bg },
            (Part::Bg256(bg), Colors::Ansi256 { fg, .. }) => Colors::Ansi256 { fg, bg },
            (Part::Fg256(fg), _) => Colors::Ansi256 {
                fg,
                bg: Color256::NONE,
            },
            (Part::Bg256(bg), _) => Colors::Ansi256 {
                fg: Color256::NONE,
                bg,
            },

            (Part::FgRgb(fg), Colors::Ansi16M { bg, .. }) => Colors::Ansi16M { fg, bg },
            (Part::BgRgb(bg), Colors::Ansi16M { fg, .. }) => Colors::Ansi16M { fg, bg },
            (Part::FgRgb(fg), _) => Colors::Ansi16M {
                fg,
                bg: ColorRgb::NONE,
            },
            (Part::BgRgb(bg), _) => Colors::Ansi16M {
                fg: ColorRgb::NONE,
                bg,
            },
        };
        style
    }

    pub const fn colors(&self) -> Colors {
        self.colors
    }

    pub const fn typo(&self) -> Typo {
        self.typo
    }

    /// Whether this style emits no escape code at all.
    pub fn is_none(&self) -> bool {
        self.colors.is_none() && self.typo == Typo::None
    }

    /// The escape sequence(s) that switch the terminal to this style.
    pub fn escape(&self) -> String {
        self.to_string()
    }

    /// `text` preceded by this style and followed by a reset; `text` alone for a none style.
    pub fn wrap(&self, text: &str) -> String {
        if self.is_none() {
            return text.to_string();
        }
        format!("{self}{text}{RESET}")
    }

    /**
    Deterministically picks a style for `key`.

    The style is `candidates[key_hash(key) % candidates.len()]`. With no candidates the hash
    selects a foreground of the 256-color palette instead.
    */
    pub fn hash(key: &str, candidates: &[Style]) -> Style {
        let h = key_hash(key);
        if candidates.is_empty() {
            Style::indexed((h % 256) as u8, Color256::NONE)
        } else {
            candidates[(h % candidates.len() as u64) as usize]
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::none()
    }
}

impl From<Fg> for Style {
    fn from(fg: Fg) -> Self {
        Style::new().with(fg)
    }
}

impl From<Bg> for Style {
    fn from(bg: Bg) -> Self {
        Style::new().with(bg)
    }
}

impl From<Typo> for Style {
    fn from(typo: Typo) -> Self {
        Style::new().with(typo)
    }
}

/// A 256-color foreground.
impl From<u8> for Style {
    fn from(index: u8) -> Self {
        Style::indexed(index, Color256::NONE)
    }
}

/// A 24-bit foreground.
impl From<(u8, u8, u8)> for Style {
    fn from(rgb: (u8, u8, u8)) -> Self {
        Style::rgb(rgb, ColorRgb::NONE)
    }
}

/// A 24-bit foreground from `#rrggbb`.
impl From<&str> for Style {
    fn from(srgb: &str) -> Self {
        Style::rgb(srgb, ColorRgb::NONE)
    }
}

fn write_sgr(f: &mut std::fmt::Formatter<'_>, params: &[u8]) -> std::fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    f.write_str("\x1b[")?;
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            f.write_char(';')?;
        }
        write!(f, "{p}")?;
    }
    f.write_char('m')
}

impl Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.colors {
            Colors::Ansi16 { fg, bg } => {
                let codes: Vec<u8> = [fg.code(), bg.code(), self.typo.code()]
                    .into_iter()
                    .flatten()
                    .collect();
                write_sgr(f, &codes)
            }
            Colors::Ansi256 { fg, bg } => {
                if let Some(i) = fg.index() {
                    write_sgr(f, &[38, 5, i])?;
                }
                if let Some(i) = bg.index() {
                    write_sgr(f, &[48, 5, i])?;
                }
                write_sgr(f, self.typo.code().as_slice())
            }
            Colors::Ansi16M { fg, bg } => {
                if let Some([r, g, b]) = fg.channels() {
                    write_sgr(f, &[38, 2, r, g, b])?;
                }
                if let Some([r, g, b]) = bg.channels() {
                    write_sgr(f, &[48, 2, r, g, b])?;
                }
                write_sgr(f, self.typo.code().as_slice())
            }
        }
    }
}

/// 64-bit FNV-1a of `key`. Stable across runs and platforms.
pub fn key_hash(key: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    key.bytes()
        .fold(OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME))
}

/*
Boilerplate notes.

Style is Copy: three small enums/options, no heap.
Display emits the escape sequence, so styles can be spliced into templates with format!.
Ord: no meaningful order between styles.
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_emits_nothing() {
        assert_eq!(Style::none().escape(), "");
        assert_eq!(Style::none().wrap("X"), "X");
        assert_eq!(Style::indexed(Fg::None, Bg::None).wrap("X"), "X");
        assert_eq!(Style::rgb("nonsense", Bg::None).wrap("X"), "X");
    }

    #[test]
    fn sixteen_colors_share_one_sequence() {
        let full = Style::ansi16(Fg::Red, Bg::Black).with(Typo::Bold);
        assert_eq!(full.escape(), "\x1b[31;40;1m");
        assert_eq!(Style::from(Bg::Black).with(Typo::Bold).escape(), "\x1b[40;1m");
        assert_eq!(Style::from(Typo::Bold).escape(), "\x1b[1m");
        assert_eq!(Style::from(Fg::BrightWhite).escape(), "\x1b[97m");
        assert_eq!(Style::from(Bg::BrightBlack).escape(), "\x1b[100m");
        assert_eq!(Style::from(Typo::Reset).escape(), "\x1b[0m");
    }

    #[test]
    fn part_order_does_not_matter() {
        let expected = Style::ansi16(Fg::Red, Bg::Black).with(Typo::Bold);
        let orders: [[Part; 3]; 3] = [
            [Bg::Black.into(), Fg::Red.into(), Typo::Bold.into()],
            [Typo::Bold.into(), Bg::Black.into(), Fg::Red.into()],
            [Typo::Bold.into(), Fg::Red.into(), Bg::Black.into()],
        ];
        for parts in orders {
            let style = parts.into_iter().fold(Style::new(), |s, p| s.with(p));
            assert_eq!(style, expected);
        }
    }

    #[test]
    fn extended_modes_emit_separate_sequences() {
        let s = Style::indexed(196u8, 236u8).with(Typo::Bold);
        assert_eq!(s.escape(), "\x1b[38;5;196m\x1b[48;5;236m\x1b[1m");
        let s = Style::indexed(Fg::None, 236u8).with(Typo::Bold);
        assert_eq!(s.escape(), "\x1b[48;5;236m\x1b[1m");
        let s = Style::rgb(ColorRgb::new(255, 10, 10), Bg::None);
        assert_eq!(s.escape(), "\x1b[38;2;255;10;10m");
        let s = Style::rgb("#ffff00", "ff0000");
        assert_eq!(s.escape(), "\x1b[38;2;255;255;0m\x1b[48;2;255;0;0m");
    }

    #[test]
    fn none_sentinel_keeps_the_mode() {
        let s = Style::new().with(Part::Bg256(Color256::new(236))).with(Fg::None);
        assert_eq!(s, Style::indexed(Color256::NONE, 236u8));
    }

    #[test]
    fn malformed_hex_is_no_color() {
        for bad in ["", "#", "#fff", "#gg0000", "#1234567", "1234567"] {
            assert_eq!(ColorRgb::hex(bad), ColorRgb::NONE, "{bad:?}");
        }
        assert_eq!(ColorRgb::hex("#0A0b0C"), ColorRgb::new(10, 11, 12));
    }

    #[test]
    fn hash_is_deterministic() {
        let candidates = [Style::from(Fg::Red), Style::from(Fg::Green), Style::from(Fg::Blue)];
        let first = Style::hash("src/main.rs", &candidates);
        for _ in 0..10 {
            assert_eq!(Style::hash("src/main.rs", &candidates), first);
        }
        let index = (key_hash("src/main.rs") % 3) as usize;
        assert_eq!(first, candidates[index]);

        let mut reversed = candidates;
        reversed.reverse();
        assert_eq!(Style::hash("src/main.rs", &reversed), reversed[index]);
    }

    #[test]
    fn hash_without_candidates_uses_palette() {
        let h = key_hash("parse");
        assert_eq!(
            Style::hash("parse", &[]),
            Style::indexed((h % 256) as u8, Color256::NONE)
        );
    }

    #[test]
    fn fnv_reference_values() {
        assert_eq!(key_hash(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(key_hash("a"), 0xaf63_dc4c_8601_ec8c);
    }
}
