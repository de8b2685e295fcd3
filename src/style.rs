//! Text styling state carried by SGR sequences.
//!
//! This module provides:
//!
//! - [`TextAttributes`]: Bitflags for bold, italic, blink, etc.
//! - [`UnderlineStyle`]: Underline shape (`SGR 4:n`)
//! - [`Style`]: The accumulated rendering state, with [`Style::sequence`]
//!   producing one SGR that reproduces it
//! - [`read_style`]: Apply the parameters of an SGR sequence to a [`Style`]
//!
//! # Examples
//!
//! ```
//! use cellwrap::ansi::{Control, Decoder};
//! use cellwrap::style::{Style, read_style};
//! use cellwrap::unicode::{AmbiguousWidth, WidthMethod};
//!
//! let mut style = Style::default();
//! for token in Decoder::new("\x1b[1;31mhi", WidthMethod::WcWidth, AmbiguousWidth::Narrow) {
//!     if let Some(Control::Csi(csi)) = token.as_control() {
//!         read_style(&csi.params(), &mut style);
//!     }
//! }
//! assert_eq!(style.sequence(), "\x1b[1;31m");
//! ```

use crate::ansi::{self, ColorLayer, Param};
use crate::color::Color;
use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes (bold, italic, blink, etc.).
    ///
    /// Underline is tracked separately as [`UnderlineStyle`] because it has
    /// more than two states.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD          = 0x01;
        /// Dim/decreased intensity.
        const DIM           = 0x02;
        /// Italic (not widely supported).
        const ITALIC        = 0x04;
        /// Slow blink.
        const BLINK         = 0x08;
        /// Rapid blink (rarely supported).
        const RAPID_BLINK   = 0x10;
        /// Swapped foreground/background.
        const INVERSE       = 0x20;
        /// Hidden/invisible text.
        const HIDDEN        = 0x40;
        /// Strikethrough text.
        const STRIKETHROUGH = 0x80;
    }
}

/// Underline shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Double,
    Curly,
    Dotted,
    Dashed,
}

impl UnderlineStyle {
    /// Style selected by the sub-parameter of `SGR 4:n`.
    ///
    /// Unknown values fall back to a single underline.
    #[must_use]
    pub const fn from_sgr(n: u32) -> Self {
        match n {
            0 => Self::None,
            2 => Self::Double,
            3 => Self::Curly,
            4 => Self::Dotted,
            5 => Self::Dashed,
            _ => Self::Single,
        }
    }

    /// SGR parameter selecting this style, `None` for no underline.
    #[must_use]
    pub const fn sgr_code(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Single => Some("4"),
            Self::Double => Some("4:2"),
            Self::Curly => Some("4:3"),
            Self::Dotted => Some("4:4"),
            Self::Dashed => Some("4:5"),
        }
    }
}

/// Active text rendering state.
///
/// `None` for colors means "terminal default".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Underline color.
    pub underline_color: Option<Color>,
    /// On/off attributes.
    pub attributes: TextAttributes,
    /// Underline shape.
    pub underline: UnderlineStyle,
}

impl Style {
    /// Empty style with no colors or attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        underline_color: None,
        attributes: TextAttributes::empty(),
        underline: UnderlineStyle::None,
    };

    /// Create a new style builder.
    #[must_use]
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    /// Check if no attribute or color is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Clear everything (`SGR 0`).
    pub fn reset(&mut self) {
        *self = Self::NONE;
    }

    /// One SGR sequence reproducing this style from a reset terminal.
    ///
    /// Parameter order is attributes, underline, foreground, background,
    /// underline color. An empty style yields [`ansi::RESET_STYLE`].
    #[must_use]
    pub fn sequence(&self) -> String {
        if self.is_empty() {
            return ansi::RESET_STYLE.to_string();
        }

        let mut params = String::with_capacity(24);
        ansi::push_attribute_params(&mut params, self.attributes, self.underline);
        let layers = [
            (self.fg, ColorLayer::Foreground),
            (self.bg, ColorLayer::Background),
            (self.underline_color, ColorLayer::Underline),
        ];
        for (color, layer) in layers {
            if let Some(color) = color {
                if !params.is_empty() {
                    params.push(';');
                }
                ansi::push_color_params(&mut params, color, layer);
            }
        }
        format!("\x1b[{params}m")
    }
}

/// Apply SGR parameters to a style.
///
/// An empty parameter list is a full reset, as is an explicit `0`. Unknown
/// codes are ignored, along with any `:` sub-parameters they carry.
pub fn read_style(params: &[Param], style: &mut Style) {
    if params.is_empty() {
        style.reset();
        return;
    }

    let mut i = 0;
    while i < params.len() {
        let param = params[i];
        match param.value_or(0) {
            0 => style.reset(),
            1 => style.attributes.insert(TextAttributes::BOLD),
            2 => style.attributes.insert(TextAttributes::DIM),
            3 => style.attributes.insert(TextAttributes::ITALIC),
            4 => {
                if param.has_more {
                    i += 1;
                    let shape = params.get(i).map_or(1, |p| p.value_or(0));
                    style.underline = UnderlineStyle::from_sgr(shape);
                } else {
                    style.underline = UnderlineStyle::Single;
                }
            }
            5 => style.attributes.insert(TextAttributes::BLINK),
            6 => style.attributes.insert(TextAttributes::RAPID_BLINK),
            7 => style.attributes.insert(TextAttributes::INVERSE),
            8 => style.attributes.insert(TextAttributes::HIDDEN),
            9 => style.attributes.insert(TextAttributes::STRIKETHROUGH),
            21 => style.underline = UnderlineStyle::Double,
            22 => style
                .attributes
                .remove(TextAttributes::BOLD | TextAttributes::DIM),
            23 => style.attributes.remove(TextAttributes::ITALIC),
            24 => style.underline = UnderlineStyle::None,
            25 => style
                .attributes
                .remove(TextAttributes::BLINK | TextAttributes::RAPID_BLINK),
            27 => style.attributes.remove(TextAttributes::INVERSE),
            28 => style.attributes.remove(TextAttributes::HIDDEN),
            29 => style.attributes.remove(TextAttributes::STRIKETHROUGH),
            n @ 30..=37 => style.fg = Some(Color::Basic((n - 30) as u8)),
            n @ 40..=47 => style.bg = Some(Color::Basic((n - 40) as u8)),
            n @ 90..=97 => style.fg = Some(Color::Basic((n - 90 + 8) as u8)),
            n @ 100..=107 => style.bg = Some(Color::Basic((n - 100 + 8) as u8)),
            39 => style.fg = None,
            49 => style.bg = None,
            59 => style.underline_color = None,
            code @ (38 | 48 | 58) => {
                if let Some((color, consumed)) = read_color(&params[i..]) {
                    match code {
                        38 => style.fg = Some(color),
                        48 => style.bg = Some(color),
                        _ => style.underline_color = Some(color),
                    }
                    i += consumed;
                }
            }
            _ => {}
        }

        // Skip sub-parameters nobody consumed
        while params.get(i).is_some_and(|p| p.has_more) {
            i += 1;
        }
        i += 1;
    }
}

/// Read an extended color starting at a `38`/`48`/`58` parameter.
///
/// Accepts `5;n`, `2;r;g;b` and the colon forms `5:n`, `2:r:g:b` and
/// `2:cs:r:g:b` (color space id ignored). Returns the color and how many
/// parameters after the introducer were used.
fn read_color(params: &[Param]) -> Option<(Color, usize)> {
    let colon = params.first()?.has_more;
    match params.get(1)?.value? {
        5 => {
            let index = params.get(2)?.value_or(0);
            Some((Color::Indexed(clamp_u8(index)), 2))
        }
        2 => {
            let chain = params.iter().take_while(|p| p.has_more).count() + 1;
            let offset = if colon && chain >= 6 { 3 } else { 2 };
            let r = params.get(offset)?.value_or(0);
            let g = params.get(offset + 1)?.value_or(0);
            let b = params.get(offset + 2)?.value_or(0);
            Some((
                Color::Rgb(clamp_u8(r), clamp_u8(g), clamp_u8(b)),
                offset + 2,
            ))
        }
        _ => None,
    }
}

const fn clamp_u8(v: u32) -> u8 {
    if v > 255 { 255 } else { v as u8 }
}

/// Builder for creating styles fluently.
#[derive(Clone, Debug, Default)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    /// Set foreground color.
    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.style.fg = Some(color);
        self
    }

    /// Set background color.
    #[must_use]
    pub fn bg(mut self, color: Color) -> Self {
        self.style.bg = Some(color);
        self
    }

    /// Set underline color.
    #[must_use]
    pub fn underline_color(mut self, color: Color) -> Self {
        self.style.underline_color = Some(color);
        self
    }

    /// Add attributes.
    #[must_use]
    pub fn attributes(mut self, attrs: TextAttributes) -> Self {
        self.style.attributes |= attrs;
        self
    }

    /// Add bold attribute.
    #[must_use]
    pub fn bold(self) -> Self {
        self.attributes(TextAttributes::BOLD)
    }

    /// Add italic attribute.
    #[must_use]
    pub fn italic(self) -> Self {
        self.attributes(TextAttributes::ITALIC)
    }

    /// Set the underline shape.
    #[must_use]
    pub fn underline(mut self, shape: UnderlineStyle) -> Self {
        self.style.underline = shape;
        self
    }

    /// Build the final style.
    #[must_use]
    pub fn build(self) -> Style {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{Control, Decoder};
    use crate::unicode::{AmbiguousWidth, WidthMethod};

    /// Apply every SGR in `s` to a fresh style.
    fn parse(s: &str) -> Style {
        let mut style = Style::default();
        for token in Decoder::new(s, WidthMethod::WcWidth, AmbiguousWidth::Narrow) {
            if let Some(Control::Csi(csi)) = token.as_control() {
                if csi.is_sgr() {
                    read_style(&csi.params(), &mut style);
                }
            }
        }
        style
    }

    #[test]
    fn test_empty_style() {
        let style = Style::default();
        assert!(style.is_empty());
        assert_eq!(style.sequence(), ansi::RESET_STYLE);
    }

    #[test]
    fn test_basic_attributes() {
        let style = parse("\x1b[1;3;9m");
        assert!(style.attributes.contains(TextAttributes::BOLD));
        assert!(style.attributes.contains(TextAttributes::ITALIC));
        assert!(style.attributes.contains(TextAttributes::STRIKETHROUGH));
        assert_eq!(style.sequence(), "\x1b[1;3;9m");
    }

    #[test]
    fn test_reset_forms() {
        assert!(parse("\x1b[1;31m\x1b[m").is_empty());
        assert!(parse("\x1b[1;31m\x1b[0m").is_empty());
        assert!(parse("\x1b[1;31;0m").is_empty());
    }

    #[test]
    fn test_attribute_resets() {
        let style = parse(&format!("\x1b[1;2;3;5;7;8;9m{}", ansi::attr::RESET_INTENSITY));
        assert!(!style.attributes.contains(TextAttributes::BOLD));
        assert!(!style.attributes.contains(TextAttributes::DIM));
        assert!(style.attributes.contains(TextAttributes::ITALIC));

        let style = parse(&format!(
            "\x1b[3;5;6;7;8;9m{}{}{}{}{}",
            ansi::attr::RESET_ITALIC,
            ansi::attr::RESET_BLINK,
            ansi::attr::RESET_INVERSE,
            ansi::attr::RESET_HIDDEN,
            ansi::attr::RESET_STRIKETHROUGH
        ));
        assert!(style.is_empty());
    }

    #[test]
    fn test_basic_colors() {
        let style = parse("\x1b[31;42m");
        assert_eq!(style.fg, Some(Color::RED));
        assert_eq!(style.bg, Some(Color::GREEN));
        assert_eq!(style.sequence(), "\x1b[31;42m");

        let style = parse("\x1b[97;100m");
        assert_eq!(style.fg, Some(Color::Basic(15)));
        assert_eq!(style.bg, Some(Color::Basic(8)));
        assert_eq!(style.sequence(), "\x1b[97;100m");
    }

    #[test]
    fn test_color_defaults_clear() {
        let style = parse(&format!(
            "\x1b[31;42;58;5;1m{}{}{}",
            ansi::color::FG_DEFAULT,
            ansi::color::BG_DEFAULT,
            ansi::color::UNDERLINE_DEFAULT
        ));
        assert!(style.is_empty());
    }

    #[test]
    fn test_extended_colors_semicolon() {
        let style = parse("\x1b[38;5;196;48;2;1;2;3m");
        assert_eq!(style.fg, Some(Color::Indexed(196)));
        assert_eq!(style.bg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(style.sequence(), "\x1b[38;5;196;48;2;1;2;3m");
    }

    #[test]
    fn test_extended_colors_colon() {
        let style = parse("\x1b[38:2::10:20:30m");
        assert_eq!(style.fg, Some(Color::Rgb(10, 20, 30)));

        let style = parse("\x1b[38:2:10:20:30;1m");
        assert_eq!(style.fg, Some(Color::Rgb(10, 20, 30)));
        assert!(style.attributes.contains(TextAttributes::BOLD));

        let style = parse("\x1b[58:5:4m");
        assert_eq!(style.underline_color, Some(Color::Indexed(4)));
    }

    #[test]
    fn test_truncated_extended_color_is_ignored() {
        let style = parse("\x1b[38;5m");
        assert_eq!(style.fg, None);
        let style = parse("\x1b[38;2;1;2m");
        assert_eq!(style.fg, None);
    }

    #[test]
    fn test_color_components_clamped() {
        let style = parse("\x1b[38;2;300;0;999m");
        assert_eq!(style.fg, Some(Color::Rgb(255, 0, 255)));
    }

    #[test]
    fn test_underline_styles() {
        assert_eq!(parse("\x1b[4m").underline, UnderlineStyle::Single);
        assert_eq!(parse("\x1b[4:3m").underline, UnderlineStyle::Curly);
        assert_eq!(parse("\x1b[21m").underline, UnderlineStyle::Double);
        assert_eq!(parse("\x1b[4:3m\x1b[24m").underline, UnderlineStyle::None);
        assert_eq!(parse("\x1b[4:3;1m").sequence(), "\x1b[1;4:3m");
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let style = parse("\x1b[1;73;74:1;3m");
        assert_eq!(
            style.attributes,
            TextAttributes::BOLD | TextAttributes::ITALIC
        );
    }

    #[test]
    fn test_sequence_order() {
        let style = Style::builder()
            .fg(Color::Indexed(5))
            .bg(Color::RED)
            .underline_color(Color::Rgb(9, 8, 7))
            .underline(UnderlineStyle::Single)
            .bold()
            .italic()
            .build();
        assert_eq!(style.sequence(), "\x1b[1;3;4;38;5;5;41;58;2;9;8;7m");
    }

    #[test]
    fn test_sequence_roundtrips_through_parser() {
        let style = parse("\x1b[2;5;7;91;48;5;17m");
        assert_eq!(parse(&style.sequence()), style);
    }
}
