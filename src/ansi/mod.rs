//! ANSI escape sequence decoding and generation.
//!
//! [`attributes`], [`fg_color`] and [`bg_color`] build single SGR sequences
//! for callers that compose styled text to feed the wrapper. The wrapper
//! reapplies state through [`Style::sequence`](crate::Style::sequence).

pub mod decoder;
pub mod sequences;

pub use decoder::{
    Control, CsiSequence, Decoder, OscSequence, Param, StringKind, Token, TokenKind,
};
pub use sequences::*;

use crate::color::Color;
use crate::style::{TextAttributes, UnderlineStyle};
use crate::unicode::{AmbiguousWidth, WidthMethod};

/// Which SGR color slot a color is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorLayer {
    /// Text color (`30-37`, `90-97`, `38`).
    Foreground,
    /// Cell background (`40-47`, `100-107`, `48`).
    Background,
    /// Underline color (`58`).
    Underline,
}

/// Append a u8 as decimal digits without formatting overhead.
#[inline]
fn push_u8_decimal(out: &mut String, n: u8) {
    if n >= 100 {
        out.push(char::from(b'0' + n / 100));
    }
    if n >= 10 {
        out.push(char::from(b'0' + (n / 10) % 10));
    }
    out.push(char::from(b'0' + n % 10));
}

/// Append the SGR parameters selecting `color` on `layer`, without the
/// `CSI` introducer or final `m`.
pub fn push_color_params(out: &mut String, color: Color, layer: ColorLayer) {
    match (color, layer) {
        (Color::Basic(n), ColorLayer::Foreground) => {
            push_u8_decimal(out, if n < 8 { 30 + n } else { 90 + (n & 0x07) });
        }
        (Color::Basic(n), ColorLayer::Background) => {
            push_u8_decimal(out, if n < 8 { 40 + n } else { 100 + (n & 0x07) });
        }
        // Underline color has no short form
        (Color::Basic(n) | Color::Indexed(n), ColorLayer::Underline) => {
            out.push_str("58;5;");
            push_u8_decimal(out, n);
        }
        (Color::Indexed(n), _) => {
            out.push_str(if layer == ColorLayer::Foreground {
                "38;5;"
            } else {
                "48;5;"
            });
            push_u8_decimal(out, n);
        }
        (Color::Rgb(r, g, b), _) => {
            out.push_str(match layer {
                ColorLayer::Foreground => "38;2;",
                ColorLayer::Background => "48;2;",
                ColorLayer::Underline => "58;2;",
            });
            push_u8_decimal(out, r);
            out.push(';');
            push_u8_decimal(out, g);
            out.push(';');
            push_u8_decimal(out, b);
        }
    }
}

/// Append the SGR parameters for text attributes and underline style.
///
/// Returns `true` if anything was written.
pub fn push_attribute_params(
    out: &mut String,
    attrs: TextAttributes,
    underline: UnderlineStyle,
) -> bool {
    const CODES: [(TextAttributes, &str); 8] = [
        (TextAttributes::BOLD, "1"),
        (TextAttributes::DIM, "2"),
        (TextAttributes::ITALIC, "3"),
        (TextAttributes::BLINK, "5"),
        (TextAttributes::RAPID_BLINK, "6"),
        (TextAttributes::INVERSE, "7"),
        (TextAttributes::HIDDEN, "8"),
        (TextAttributes::STRIKETHROUGH, "9"),
    ];

    let start = out.len();
    for (flag, code) in CODES {
        if attrs.contains(flag) {
            if out.len() > start {
                out.push(';');
            }
            out.push_str(code);
        }
    }
    if let Some(code) = underline.sgr_code() {
        if out.len() > start {
            out.push(';');
        }
        out.push_str(code);
    }
    out.len() > start
}

/// Generate SGR sequence for text attributes.
#[must_use]
pub fn attributes(attrs: TextAttributes) -> String {
    let mut params = String::new();
    if !push_attribute_params(&mut params, attrs, UnderlineStyle::None) {
        return String::new();
    }
    format!("\x1b[{params}m")
}

/// Generate SGR sequence for a foreground color.
#[must_use]
pub fn fg_color(color: Color) -> String {
    let mut out = String::from("\x1b[");
    push_color_params(&mut out, color, ColorLayer::Foreground);
    out.push('m');
    out
}

/// Generate SGR sequence for a background color.
#[must_use]
pub fn bg_color(color: Color) -> String {
    let mut out = String::from("\x1b[");
    push_color_params(&mut out, color, ColorLayer::Background);
    out.push('m');
    out
}

/// Escape a URL for safe inclusion in OSC 8 hyperlink sequences.
///
/// Control characters are percent-encoded to prevent escape sequence injection:
/// - C0 controls (U+0000-U+001F): Contains ESC (0x1B) and BEL (0x07)
/// - DEL (U+007F)
/// - C1 controls (U+0080-U+009F): Contains CSI (U+009B), ST (U+009C), OSC (U+009D)
#[must_use]
pub fn escape_url_for_osc8(url: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    if !url.chars().any(char::is_control) {
        return url.to_string();
    }

    let mut escaped = String::with_capacity(url.len() + 8);
    for ch in url.chars() {
        if ch.is_control() {
            let mut utf8 = [0u8; 4];
            for byte in ch.encode_utf8(&mut utf8).bytes() {
                escaped.push('%');
                escaped.push(char::from(HEX[usize::from(byte >> 4)]));
                escaped.push(char::from(HEX[usize::from(byte & 0x0F)]));
            }
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

/// Generate the OSC 8 sequence opening a hyperlink.
///
/// `params` is the raw `key=value:key=value` list, usually empty or `id=...`.
#[must_use]
pub fn set_hyperlink(url: &str, params: &str) -> String {
    format!(
        "\x1b]8;{};{}\x07",
        escape_url_for_osc8(params),
        escape_url_for_osc8(url)
    )
}

/// Display width of a string that may contain escape sequences.
///
/// Only text clusters count; controls and escape sequences are zero wide.
/// Clusters are measured with [`WidthMethod::Grapheme`], so a joined emoji
/// sequence counts as a single two-column glyph.
#[must_use]
pub fn string_width(s: &str) -> usize {
    string_width_with(s, WidthMethod::Grapheme, AmbiguousWidth::Narrow)
}

/// Escape-aware display width with explicit measuring rules.
#[must_use]
pub fn string_width_with(s: &str, method: WidthMethod, ambiguous: AmbiguousWidth) -> usize {
    Decoder::new(s, method, ambiguous).map(|t| t.width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_u8_decimal() {
        for (n, expected) in [(0u8, "0"), (7, "7"), (10, "10"), (99, "99"), (100, "100"), (255, "255")] {
            let mut s = String::new();
            push_u8_decimal(&mut s, n);
            assert_eq!(s, expected);
        }
    }

    #[test]
    fn test_fg_colors() {
        assert_eq!(fg_color(Color::RED), "\x1b[31m");
        assert_eq!(fg_color(Color::Basic(9)), "\x1b[91m");
        assert_eq!(fg_color(Color::Indexed(196)), "\x1b[38;5;196m");
        assert_eq!(fg_color(Color::Rgb(249, 38, 114)), "\x1b[38;2;249;38;114m");
    }

    #[test]
    fn test_bg_colors() {
        assert_eq!(bg_color(Color::BLUE), "\x1b[44m");
        assert_eq!(bg_color(Color::Basic(15)), "\x1b[107m");
        assert_eq!(bg_color(Color::Indexed(0)), "\x1b[48;5;0m");
        assert_eq!(bg_color(Color::Rgb(0, 0, 0)), "\x1b[48;2;0;0;0m");
    }

    #[test]
    fn test_underline_color_params() {
        let mut s = String::new();
        push_color_params(&mut s, Color::GREEN, ColorLayer::Underline);
        assert_eq!(s, "58;5;2");
        s.clear();
        push_color_params(&mut s, Color::Rgb(1, 2, 3), ColorLayer::Underline);
        assert_eq!(s, "58;2;1;2;3");
    }

    #[test]
    fn test_attributes() {
        assert_eq!(attributes(TextAttributes::empty()), "");
        assert_eq!(attributes(TextAttributes::BOLD), "\x1b[1m");
        assert_eq!(
            attributes(TextAttributes::BOLD | TextAttributes::ITALIC | TextAttributes::STRIKETHROUGH),
            "\x1b[1;3;9m"
        );
    }

    #[test]
    fn test_attribute_params_with_underline() {
        let mut s = String::new();
        assert!(push_attribute_params(&mut s, TextAttributes::DIM, UnderlineStyle::Curly));
        assert_eq!(s, "2;4:3");
        s.clear();
        assert!(!push_attribute_params(&mut s, TextAttributes::empty(), UnderlineStyle::None));
        assert!(s.is_empty());
    }

    #[test]
    fn test_osc8_url_escaping() {
        assert_eq!(escape_url_for_osc8("https://example.com"), "https://example.com");
        assert_eq!(escape_url_for_osc8("a\x1bb"), "a%1Bb");
        assert_eq!(escape_url_for_osc8("a\x07b"), "a%07b");
        assert_eq!(escape_url_for_osc8("a\u{9c}b"), "a%C2%9Cb");
        assert_eq!(escape_url_for_osc8("https://例え.jp/パス"), "https://例え.jp/パス");
    }

    #[test]
    fn test_set_hyperlink() {
        assert_eq!(
            set_hyperlink("https://example.com", ""),
            "\x1b]8;;https://example.com\x07"
        );
        assert_eq!(
            set_hyperlink("https://example.com", "id=1"),
            "\x1b]8;id=1;https://example.com\x07"
        );
        assert_eq!(RESET_HYPERLINK, "\x1b]8;;\x07");
    }

    #[test]
    fn test_escape_aware_width() {
        let cases = [
            ("", 0),
            ("hello", 5),
            ("👋", 2),
            ("🫧", 2),
            ("a\u{0300}", 1),
            ("\x1b[31mhello\x1b[0m", 5),
            ("\u{9b}38;5;1mhello\u{9b}m", 5),
            ("\u{9d}2;charmbracelet: ~/Source/bubbletea\u{9c}", 0),
            ("\x1b[31m👋\x1b[0m", 2),
            ("\x1b]2;title👨\u{200d}👩\u{200d}👦\x07", 0),
            ("\x1b[31m👨\u{200d}👩\u{200d}👦\x1b[m", 2),
            ("👨\u{200d}👩\u{200d}👦\u{9b}38;5;1mhello\u{9b}m", 7),
            ("\u{9d}8;id=1;https://example.com/\u{9c}打豆豆\u{9d}8;id=1;\x07", 6),
            ("\x1bP?123$pسلام\x1b\\اهلا", 4),
            ("hello\nworld", 10),
            ("hello\tworld", 10),
            ("\x1b[31mhello\x1b[0m\nworld", 10),
            ("\x1B[38;2;249;38;114mfoo", 3),
            ("\x1b[35m“box”\x1b[0m", 5),
            ("Claire‘s Boutique", 17),
        ];
        for (input, expected) in cases {
            assert_eq!(string_width(input), expected, "{input:?}");
        }
    }
}
