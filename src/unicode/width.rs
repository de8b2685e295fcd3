//! Display width calculation for terminal rendering.
//!
//! Widths are computed per code point and summed. Joined emoji sequences are
//! not merged: a zero-width joiner contributes nothing and leaves the width
//! of its neighbours untouched, so `"👩\u{200d}🍳"` is four columns wide.
//!
//! [`is_zero_width`] and [`is_wide`] are shorthands for callers laying out
//! cells by hand; the wrapper itself only uses the `*_width` functions.

use std::sync::OnceLock;
use unicode_width::UnicodeWidthChar;

/// Resolution of East Asian Ambiguous characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AmbiguousWidth {
    /// Ambiguous characters take one column (POSIX wcwidth behavior).
    #[default]
    Narrow,
    /// Ambiguous characters take two columns (East Asian legacy terminals).
    Wide,
}

/// How text clusters are measured when decoding escape-laden strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// Sum of per-code-point widths (wcwidth semantics).
    #[default]
    WcWidth,
    /// One width per grapheme cluster, at most two columns.
    Grapheme,
}

/// Code points that render with no advance regardless of what the backing
/// data says.
const ZERO_WIDTH: &[(char, char)] = &[
    ('\u{200B}', '\u{200F}'), // ZWSP, ZWNJ, ZWJ, LRM, RLM
    ('\u{2028}', '\u{202E}'), // line/paragraph separators, bidi embeddings
    ('\u{2060}', '\u{2064}'), // word joiner, invisible operators
    ('\u{FE00}', '\u{FE0F}'), // variation selectors
    ('\u{FEFF}', '\u{FEFF}'), // BOM / ZWNBSP
    ('\u{E0100}', '\u{E01EF}'), // variation selectors supplement
];

/// Immutable width classification table.
///
/// Built once per process and shared read-only. The ASCII range is
/// precomputed; everything else is classified through the `unicode-width`
/// tables plus the [`ZERO_WIDTH`] overrides.
#[derive(Debug)]
pub struct WidthTable {
    ascii: [u8; 128],
}

impl WidthTable {
    fn build() -> Self {
        let mut ascii = [0u8; 128];
        for (b, slot) in ascii.iter_mut().enumerate() {
            // Printable ASCII is one column, C0 controls and DEL are zero
            *slot = u8::from((0x20..0x7f).contains(&b));
        }
        Self { ascii }
    }

    /// The process-wide table, initialized on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        static TABLE: OnceLock<WidthTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    /// Width of a single code point: 0, 1 or 2 (ambiguous characters narrow).
    #[inline]
    #[must_use]
    pub fn rune_width(&self, c: char) -> usize {
        self.rune_width_with(c, AmbiguousWidth::Narrow)
    }

    /// Width of a single code point under an explicit ambiguous-width mode.
    #[inline]
    #[must_use]
    pub fn rune_width_with(&self, c: char, ambiguous: AmbiguousWidth) -> usize {
        if c.is_ascii() {
            return usize::from(self.ascii[c as usize]);
        }
        // C1 controls
        if c < '\u{A0}' || is_zero_width_override(c) {
            return 0;
        }
        let width = match ambiguous {
            AmbiguousWidth::Narrow => UnicodeWidthChar::width(c),
            AmbiguousWidth::Wide => UnicodeWidthChar::width_cjk(c),
        };
        width.unwrap_or(0)
    }

    /// Additive width of a string.
    #[must_use]
    pub fn string_width(&self, s: &str, ambiguous: AmbiguousWidth) -> usize {
        if s.is_ascii() {
            return s.bytes().map(|b| usize::from(self.ascii[b as usize])).sum();
        }
        s.chars().map(|c| self.rune_width_with(c, ambiguous)).sum()
    }

    /// Additive width of possibly malformed UTF-8.
    ///
    /// Every byte that is not part of a valid sequence counts as one column.
    #[must_use]
    pub fn bytes_width(&self, bytes: &[u8], ambiguous: AmbiguousWidth) -> usize {
        bytes
            .utf8_chunks()
            .map(|chunk| self.string_width(chunk.valid(), ambiguous) + chunk.invalid().len())
            .sum()
    }
}

fn is_zero_width_override(c: char) -> bool {
    ZERO_WIDTH
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Width of a code point (ambiguous characters narrow).
#[inline]
#[must_use]
pub fn rune_width(c: char) -> usize {
    WidthTable::global().rune_width(c)
}

/// Width of a code point with the given ambiguous-width mode.
#[inline]
#[must_use]
pub fn rune_width_with(c: char, ambiguous: AmbiguousWidth) -> usize {
    WidthTable::global().rune_width_with(c, ambiguous)
}

/// Display width of a string in terminal columns (ambiguous characters narrow).
#[must_use]
pub fn string_width(s: &str) -> usize {
    WidthTable::global().string_width(s, AmbiguousWidth::Narrow)
}

/// Display width of a string with the given ambiguous-width mode.
#[must_use]
pub fn string_width_with(s: &str, ambiguous: AmbiguousWidth) -> usize {
    WidthTable::global().string_width(s, ambiguous)
}

/// Display width of raw bytes; invalid UTF-8 counts one column per byte.
#[must_use]
pub fn bytes_width(bytes: &[u8]) -> usize {
    WidthTable::global().bytes_width(bytes, AmbiguousWidth::Narrow)
}

/// Display width of raw bytes with the given ambiguous-width mode.
#[must_use]
pub fn bytes_width_with(bytes: &[u8], ambiguous: AmbiguousWidth) -> usize {
    WidthTable::global().bytes_width(bytes, ambiguous)
}

/// Check if a character is a zero-width character.
#[must_use]
pub fn is_zero_width(c: char) -> bool {
    rune_width(c) == 0
}

/// Check if a character is wide (takes 2 columns).
#[must_use]
pub fn is_wide(c: char) -> bool {
    rune_width(c) == 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(rune_width('a'), 1);
        assert_eq!(rune_width('\0'), 0);
        assert_eq!(rune_width('\x01'), 0);
        assert_eq!(rune_width('\x7f'), 0);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(string_width("漢字"), 4);
        assert_eq!(rune_width('世'), 2);
        assert_eq!(rune_width('好'), 2);
        assert_eq!(rune_width('か'), 2);
        assert!(is_wide('漢'));
    }

    #[test]
    fn test_halfwidth_katakana() {
        assert_eq!(rune_width('ｾ'), 1);
        assert_eq!(rune_width('ｶ'), 1);
        assert_eq!(rune_width('ｲ'), 1);
    }

    #[test]
    fn test_zero_width() {
        assert!(is_zero_width('\u{0300}'));
        assert!(is_zero_width('\u{0301}'));
        assert!(is_zero_width('\u{200D}'));
        assert!(is_zero_width('\u{FE0F}'));
        assert_eq!(rune_width('\u{2028}'), 0);
        assert_eq!(rune_width('\u{2029}'), 0);
        // C1 control
        assert_eq!(rune_width('\u{9b}'), 0);
    }

    #[test]
    fn test_ambiguous_modes() {
        // Circled digit one (U+2460) is East Asian Ambiguous
        let ch = '①';
        assert_eq!(rune_width_with(ch, AmbiguousWidth::Narrow), 1);
        assert_eq!(rune_width_with(ch, AmbiguousWidth::Wide), 2);
        assert_eq!(rune_width('☆'), 1);
        assert_eq!(rune_width_with('☆', AmbiguousWidth::Wide), 2);
    }

    #[test]
    fn test_string_width_table() {
        let cases = [
            ("■㈱の世界①", 10, 12),
            ("スター☆", 7, 8),
            ("つのだ☆HIRO", 11, 12),
        ];
        for (input, narrow, wide) in cases {
            assert_eq!(string_width(input), narrow, "{input}");
            assert_eq!(string_width_with(input, AmbiguousWidth::Wide), wide, "{input}");
        }
    }

    #[test]
    fn test_zwj_sequences_are_additive() {
        assert_eq!(string_width("👩"), 2);
        assert_eq!(string_width("👩\u{200d}"), 2);
        assert_eq!(string_width("👩\u{200d}🍳"), 4);
        assert_eq!(string_width("\u{200d}🍳"), 2);
        assert_eq!(string_width("👨\u{200d}👨"), 4);
        assert_eq!(string_width("👨\u{200d}👨\u{200d}👧"), 6);
        assert_eq!(string_width("🏳\u{fe0f}\u{200d}🌈"), 3);
        assert_eq!(string_width("あ👩\u{200d}🍳い"), 8);
        assert_eq!(string_width("あ\u{200d}🍳い"), 6);
        assert_eq!(string_width("あ\u{200d}い"), 4);
    }

    #[test]
    fn test_bytes_width_invalid_utf8() {
        assert_eq!(bytes_width(b"abc"), 3);
        assert_eq!(bytes_width(b"a\xffb"), 3);
        // Truncated 3-byte sequence: two placeholder columns
        assert_eq!(bytes_width(b"\xe4\xb8"), 2);
        assert_eq!(bytes_width("世".as_bytes()), 2);
    }

    #[test]
    fn test_global_table_is_shared() {
        let a = WidthTable::global() as *const WidthTable;
        let b = WidthTable::global() as *const WidthTable;
        assert_eq!(a, b);
    }
}
