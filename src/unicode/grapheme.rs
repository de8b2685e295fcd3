//! Grapheme cluster iteration and cluster width.

use crate::unicode::width::{AmbiguousWidth, WidthTable};
use unicode_segmentation::UnicodeSegmentation;

/// Iterator over grapheme clusters in a string.
pub struct GraphemeIterator<'a> {
    inner: unicode_segmentation::Graphemes<'a>,
}

impl<'a> Iterator for GraphemeIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Iterate over extended grapheme clusters in a string.
#[must_use]
pub fn graphemes(s: &str) -> GraphemeIterator<'_> {
    GraphemeIterator {
        inner: s.graphemes(true),
    }
}

/// The first extended grapheme cluster of `s`, or `""` when `s` is empty.
#[must_use]
pub fn first_grapheme(s: &str) -> &str {
    s.graphemes(true).next().unwrap_or("")
}

const VS16: char = '\u{FE0F}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

/// Display width of one grapheme cluster.
///
/// The cluster takes the width of its first non-zero-width code point.
/// Emoji presentation (VS16) and regional indicator pairs force two columns.
/// The result never exceeds two.
#[must_use]
pub fn cluster_width(cluster: &str, ambiguous: AmbiguousWidth) -> usize {
    let table = WidthTable::global();
    let mut chars = cluster.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    if is_regional_indicator(first) || cluster.contains(VS16) {
        return 2;
    }

    let mut width = table.rune_width_with(first, ambiguous);
    if width == 0 {
        width = chars
            .map(|c| table.rune_width_with(c, ambiguous))
            .find(|&w| w > 0)
            .unwrap_or(0);
    }
    width.min(2)
}
