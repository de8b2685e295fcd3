//! Unicode utilities for grapheme handling and display width.

mod grapheme;
mod width;

pub use grapheme::{GraphemeIterator, cluster_width, first_grapheme, graphemes};
pub use width::{
    AmbiguousWidth, WidthMethod, WidthTable, bytes_width, bytes_width_with, is_wide,
    is_zero_width, rune_width, rune_width_with, string_width, string_width_with,
};
