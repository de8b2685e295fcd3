//! `cellwrap` - terminal cell-width measurement and escape-aware wrapping
//!
//! Measures how many terminal columns text occupies, walks strings that mix
//! text with ANSI escape sequences, and word-wraps such strings while keeping
//! their SGR styling and OSC 8 hyperlinks intact across line breaks. Also
//! carries the small damage-region types a cell renderer records repaints
//! with.
//!
//! ```
//! use cellwrap::{rune_width, string_width, wrap};
//!
//! assert_eq!(rune_width('世'), 2);
//! assert_eq!(string_width("\x1b[1mbold\x1b[m"), 4);
//! assert_eq!(wrap("hello world", 5, ""), "hello\nworld");
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // SGR values are clamped before narrowing
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow damage::CellDamage etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod ansi;
pub mod color;
pub mod damage;
pub mod error;
pub mod event;
pub mod geometry;
pub mod link;
pub mod style;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use color::Color;
pub use damage::{CellDamage, Damage, RectDamage, ScreenDamage};
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use geometry::{Position, Rect};
pub use link::Link;
pub use style::{Style, TextAttributes, UnderlineStyle};

// Re-export ANSI decoding
pub use ansi::{Decoder, Token, string_width};

// Re-export wrapping and width measurement
pub use text::{WrapOptions, wrap, wrap_to_writer, wrap_with};
pub use unicode::{AmbiguousWidth, WidthMethod, rune_width, rune_width_with};
