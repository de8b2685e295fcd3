//! Fuzz target for escape-aware wrapping.
//!
//! Wrapping must never panic, and plain text must come back with every
//! non-space character in order.

#![no_main]

use arbitrary::Arbitrary;
use cellwrap::unicode::{AmbiguousWidth, WidthMethod};
use cellwrap::{WrapOptions, wrap_with};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    limit: u8,
    grapheme: bool,
    wide: bool,
    preserve_space: bool,
    breakpoints: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let options = WrapOptions::new(input.breakpoints)
        .with_method(if input.grapheme {
            WidthMethod::Grapheme
        } else {
            WidthMethod::WcWidth
        })
        .with_ambiguous(if input.wide {
            AmbiguousWidth::Wide
        } else {
            AmbiguousWidth::Narrow
        })
        .with_preserve_space(input.preserve_space);

    let out = wrap_with(input.text, usize::from(input.limit), &options);

    if input.limit == 0 {
        assert_eq!(out, input.text);
    }
    if input.text.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        let kept: String = out.chars().filter(|c| !c.is_whitespace()).collect();
        let want: String = input.text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(kept, want);
    }
});
