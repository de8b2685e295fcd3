//! Fuzz target for the escape sequence decoder.
//!
//! Every token must be non-empty and the tokens must tile the input exactly.

#![no_main]

use cellwrap::ansi::Decoder;
use cellwrap::unicode::{AmbiguousWidth, WidthMethod};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    for method in [WidthMethod::WcWidth, WidthMethod::Grapheme] {
        let mut rebuilt = String::with_capacity(input.len());
        for token in Decoder::new(&input, method, AmbiguousWidth::Narrow) {
            assert!(!token.raw.is_empty(), "decoder produced an empty token");
            assert!(token.width <= 2 || method == WidthMethod::WcWidth);
            rebuilt.push_str(token.raw);
        }
        assert_eq!(rebuilt, input);
    }
});
