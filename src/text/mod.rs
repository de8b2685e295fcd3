//! Text layout over escape-laden strings.
//!
//! - [`wrap`]: word wrap to a column limit, carrying SGR style and OSC 8
//!   hyperlink state across inserted line breaks
//! - [`WrapOptions`]: measuring method, ambiguous width, breakpoints
//!
//! # Examples
//!
//! ```
//! use cellwrap::text::{WrapOptions, wrap_with};
//!
//! let opts = WrapOptions::new("/").with_preserve_space(true);
//! assert_eq!(wrap_with("usr/local/bin", 6, &opts), "usr/\nlocal/\nbin");
//! ```

mod wrap;

pub use wrap::{WrapOptions, wrap, wrap_to_writer, wrap_with};
