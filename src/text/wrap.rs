//! Escape-aware word wrapping.
//!
//! [`wrap`] reflows a string to a column limit while treating escape
//! sequences as opaque, zero-width units. SGR (style) and OSC 8 (hyperlink)
//! sequences are also tracked, so that every inserted line break closes the
//! active style and link and reopens them on the next line:
//!
//! ```text
//! ESC[31mhello world  --limit 5-->  ESC[31mhello ESC[m \n ESC[31m world
//! ```
//!
//! Words are broken at spaces and breakpoints (`-` always, plus any
//! configured characters). Words longer than the limit are hard-wrapped.
//! Spaces at the start of a wrapped line are dropped unless
//! [`WrapOptions::preserve_space`] is set.

use crate::ansi::{self, Control, Decoder, Token};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::link::{Link, read_link};
use crate::style::{Style, read_style};
use crate::unicode::{AmbiguousWidth, WidthMethod, rune_width_with};
use std::io::Write;

/// Hyphen is always a breakpoint.
const HYPHEN: char = '-';

/// Wrapping configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WrapOptions {
    /// How text clusters are measured.
    pub method: WidthMethod,
    /// Width of East Asian Ambiguous characters.
    pub ambiguous: AmbiguousWidth,
    /// Keep spaces at the beginning of a line.
    pub preserve_space: bool,
    /// Extra breakpoint characters; each must be one column wide.
    pub breakpoints: Vec<char>,
}

impl WrapOptions {
    /// Default options with the given breakpoint characters.
    #[must_use]
    pub fn new(breakpoints: &str) -> Self {
        Self {
            breakpoints: breakpoints.chars().collect(),
            ..Self::default()
        }
    }

    /// Set the measuring method.
    #[must_use]
    pub fn with_method(mut self, method: WidthMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the ambiguous-width mode.
    #[must_use]
    pub fn with_ambiguous(mut self, ambiguous: AmbiguousWidth) -> Self {
        self.ambiguous = ambiguous;
        self
    }

    /// Keep or drop spaces at the beginning of a line.
    #[must_use]
    pub fn with_preserve_space(mut self, preserve: bool) -> Self {
        self.preserve_space = preserve;
        self
    }

    /// Replace the breakpoint characters.
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: &str) -> Self {
        self.breakpoints = breakpoints.chars().collect();
        self
    }

    /// Check that every breakpoint occupies exactly one column.
    pub fn validate(&self) -> Result<()> {
        for &ch in &self.breakpoints {
            let width = rune_width_with(ch, self.ambiguous);
            if width != 1 {
                emit_log(
                    LogLevel::Warn,
                    &format!("rejecting breakpoint {ch:?} of width {width}"),
                );
                return Err(Error::InvalidBreakpoint { ch, width });
            }
        }
        Ok(())
    }

    fn is_breakpoint(&self, ch: char) -> bool {
        ch == HYPHEN || self.breakpoints.contains(&ch)
    }
}

/// Wrap `s` to `limit` columns, breaking at spaces, hyphens and the
/// characters in `breakpoints`.
///
/// A `limit` of zero returns the input unchanged. A breakpoint that does not
/// fit at the end of a line moves to the next line with the word it ends.
///
/// ```
/// assert_eq!(cellwrap::wrap("hello world", 5, ""), "hello\nworld");
/// ```
#[must_use]
pub fn wrap(s: &str, limit: usize, breakpoints: &str) -> String {
    wrap_with(s, limit, &WrapOptions::new(breakpoints))
}

/// Wrap with explicit options.
#[must_use]
pub fn wrap_with(s: &str, limit: usize, options: &WrapOptions) -> String {
    if s.is_empty() {
        return String::new();
    }
    if limit == 0 {
        return s.to_string();
    }
    LineWrapper::new(limit, options, s.len()).run(s)
}

/// Wrap and write the result to `w`.
///
/// The options are validated first. The whole result is built in memory and
/// written with a single `write_all`.
pub fn wrap_to_writer<W: Write>(
    w: &mut W,
    s: &str,
    limit: usize,
    options: &WrapOptions,
) -> Result<()> {
    options.validate()?;
    let wrapped = wrap_with(s, limit, options);
    w.write_all(wrapped.as_bytes())?;
    Ok(())
}

/// Per-call wrapping state.
///
/// `line_width` counts columns already committed to `out` on the current
/// line. `word` and `space` hold text not yet committed, along with their
/// widths. `style` and `link` track every escape seen so far, including those
/// still pending in `word`; `line_style` and `line_link` are the state at the
/// end of `out`, which is what a break must close and reopen.
struct LineWrapper<'o> {
    options: &'o WrapOptions,
    limit: usize,
    out: String,
    word: String,
    word_width: usize,
    space: String,
    space_width: usize,
    line_width: usize,
    style: Style,
    link: Link,
    line_style: Style,
    line_link: Link,
}

impl<'o> LineWrapper<'o> {
    fn new(limit: usize, options: &'o WrapOptions, capacity: usize) -> Self {
        Self {
            options,
            limit,
            out: String::with_capacity(capacity + capacity / 4),
            word: String::new(),
            word_width: 0,
            space: String::new(),
            space_width: 0,
            line_width: 0,
            style: Style::default(),
            link: Link::default(),
            line_style: Style::default(),
            line_link: Link::default(),
        }
    }

    fn run(mut self, s: &str) -> String {
        let decoder = Decoder::new(s, self.options.method, self.options.ambiguous);
        for token in decoder {
            if token.width == 0 {
                self.control(&token);
            } else {
                self.text(&token);
            }
        }

        self.end_line_spaces();
        self.flush_word();
        self.out
    }

    fn control(&mut self, token: &Token<'_>) {
        match token.as_control() {
            Some(Control::Csi(csi)) if csi.is_sgr() => {
                read_style(&csi.params(), &mut self.style);
            }
            Some(Control::Osc(osc)) if osc.command() == Some(ansi::OSC_HYPERLINK) => {
                read_link(osc.data(), &mut self.link);
            }
            Some(Control::Char('\n')) => {
                self.end_line_spaces();
                self.flush_word();
                self.newline();
                return;
            }
            _ => {}
        }
        // Escapes ride along with the word they precede
        self.word.push_str(token.raw);
    }

    fn text(&mut self, token: &Token<'_>) {
        let raw = token.raw;
        let width = token.width;

        if raw.chars().all(char::is_whitespace) {
            self.flush_word();
            if self.options.preserve_space || self.line_width != 0 {
                self.space.push_str(raw);
                self.space_width += width;
            }
            return;
        }

        let mut chars = raw.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if self.options.is_breakpoint(ch) {
                self.breakpoint(raw, width);
                return;
            }
        }

        if self.line_width > self.limit {
            self.newline();
        }
        if self.word_width + width >= self.limit {
            // Hard-wrap a word that cannot fit on any line
            self.flush_word();
        }
        self.word.push_str(raw);
        self.word_width += width;

        if self.line_width + self.word_width + self.space_width > self.limit {
            self.newline();
        }
    }

    fn breakpoint(&mut self, raw: &str, width: usize) {
        if self.line_width + self.space_width + self.word_width + width < self.limit {
            self.flush_word();
            self.flush_space();
            self.out.push_str(raw);
            self.line_width += width;
            return;
        }

        // No room to end the line here: keep the breakpoint in the word
        if self.word_width + width > self.limit {
            self.flush_word();
        }
        self.word.push_str(raw);
        self.word_width += width;
        if self.line_width + self.space_width + self.word_width > self.limit {
            self.newline();
        }
    }

    fn end_line_spaces(&mut self) {
        if self.word_width != 0 {
            return;
        }
        if self.line_width + self.space_width > self.limit {
            self.line_width = 0;
        } else {
            self.out.push_str(&self.space);
        }
        self.clear_space();
    }

    fn flush_space(&mut self) {
        self.line_width += self.space_width;
        self.out.push_str(&self.space);
        self.clear_space();
    }

    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        // A word of escapes alone leaves an overflowing space pending, so
        // the trailing-space decision can still drop it
        if self.word_width != 0 || self.line_width + self.space_width <= self.limit {
            self.flush_space();
        }
        self.line_width += self.word_width;
        self.out.push_str(&self.word);
        self.word.clear();
        self.word_width = 0;
        self.line_style = self.style;
        self.line_link.clone_from(&self.link);
    }

    fn clear_space(&mut self) {
        self.space.clear();
        self.space_width = 0;
    }

    /// Break the line, closing and reopening the link and style in effect at
    /// the end of the committed output. Escapes still pending in the word
    /// follow the break on their own.
    fn newline(&mut self) {
        if !self.line_link.is_empty() {
            self.out.push_str(ansi::RESET_HYPERLINK);
        }
        if !self.line_style.is_empty() {
            self.out.push_str(ansi::RESET_STYLE);
        }

        self.out.push('\n');
        self.line_width = 0;

        if !self.line_style.is_empty() {
            self.out.push_str(&self.line_style.sequence());
        }
        if !self.line_link.is_empty() {
            self.out.push_str(&self.line_link.sequence());
        }
        self.clear_space();
    }
}
