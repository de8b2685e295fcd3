//! Escape-aware tokenizer for terminal output strings.
//!
//! Splits a string into control tokens (C0/C1 controls and complete escape
//! sequences) and text tokens (one grapheme cluster each, with its display
//! width). Every call to [`Decoder::next`] consumes at least one character,
//! so malformed input always makes progress:
//! - a sequence interrupted by an unexpected character ends right before it
//! - a sequence still open at the end of input swallows the rest
//!
//! Recognised introducers, in both 7-bit (`ESC x`) and 8-bit (C1) forms:
//! CSI, OSC, DCS, SOS, PM and APC. Any other `ESC` followed by optional
//! intermediates and a final byte is a plain escape sequence.

use crate::ansi::sequences::{
    APC_C1, BEL, CSI_C1, DCS_C1, ESC, OSC_C1, PM_C1, SOS_C1, ST_C1,
};
use crate::event::{LogLevel, emit_log};
use crate::unicode::{AmbiguousWidth, WidthMethod, cluster_width, first_grapheme, string_width_with};

/// A CSI parameter, optionally followed by `:` sub-parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Param {
    /// Numeric value, `None` when the parameter was left empty.
    pub value: Option<u32>,
    /// The parameter is followed by a `:` sub-parameter.
    pub has_more: bool,
}

impl Param {
    /// Value or the supplied default when empty.
    #[must_use]
    pub fn value_or(self, default: u32) -> u32 {
        self.value.unwrap_or(default)
    }
}

/// Control Sequence Introducer sequence: `CSI [marker] params [inter] final`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsiSequence<'a> {
    params: &'a str,
    intermediates: &'a str,
    command: Option<char>,
}

impl<'a> CsiSequence<'a> {
    /// Private marker (`<`, `=`, `>`, `?`) leading the parameters.
    #[must_use]
    pub fn marker(&self) -> Option<char> {
        self.params.chars().next().filter(|c| ('<'..='?').contains(c))
    }

    /// Raw parameter bytes, marker included.
    #[must_use]
    pub fn raw_params(&self) -> &'a str {
        self.params
    }

    /// Intermediate bytes (`0x20..=0x2F`).
    #[must_use]
    pub fn intermediates(&self) -> &'a str {
        self.intermediates
    }

    /// Final byte, `None` when the sequence was cut short.
    #[must_use]
    pub fn command(&self) -> Option<char> {
        self.command
    }

    /// Whether this is a Select Graphic Rendition sequence.
    #[must_use]
    pub fn is_sgr(&self) -> bool {
        self.command == Some('m') && self.marker().is_none() && self.intermediates.is_empty()
    }

    /// Parsed parameter list.
    #[must_use]
    pub fn params(&self) -> Vec<Param> {
        let raw = self.params.trim_start_matches(|c| ('<'..='?').contains(&c));
        let mut params = Vec::new();
        if raw.is_empty() {
            return params;
        }

        let mut current = Param::default();
        for c in raw.chars() {
            match c {
                '0'..='9' => {
                    let digit = c as u32 - '0' as u32;
                    let value = current.value.unwrap_or(0);
                    current.value = Some(value.saturating_mul(10).saturating_add(digit));
                }
                ';' => {
                    params.push(current);
                    current = Param::default();
                }
                ':' => {
                    current.has_more = true;
                    params.push(current);
                    current = Param::default();
                }
                _ => {}
            }
        }
        params.push(current);
        params
    }
}

/// Operating System Command: `OSC command ; data (BEL | ST)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OscSequence<'a> {
    data: &'a str,
}

impl<'a> OscSequence<'a> {
    /// Full payload between the introducer and the terminator.
    #[must_use]
    pub fn data(&self) -> &'a str {
        self.data
    }

    /// Leading numeric command, if any.
    #[must_use]
    pub fn command(&self) -> Option<u32> {
        let head = self.data.split(';').next().unwrap_or("");
        if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        head.parse().ok()
    }
}

/// Kind of a control string sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringKind {
    /// Device Control String.
    Dcs,
    /// Start Of String.
    Sos,
    /// Privacy Message.
    Pm,
    /// Application Program Command.
    Apc,
}

/// A decoded control token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control<'a> {
    /// Single C0 or C1 control character, or DEL.
    Char(char),
    /// Control Sequence Introducer sequence.
    Csi(CsiSequence<'a>),
    /// Operating System Command.
    Osc(OscSequence<'a>),
    /// DCS, SOS, PM or APC string.
    String { kind: StringKind, data: &'a str },
    /// Any other escape sequence (`ESC [inter] final`).
    Esc { intermediates: &'a str, command: char },
}

/// What a token carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// A displayable grapheme cluster.
    Text,
    /// A control character or escape sequence.
    Control(Control<'a>),
}

/// One decoded unit of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// Exact input text covered by the token.
    pub raw: &'a str,
    /// Display width; always zero for controls.
    pub width: usize,
    /// Parsed content.
    pub kind: TokenKind<'a>,
    /// False when a sequence was cut short by malformed or missing input.
    pub complete: bool,
}

impl<'a> Token<'a> {
    fn control(raw: &'a str, control: Control<'a>, complete: bool) -> Self {
        Self {
            raw,
            width: 0,
            kind: TokenKind::Control(control),
            complete,
        }
    }

    /// Whether this is a control token.
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self.kind, TokenKind::Control(_))
    }

    /// The parsed control, if any.
    #[must_use]
    pub fn as_control(&self) -> Option<&Control<'a>> {
        match &self.kind {
            TokenKind::Control(c) => Some(c),
            TokenKind::Text => None,
        }
    }
}

/// Cursor over an input string yielding [`Token`]s.
///
/// The decoder is a plain value: clone it to look ahead, or read
/// [`position`](Self::position) to know how much input was consumed.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    input: &'a str,
    pos: usize,
    method: WidthMethod,
    ambiguous: AmbiguousWidth,
}

impl<'a> Decoder<'a> {
    /// Decoder measuring text with the given method and ambiguous mode.
    #[must_use]
    pub fn new(input: &'a str, method: WidthMethod, ambiguous: AmbiguousWidth) -> Self {
        Self {
            input,
            pos: 0,
            method,
            ambiguous,
        }
    }

    /// Byte offset of the next token.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Input not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn finish(&mut self, len: usize, token: Token<'a>) -> Token<'a> {
        if !token.complete && self.pos + len == self.input.len() {
            emit_log(
                LogLevel::Debug,
                &format!("unterminated escape sequence at byte {}", self.pos),
            );
        }
        self.pos += len;
        token
    }

    fn decode_text(&self, rest: &'a str) -> Token<'a> {
        let cluster = first_grapheme(rest);
        let width = match self.method {
            WidthMethod::WcWidth => string_width_with(cluster, self.ambiguous),
            WidthMethod::Grapheme => cluster_width(cluster, self.ambiguous),
        };
        Token {
            raw: cluster,
            width,
            kind: TokenKind::Text,
            complete: true,
        }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.remaining();
        let first = rest.chars().next()?;

        let token = match first {
            ESC => decode_escape(rest),
            CSI_C1 => decode_csi(rest, first.len_utf8()),
            OSC_C1 => decode_osc(rest, first.len_utf8()),
            DCS_C1 => decode_string(rest, first.len_utf8(), StringKind::Dcs),
            SOS_C1 => decode_string(rest, first.len_utf8(), StringKind::Sos),
            PM_C1 => decode_string(rest, first.len_utf8(), StringKind::Pm),
            APC_C1 => decode_string(rest, first.len_utf8(), StringKind::Apc),
            c if c.is_control() => {
                let len = c.len_utf8();
                Token::control(&rest[..len], Control::Char(c), true)
            }
            _ => self.decode_text(rest),
        };

        let len = token.raw.len();
        Some(self.finish(len, token))
    }
}

fn decode_escape(rest: &str) -> Token<'_> {
    let Some(next) = rest[1..].chars().next() else {
        return Token::control(rest, Control::Char(ESC), false);
    };

    match next {
        '[' => decode_csi(rest, 2),
        ']' => decode_osc(rest, 2),
        'P' => decode_string(rest, 2, StringKind::Dcs),
        'X' => decode_string(rest, 2, StringKind::Sos),
        '^' => decode_string(rest, 2, StringKind::Pm),
        '_' => decode_string(rest, 2, StringKind::Apc),
        _ => decode_plain_escape(rest),
    }
}

/// `ESC [0x20..=0x2F]* [0x30..=0x7E]`.
fn decode_plain_escape(rest: &str) -> Token<'_> {
    let body = &rest[1..];
    let inter_len = body
        .bytes()
        .take_while(|b| (0x20..=0x2F).contains(b))
        .count();
    let intermediates = &body[..inter_len];

    match body[inter_len..].chars().next() {
        Some(c) if ('\x30'..='\x7e').contains(&c) => {
            let len = 1 + inter_len + 1;
            Token::control(
                &rest[..len],
                Control::Esc {
                    intermediates,
                    command: c,
                },
                true,
            )
        }
        // Not an escape sequence: emit the lone ESC and let the rest decode
        // on its own.
        Some(_) if inter_len == 0 => Token::control(&rest[..1], Control::Char(ESC), true),
        Some(_) => Token::control(
            &rest[..=inter_len],
            Control::Esc {
                intermediates,
                command: '\0',
            },
            false,
        ),
        None => Token::control(
            rest,
            Control::Esc {
                intermediates,
                command: '\0',
            },
            false,
        ),
    }
}

fn decode_csi(rest: &str, intro: usize) -> Token<'_> {
    let body = &rest[intro..];
    let mut params_end = 0;
    let mut inter_end = 0;
    let mut in_intermediates = false;

    for (i, b) in body.bytes().enumerate() {
        match b {
            0x30..=0x3F if !in_intermediates => {
                params_end = i + 1;
                inter_end = i + 1;
            }
            0x20..=0x2F => {
                in_intermediates = true;
                inter_end = i + 1;
            }
            0x40..=0x7E => {
                let csi = CsiSequence {
                    params: &body[..params_end],
                    intermediates: &body[params_end..inter_end],
                    command: Some(b as char),
                };
                return Token::control(&rest[..intro + i + 1], Control::Csi(csi), true);
            }
            // Anything else aborts the sequence before the offending byte
            _ => {
                let csi = CsiSequence {
                    params: &body[..params_end],
                    intermediates: &body[params_end..inter_end],
                    command: None,
                };
                return Token::control(&rest[..intro + i], Control::Csi(csi), false);
            }
        }
    }

    let csi = CsiSequence {
        params: &body[..params_end],
        intermediates: &body[params_end..inter_end],
        command: None,
    };
    Token::control(rest, Control::Csi(csi), false)
}

fn decode_osc(rest: &str, intro: usize) -> Token<'_> {
    let body = &rest[intro..];
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let (data_end, term_len, complete) = match c {
            BEL | ST_C1 => (i, c.len_utf8(), true),
            ESC => match chars.peek() {
                Some(&(_, '\\')) => (i, 2, true),
                // ESC starts a new sequence; this one ends unterminated
                _ => (i, 0, false),
            },
            _ => continue,
        };
        let osc = OscSequence {
            data: &body[..data_end],
        };
        return Token::control(
            &rest[..intro + data_end + term_len],
            Control::Osc(osc),
            complete,
        );
    }

    Token::control(rest, Control::Osc(OscSequence { data: body }), false)
}

fn decode_string(rest: &str, intro: usize, kind: StringKind) -> Token<'_> {
    let body = &rest[intro..];
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let (term_len, complete) = match c {
            ST_C1 => (c.len_utf8(), true),
            ESC => match chars.peek() {
                Some(&(_, '\\')) => (2, true),
                _ => (0, false),
            },
            _ => continue,
        };
        let data = &body[..i];
        return Token::control(
            &rest[..intro + i + term_len],
            Control::String { kind, data },
            complete,
        );
    }

    Token::control(rest, Control::String { kind, data: body }, false)
}
