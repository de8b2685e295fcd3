//! Constant ANSI escape sequences.

/// Escape.
pub const ESC: char = '\x1b';

/// Bell, terminates OSC strings.
pub const BEL: char = '\x07';

/// 8-bit String Terminator.
pub const ST_C1: char = '\u{9c}';

/// 8-bit Control Sequence Introducer.
pub const CSI_C1: char = '\u{9b}';

/// 8-bit Operating System Command.
pub const OSC_C1: char = '\u{9d}';

/// 8-bit Device Control String.
pub const DCS_C1: char = '\u{90}';

/// 8-bit Start Of String.
pub const SOS_C1: char = '\u{98}';

/// 8-bit Privacy Message.
pub const PM_C1: char = '\u{9e}';

/// 8-bit Application Program Command.
pub const APC_C1: char = '\u{9f}';

/// Reset all text attributes (SGR with no parameters).
pub const RESET_STYLE: &str = "\x1b[m";

/// Close the active OSC 8 hyperlink.
pub const RESET_HYPERLINK: &str = "\x1b]8;;\x07";

/// OSC command number for hyperlinks.
pub const OSC_HYPERLINK: u32 = 8;

/// Attribute reset sequences.
pub mod attr {
    /// Reset bold/dim.
    pub const RESET_INTENSITY: &str = "\x1b[22m";
    /// Reset italic.
    pub const RESET_ITALIC: &str = "\x1b[23m";
    /// Reset underline.
    pub const RESET_UNDERLINE: &str = "\x1b[24m";
    /// Reset blink.
    pub const RESET_BLINK: &str = "\x1b[25m";
    /// Reset inverse.
    pub const RESET_INVERSE: &str = "\x1b[27m";
    /// Reset hidden.
    pub const RESET_HIDDEN: &str = "\x1b[28m";
    /// Reset strikethrough.
    pub const RESET_STRIKETHROUGH: &str = "\x1b[29m";
}

/// Color reset sequences.
pub mod color {
    /// Reset foreground to default.
    pub const FG_DEFAULT: &str = "\x1b[39m";
    /// Reset background to default.
    pub const BG_DEFAULT: &str = "\x1b[49m";
    /// Reset underline color to default.
    pub const UNDERLINE_DEFAULT: &str = "\x1b[59m";
}
