//! Terminal colors as carried by SGR sequences.
//!
//! Colors are passed through exactly as the terminal was asked to show them.
//! There is no conversion between palettes and no blending: a color read from
//! `ESC [ 38;5;196 m` is written back as `38;5;196`.

/// A color selected by an SGR sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 16 basic ANSI colors (0-7 normal, 8-15 bright).
    Basic(u8),
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Self = Self::Basic(0);
    pub const RED: Self = Self::Basic(1);
    pub const GREEN: Self = Self::Basic(2);
    pub const YELLOW: Self = Self::Basic(3);
    pub const BLUE: Self = Self::Basic(4);
    pub const MAGENTA: Self = Self::Basic(5);
    pub const CYAN: Self = Self::Basic(6);
    pub const WHITE: Self = Self::Basic(7);

    /// Basic color from an index, masked to the 16-color range.
    #[must_use]
    pub const fn basic(index: u8) -> Self {
        Self::Basic(index & 0x0F)
    }

    /// Bright variant of a basic color (`Basic(n)` becomes `Basic(n + 8)`).
    ///
    /// Indexed and RGB colors are returned unchanged.
    #[must_use]
    pub const fn bright(self) -> Self {
        match self {
            Self::Basic(n) => Self::Basic((n & 0x07) | 0x08),
            other => other,
        }
    }

    /// Whether this is one of the 16 basic colors.
    #[must_use]
    pub const fn is_basic(self) -> bool {
        matches!(self, Self::Basic(_))
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::Rgb(r, g, b)
    }
}
