//! Damage: screen regions that changed and must be repainted.
//!
//! A renderer records damage as it mutates the grid and reads the
//! [`bounds`](Damage::bounds) back when deciding what to repaint. Combining
//! many damage values into a minimal repaint set is the renderer's job.

use crate::geometry::{Position, Rect};

/// A single damaged cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellDamage {
    pub x: i32,
    pub y: i32,
}

impl CellDamage {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 1x1 rectangle at the cell.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, 1, 1)
    }
}

impl From<Position> for CellDamage {
    fn from(p: Position) -> Self {
        Self::new(p.x, p.y)
    }
}

/// A damaged rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RectDamage(pub Rect);

impl RectDamage {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self(Rect::new(x, y, width, height))
    }

    /// The rectangle itself.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.0
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.0.y
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.0.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.0.height
    }
}

impl From<Rect> for RectDamage {
    fn from(rect: Rect) -> Self {
        Self(rect)
    }
}

/// The whole screen is damaged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenDamage {
    pub width: u32,
    pub height: u32,
}

impl ScreenDamage {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The full screen, anchored at the origin.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// A damaged region of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Damage {
    Cell(CellDamage),
    Rect(RectDamage),
    Screen(ScreenDamage),
}

impl Damage {
    /// Damage covering one cell.
    #[must_use]
    pub const fn cell(x: i32, y: i32) -> Self {
        Self::Cell(CellDamage::new(x, y))
    }

    /// Damage covering a rectangle.
    #[must_use]
    pub const fn rect(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::Rect(RectDamage::new(x, y, width, height))
    }

    /// Damage covering a whole screen of the given size.
    #[must_use]
    pub const fn screen(width: u32, height: u32) -> Self {
        Self::Screen(ScreenDamage::new(width, height))
    }

    /// Bounding rectangle of the damaged area.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        match self {
            Self::Cell(d) => d.bounds(),
            Self::Rect(d) => d.bounds(),
            Self::Screen(d) => d.bounds(),
        }
    }
}

impl From<CellDamage> for Damage {
    fn from(d: CellDamage) -> Self {
        Self::Cell(d)
    }
}

impl From<RectDamage> for Damage {
    fn from(d: RectDamage) -> Self {
        Self::Rect(d)
    }
}

impl From<ScreenDamage> for Damage {
    fn from(d: ScreenDamage) -> Self {
        Self::Screen(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bounds() {
        assert_eq!(CellDamage::new(1, 1).bounds(), Rect::new(1, 1, 1, 1));
        assert_eq!(Damage::cell(7, 3).bounds(), Rect::new(7, 3, 1, 1));
    }

    #[test]
    fn test_rect_bounds() {
        let d = RectDamage::new(2, 3, 4, 5);
        assert_eq!(d.bounds(), Rect::new(2, 3, 4, 5));
        assert_eq!((d.x(), d.y(), d.width(), d.height()), (2, 3, 4, 5));
    }

    #[test]
    fn test_screen_bounds() {
        let d = ScreenDamage::new(80, 24);
        assert_eq!(d.bounds(), Rect::new(0, 0, 80, 24));
    }

    #[test]
    fn test_uniform_access() {
        let damages: Vec<Damage> = vec![
            CellDamage::new(0, 0).into(),
            RectDamage::from(Rect::new(5, 5, 2, 2)).into(),
            ScreenDamage::new(10, 4).into(),
        ];
        let bounds: Vec<Rect> = damages.iter().map(Damage::bounds).collect();
        assert_eq!(
            bounds,
            vec![
                Rect::new(0, 0, 1, 1),
                Rect::new(5, 5, 2, 2),
                Rect::new(0, 0, 10, 4),
            ]
        );
    }

    #[test]
    fn test_cell_from_position() {
        let d: CellDamage = Position::new(4, 9).into();
        assert_eq!(d.bounds(), Rect::new(4, 9, 1, 1));
    }

    #[test]
    fn test_damage_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<Damage>();
    }
}
