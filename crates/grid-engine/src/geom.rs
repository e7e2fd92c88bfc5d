//! Grid geometry primitives. All coordinates are whole grid cells with the
//! origin at the top-left; y grows downward.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A grid cell address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Cell {
    /// Cell at column `x`, row `y`.
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A widget footprint in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl Size {
    /// Size of `w` columns by `h` rows.
    #[inline]
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Axis-aligned rectangle of cells: columns `x..x+w`, rows `y..y+h`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl Rect {
    /// Rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of `size` with its top-left at `cell`.
    #[inline]
    pub const fn from_parts(cell: Cell, size: Size) -> Self {
        Self::new(cell.x, cell.y, size.w, size.h)
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Top-left cell.
    #[inline]
    pub const fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Same size, moved to `cell`.
    #[inline]
    pub const fn at(&self, cell: Cell) -> Self {
        Self::new(cell.x, cell.y, self.w, self.h)
    }

    /// True if the rectangle fits horizontally in a grid of `cols` columns.
    #[inline]
    pub const fn in_bounds(&self, cols: u32) -> bool {
        self.right() <= cols
    }

    /// Move left just enough to fit in `cols` columns (width is clamped too).
    pub fn clamped_to(&self, cols: u32) -> Self {
        let w = self.w.min(cols.max(1));
        let x = self.x.min(cols.saturating_sub(w));
        Self::new(x, self.y, w, self.h)
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({},{} {}x{})", self.x, self.y, self.w, self.h)
    }
}

/// Lowest occupied row boundary: the first row below every rectangle.
pub fn bottom_of(rects: &[Rect]) -> u32 {
    rects.iter().map(Rect::bottom).max().unwrap_or(0)
}
