//! Grid coordinate types shared by the geometric analyses.

use serde::{Deserialize, Serialize};

/// Integer cell on the antenna grid (`x` is the column, `y` the row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Rectangular grid extent: valid cells are `0..cols` by `0..rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridBounds {
    pub rows: i32,
    pub cols: i32,
}

impl GridBounds {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Inclusive-exclusive containment test.
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// The cell at a widened coordinate, or `None` when it lies off the grid.
    pub fn cell_at(&self, x: i64, y: i64) -> Option<GridPos> {
        let pos = GridPos::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?);
        self.contains(pos).then_some(pos)
    }
}
