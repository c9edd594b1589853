//! Layout data types
//!
//! These types carry the results of the grid calculation between the
//! calculator, the cell assignment engine and the view layer.

use crate::types::Orientation;

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell-{}-{}", self.row, self.col)
    }
}

/// Outcome of fitting a cell template onto a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridResult {
    pub rows: usize,
    pub columns: usize,
    /// Orientation of the cell template that produced this grid
    pub orientation: Orientation,
    pub total_cells: usize,
}

impl GridResult {
    /// No room for any cell
    pub const EMPTY: GridResult = GridResult {
        rows: 0,
        columns: 0,
        orientation: Orientation::Portrait,
        total_cells: 0,
    };

    pub fn new(rows: usize, columns: usize, orientation: Orientation) -> Self {
        Self {
            rows,
            columns,
            orientation,
            total_cells: rows * columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_cells == 0
    }
}

/// A rectangular area in millimeters, measured from the page's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Direction of a cutting guide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Runs top to bottom at a fixed x
    Vertical,
    /// Runs left to right at a fixed y
    Horizontal,
}

/// A straight cutting guide across the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLine {
    pub axis: Axis,
    /// x for vertical lines, y for horizontal lines
    pub position_mm: f32,
    /// Start of the line along its axis
    pub start_mm: f32,
    /// End of the line along its axis
    pub end_mm: f32,
}
