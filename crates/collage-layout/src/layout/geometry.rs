//! Physical placement of the grid on the page
//!
//! The grid is centred inside the usable area (page minus margin), so any
//! leftover space is split evenly on both sides.

use crate::types::CollageState;

use super::{Axis, CutLine, GridPosition, Rect};

/// Top-left corner of the grid in millimeters
pub fn grid_origin(state: &CollageState) -> (f32, f32) {
    let (page_width, page_height) = state.page_dimensions_mm();
    let (cell_width, cell_height) = state.cell_dimensions_mm();
    let margin = state.page.margin_mm;

    let grid_width = state.columns as f32 * cell_width;
    let grid_height = state.rows as f32 * cell_height;

    let x = margin + (page_width - 2.0 * margin - grid_width) / 2.0;
    let y = margin + (page_height - 2.0 * margin - grid_height) / 2.0;
    (x, y)
}

/// Bounds of a cell on the page. `None` outside the grid.
pub fn cell_rect(state: &CollageState, pos: GridPosition) -> Option<Rect> {
    if pos.row >= state.rows || pos.col >= state.columns {
        return None;
    }

    let (origin_x, origin_y) = grid_origin(state);
    let (cell_width, cell_height) = state.cell_dimensions_mm();

    Some(Rect::new(
        origin_x + pos.col as f32 * cell_width,
        origin_y + pos.row as f32 * cell_height,
        cell_width,
        cell_height,
    ))
}

/// Guide lines along every cell boundary, running edge to edge across the page.
///
/// Empty for a degenerate grid. The view layer decides whether to draw them
/// from `state.cutting_markers`.
pub fn cut_lines(state: &CollageState) -> Vec<CutLine> {
    if state.total_cells() == 0 {
        return Vec::new();
    }

    let (page_width, page_height) = state.page_dimensions_mm();
    let (origin_x, origin_y) = grid_origin(state);
    let (cell_width, cell_height) = state.cell_dimensions_mm();

    let vertical = (0..=state.columns).map(|col| CutLine {
        axis: Axis::Vertical,
        position_mm: origin_x + col as f32 * cell_width,
        start_mm: 0.0,
        end_mm: page_height,
    });
    let horizontal = (0..=state.rows).map(|row| CutLine {
        axis: Axis::Horizontal,
        position_mm: origin_y + row as f32 * cell_height,
        start_mm: 0.0,
        end_mm: page_width,
    });

    vertical.chain(horizontal).collect()
}
