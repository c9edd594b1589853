//! Grid dimension calculation
//!
//! Decides how many cells of a given template fit on a page once the margin
//! is taken off, and in which orientation.

use crate::constants::FIT_EPSILON;
use crate::types::{LayoutPreset, Orientation, SpaceMode};

use super::GridResult;

// =============================================================================
// Grid Calculation
// =============================================================================

/// Compute the best-fitting grid for a page.
///
/// All linear inputs are millimeters.
///
/// * Loose mode always returns the portrait candidate.
/// * Tight mode also tries the cell template rotated by 90° and keeps the
///   candidate with more cells; ties go to portrait.
///
/// A margin that eats the whole page, or a non-positive cell size, gives
/// [`GridResult::EMPTY`] rather than an error.
///
/// # Arguments
/// * `page_width` / `page_height` - Page size, orientation already applied
/// * `cell_width` / `cell_height` - Cell template size
/// * `margin` - Uniform margin on every edge
/// * `mode` - Space optimization mode
pub fn compute_grid(
    page_width: f32,
    page_height: f32,
    cell_width: f32,
    cell_height: f32,
    margin: f32,
    mode: SpaceMode,
) -> GridResult {
    let usable_width = page_width - 2.0 * margin;
    let usable_height = page_height - 2.0 * margin;

    if !(usable_width > 0.0 && usable_height > 0.0) {
        return GridResult::EMPTY;
    }
    if !(cell_width > 0.0 && cell_height > 0.0) {
        return GridResult::EMPTY;
    }

    let portrait = fit_candidate(
        usable_width,
        usable_height,
        cell_width,
        cell_height,
        Orientation::Portrait,
    );

    match mode {
        SpaceMode::Loose => portrait,
        SpaceMode::Tight => {
            let landscape = fit_candidate(
                usable_width,
                usable_height,
                cell_height,
                cell_width,
                Orientation::Landscape,
            );
            if landscape.total_cells > portrait.total_cells {
                landscape
            } else {
                portrait
            }
        }
    }
}

/// Compute the grid for a page/layout preset pair
pub fn compute_grid_for(
    page_width: f32,
    page_height: f32,
    margin: f32,
    layout: &LayoutPreset,
    mode: SpaceMode,
) -> GridResult {
    compute_grid(
        page_width,
        page_height,
        layout.cell_width_mm,
        layout.cell_height_mm,
        margin,
        mode,
    )
}

/// Cell size as placed on the page for a grid orientation
pub fn cell_dimensions(cell_width: f32, cell_height: f32, orientation: Orientation) -> (f32, f32) {
    match orientation {
        Orientation::Portrait => (cell_width, cell_height),
        Orientation::Landscape => (cell_height, cell_width),
    }
}

fn fit_candidate(
    usable_width: f32,
    usable_height: f32,
    cell_width: f32,
    cell_height: f32,
    orientation: Orientation,
) -> GridResult {
    let columns = fit_count(usable_width, cell_width);
    let rows = fit_count(usable_height, cell_height);
    if rows == 0 || columns == 0 {
        return GridResult::EMPTY;
    }
    GridResult::new(rows, columns, orientation)
}

/// How many whole cells of `cell` fit in `available`: `floor(available / cell)`,
/// with one more cell accepted only when it overruns by float noise
fn fit_count(available: f32, cell: f32) -> usize {
    let whole = (available / cell).floor();
    let next = whole + 1.0;
    if next * cell <= available * (1.0 + FIT_EPSILON) {
        next as usize
    } else {
        whole as usize
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_two_by_two_loose() {
        let grid = compute_grid(210.0, 297.0, 89.0, 127.0, 5.0, SpaceMode::Loose);

        assert_eq!(grid.columns, 2);
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.total_cells, 4);
        assert_eq!(grid.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_loose_ignores_better_landscape_fit() {
        // 100×60 page, 30×50 cells: portrait fits 3×1, landscape fits 2×2
        let loose = compute_grid(100.0, 60.0, 30.0, 50.0, 0.0, SpaceMode::Loose);
        assert_eq!((loose.columns, loose.rows), (3, 1));
        assert_eq!(loose.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_tight_picks_landscape_when_it_fits_more() {
        let tight = compute_grid(100.0, 60.0, 30.0, 50.0, 0.0, SpaceMode::Tight);
        assert_eq!((tight.columns, tight.rows), (2, 2));
        assert_eq!(tight.total_cells, 4);
        assert_eq!(tight.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_tight_tie_favors_portrait() {
        // Square cells fit the same either way
        let grid = compute_grid(200.0, 200.0, 50.0, 50.0, 0.0, SpaceMode::Tight);
        assert_eq!(grid.orientation, Orientation::Portrait);
        assert_eq!(grid.total_cells, 16);
    }

    #[test]
    fn test_tight_never_worse_than_loose() {
        let pages = [(210.0, 297.0), (215.9, 279.4), (101.6, 152.4), (297.0, 420.0)];
        let cells = [(89.0, 127.0), (35.0, 45.0), (64.0, 89.0), (50.0, 50.0), (127.0, 177.8)];
        for &(pw, ph) in &pages {
            for &(cw, ch) in &cells {
                for margin in [0.0, 5.0, 12.5] {
                    let loose = compute_grid(pw, ph, cw, ch, margin, SpaceMode::Loose);
                    let tight = compute_grid(pw, ph, cw, ch, margin, SpaceMode::Tight);
                    assert!(tight.total_cells >= loose.total_cells);
                }
            }
        }
    }

    #[test]
    fn test_margin_consuming_page_gives_empty_grid() {
        let grid = compute_grid(100.0, 100.0, 10.0, 10.0, 50.0, SpaceMode::Loose);
        assert_eq!(grid, GridResult::EMPTY);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_oversized_cell_gives_empty_grid() {
        // Three rows would fit vertically, but no column does
        let grid = compute_grid(100.0, 150.0, 120.0, 40.0, 0.0, SpaceMode::Loose);
        assert_eq!(grid, GridResult::EMPTY);
    }

    #[test]
    fn test_non_positive_cell_gives_empty_grid() {
        assert!(compute_grid(210.0, 297.0, 0.0, 50.0, 5.0, SpaceMode::Tight).is_empty());
        assert!(compute_grid(210.0, 297.0, 50.0, -1.0, 5.0, SpaceMode::Loose).is_empty());
    }

    #[test]
    fn test_inch_sizes_fit_exactly() {
        // Two 4in cells in an 8in usable width
        let grid = compute_grid(203.2, 101.6, 101.6, 101.6, 0.0, SpaceMode::Loose);
        assert_eq!(grid.columns, 2);
        assert_eq!(grid.rows, 1);
    }

    #[test]
    fn test_fit_is_a_strict_floor() {
        // 0.01mm short of two columns
        let grid = compute_grid(199.99, 300.0, 100.0, 100.0, 0.0, SpaceMode::Loose);
        assert_eq!(grid.columns, 1);
        assert_eq!(grid.rows, 3);

        let grid = compute_grid(200.0, 300.0, 100.0, 100.0, 0.0, SpaceMode::Loose);
        assert_eq!(grid.columns, 2);
    }

    #[test]
    fn test_cell_dimensions_swap_for_landscape() {
        assert_eq!(cell_dimensions(89.0, 127.0, Orientation::Portrait), (89.0, 127.0));
        assert_eq!(cell_dimensions(89.0, 127.0, Orientation::Landscape), (127.0, 89.0));
    }
}
