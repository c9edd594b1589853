use crate::cells::capacity_report;
use crate::types::*;
use std::collections::HashSet;

/// Calculate statistics for the collage
pub fn calculate_statistics(state: &CollageState) -> CollageStatistics {
    let total_cells = state.total_cells();
    let filled_cells = state.filled_cells();

    let images_placed = state
        .iter_cells()
        .filter_map(|cell| cell.image_id)
        .collect::<HashSet<_>>()
        .len();

    let capacity = capacity_report(state);

    CollageStatistics {
        rows: state.rows,
        columns: state.columns,
        total_cells,
        filled_cells,
        empty_cells: total_cells - filled_cells,
        images_placed,
        requested_instances: capacity.requested,
        overflow: capacity.overflow(),
        coverage_percent: coverage_percent(state),
    }
}

/// Share of the page area taken up by the grid
fn coverage_percent(state: &CollageState) -> f32 {
    let (page_width, page_height) = state.page_dimensions_mm();
    let page_area = page_width * page_height;
    if page_area <= 0.0 {
        return 0.0;
    }

    let (cell_width, cell_height) = state.cell_dimensions_mm();
    let grid_area = state.total_cells() as f32 * cell_width * cell_height;
    grid_area / page_area * 100.0
}
