pub mod cells;
mod constants;
mod controller;
pub mod layout;
mod options;
pub mod presets;
mod stats;
mod types;
pub mod units;

pub use cells::{
    assign_cell, capacity_report, clear_all, distribute_equally, rearrange, rebuild_cells,
    remove_image, reset_canvas, update_count,
};
pub use constants::*;
pub use controller::{ActionOutcome, CollageAction, CollageController};
pub use layout::{
    Axis, CutLine, GridPosition, GridResult, Rect, cell_rect, compute_grid, cut_lines,
};
pub use options::*;
pub use presets::{Preset, PresetEntry, PresetRegistry, builtin_layouts, builtin_page_sizes};
#[cfg(feature = "serde")]
pub use presets::{ImportReport, PresetRecord, parse_record};
pub use stats::calculate_statistics;
pub use types::*;
pub use units::{Dimension, Unit, format_dimension, from_mm, parse_dimension, to_mm};
