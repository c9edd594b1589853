//! Cell assignment - keeping the grid in step with the image pool
//!
//! Every operation takes the grid or state by value and hands back the new
//! version; nothing here holds on to a state between calls.
//!
//! 1. Build fresh grids (`rebuild`)
//! 2. Edit the image pool and its repeat counts (`pool`)
//! 3. Pack the pool into the grid (`arrange`)

mod arrange;
mod pool;
mod rebuild;

pub use arrange::{PlacementEntry, capacity_report, placement_pool, rearrange};
pub use pool::{clear_all, distribute_equally, remove_image, reset_canvas, update_count};
pub use rebuild::{assign_cell, fill_all, rebuild_cells, single_image};
