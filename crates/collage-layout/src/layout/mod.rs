//! Layout calculation modules
//!
//! This module handles all the geometric calculations for a collage page:
//! - Grid dimensions (how many cells fit, and in which orientation)
//! - Geometry (where each cell and cutting guide sits on the page)

mod geometry;
mod grid;
mod types;

pub use geometry::*;
pub use grid::*;
pub use types::*;
