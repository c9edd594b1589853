use crate::types::{
    CapacityReport, CollageImage, CollageState, ImageId, ImageOrientation, SpaceMode,
};

/// One image instance waiting for a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementEntry {
    pub image_id: ImageId,
    pub orientation: ImageOrientation,
}

/// Flatten the pool into the ordered list of instances to place.
///
/// Images are visited in pool order and each contributes
/// `min(count, total_cells)` entries. In tight mode an `Auto` image alternates
/// portrait (even entries) and landscape (odd entries); an explicit
/// orientation is always kept.
pub fn placement_pool(
    images: &[CollageImage],
    total_cells: usize,
    mode: SpaceMode,
) -> Vec<PlacementEntry> {
    let mut pool = Vec::new();

    for image in images {
        for index in 0..image.count.min(total_cells) {
            let orientation = match (mode, image.orientation) {
                (SpaceMode::Tight, ImageOrientation::Auto) if index % 2 == 0 => {
                    ImageOrientation::Portrait
                }
                (SpaceMode::Tight, ImageOrientation::Auto) => ImageOrientation::Landscape,
                (_, explicit) => explicit,
            };
            pool.push(PlacementEntry {
                image_id: image.id,
                orientation,
            });
        }
    }

    pool
}

/// Rewrite the whole grid from the repeat counts.
///
/// The placement pool is written in strict row-major order; cells past the
/// end of the pool are cleared, and pool entries past the last cell are
/// dropped. Deterministic: the same images and counts always give the same
/// grid.
pub fn rearrange(mut state: CollageState) -> CollageState {
    let total = state.total_cells();
    let mut entries = placement_pool(&state.images, total, state.mode).into_iter();

    for cell in state.cells.iter_mut().flatten() {
        match entries.next() {
            Some(entry) => {
                cell.image_id = Some(entry.image_id);
                cell.orientation = entry.orientation;
            }
            None => cell.clear(),
        }
    }

    let dropped = entries.count();
    if dropped > 0 {
        log::warn!(
            "Rearrange dropped {} image instances that do not fit in {} cells",
            dropped,
            total
        );
    }

    state
}

/// Compare the requested instances with what the grid can hold
pub fn capacity_report(state: &CollageState) -> CapacityReport {
    let requested: usize = state.images.iter().map(|image| image.count).sum();
    let capacity = state.total_cells();
    CapacityReport {
        requested,
        capacity,
        placed: requested.min(capacity),
    }
}
