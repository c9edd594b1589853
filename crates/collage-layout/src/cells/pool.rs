use crate::types::{CollageState, ImageId};

/// Remove an image and clear every cell that referenced it.
///
/// Both happen on the same owned state before it is handed back, so no
/// version of the state ever holds a dangling reference. Removing an id that
/// is not in the pool returns the state unchanged.
pub fn remove_image(mut state: CollageState, image_id: ImageId) -> CollageState {
    state.images.retain(|image| image.id != image_id);

    let mut cleared = 0;
    for cell in state.cells.iter_mut().flatten() {
        if cell.image_id == Some(image_id) {
            cell.clear();
            cleared += 1;
        }
    }

    log::debug!("Removed image {} ({} cells cleared)", image_id, cleared);
    state
}

/// Set the repeat count of an image. The grid is left alone until the next
/// `rearrange`.
pub fn update_count(mut state: CollageState, image_id: ImageId, count: usize) -> CollageState {
    if let Some(image) = state.images.iter_mut().find(|image| image.id == image_id) {
        image.count = count;
    }
    state
}

/// Share the grid's cells equally between the active images.
///
/// Active images are those with a non-zero count; with `N` of them and `T`
/// cells, each gets `T / N` and the first `T % N` in pool order get one more.
/// Images at zero stay at zero. Only counts change.
pub fn distribute_equally(mut state: CollageState) -> CollageState {
    let total = state.total_cells();
    let active = state.images.iter().filter(|image| image.count != 0).count();
    if active == 0 {
        return state;
    }

    let base = total / active;
    let remainder = total % active;

    for (index, image) in state
        .images
        .iter_mut()
        .filter(|image| image.count != 0)
        .enumerate()
    {
        image.count = base + usize::from(index < remainder);
    }

    state
}

/// Empty every cell and zero every count, keeping the images themselves
pub fn reset_canvas(mut state: CollageState) -> CollageState {
    for cell in state.cells.iter_mut().flatten() {
        cell.clear();
    }
    for image in &mut state.images {
        image.count = 0;
    }
    state
}

/// Empty every cell and drop every image
pub fn clear_all(mut state: CollageState) -> CollageState {
    for cell in state.cells.iter_mut().flatten() {
        cell.clear();
    }
    state.images.clear();
    state
}
