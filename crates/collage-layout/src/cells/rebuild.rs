use crate::layout::GridPosition;
use crate::types::{CellGrid, CollageCell, CollageImage, ImageId};

/// The image to spread across the whole grid: the only one in the pool.
///
/// A single uploaded image previews in every cell without manual assignment.
/// Both grid rebuilds and the image-added handler go through this check.
pub fn single_image(images: &[CollageImage]) -> Option<&CollageImage> {
    match images {
        [only] => Some(only),
        _ => None,
    }
}

/// Allocate a fresh `rows × columns` grid.
///
/// Cells start empty with `Auto` orientation, unless the pool holds exactly
/// one image, in which case every cell references it.
pub fn rebuild_cells(rows: usize, columns: usize, images: &[CollageImage]) -> CellGrid {
    let cells: CellGrid = (0..rows)
        .map(|row| {
            (0..columns)
                .map(|col| CollageCell::empty(GridPosition::new(row, col)))
                .collect()
        })
        .collect();

    match single_image(images) {
        Some(image) => fill_all(cells, image),
        None => cells,
    }
}

/// Point every cell at `image`
pub fn fill_all(mut cells: CellGrid, image: &CollageImage) -> CellGrid {
    for cell in cells.iter_mut().flatten() {
        cell.assign(image);
    }
    cells
}

/// Set or clear the image of a single cell.
///
/// Out-of-bounds positions are ignored: a view can race a grid resize and
/// still hold stale coordinates. An id missing from `images` is ignored too,
/// so a cell never references an image outside the pool.
pub fn assign_cell(
    mut cells: CellGrid,
    row: usize,
    col: usize,
    image_id: Option<ImageId>,
    images: &[CollageImage],
) -> CellGrid {
    let Some(cell) = cells.get_mut(row).and_then(|r| r.get_mut(col)) else {
        log::debug!("Ignoring assignment to out-of-bounds cell ({}, {})", row, col);
        return cells;
    };

    match image_id {
        Some(id) => match images.iter().find(|image| image.id == id) {
            Some(image) => cell.assign(image),
            None => log::warn!("Ignoring assignment of unknown image {}", id),
        },
        None => cell.clear(),
    }

    cells
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageOrientation;

    fn image(id: u64) -> CollageImage {
        CollageImage::new(ImageId(id), format!("file-{}.jpg", id), format!("Photo {}", id))
    }

    #[test]
    fn test_rebuild_shape_and_positions() {
        let cells = rebuild_cells(3, 4, &[]);

        assert_eq!(cells.len(), 3);
        for (row, cells_in_row) in cells.iter().enumerate() {
            assert_eq!(cells_in_row.len(), 4);
            for (col, cell) in cells_in_row.iter().enumerate() {
                assert_eq!(cell.position, GridPosition::new(row, col));
                assert!(cell.is_empty());
                assert_eq!(cell.orientation, ImageOrientation::Auto);
            }
        }
    }

    #[test]
    fn test_rebuild_with_single_image_fills_every_cell() {
        let cells = rebuild_cells(2, 3, &[image(7)]);
        assert!(cells.iter().flatten().all(|c| c.image_id == Some(ImageId(7))));
    }

    #[test]
    fn test_rebuild_with_two_images_stays_empty() {
        let cells = rebuild_cells(2, 2, &[image(1), image(2)]);
        assert!(cells.iter().flatten().all(CollageCell::is_empty));
    }

    #[test]
    fn test_assign_adopts_image_orientation() {
        let mut landscape = image(1);
        landscape.orientation = ImageOrientation::Landscape;
        let images = vec![landscape, image(2)];

        let cells = assign_cell(rebuild_cells(2, 2, &images), 1, 0, Some(ImageId(1)), &images);

        assert_eq!(cells[1][0].image_id, Some(ImageId(1)));
        assert_eq!(cells[1][0].orientation, ImageOrientation::Landscape);
        assert_eq!(cells.iter().flatten().filter(|c| !c.is_empty()).count(), 1);
    }

    #[test]
    fn test_assign_out_of_bounds_is_noop() {
        let images = vec![image(1), image(2)];
        let before = rebuild_cells(2, 2, &images);

        let after = assign_cell(before.clone(), 2, 0, Some(ImageId(1)), &images);
        assert_eq!(after, before);

        let after = assign_cell(before.clone(), 0, 5, Some(ImageId(1)), &images);
        assert_eq!(after, before);
    }

    #[test]
    fn test_assign_unknown_image_is_noop() {
        let images = vec![image(1), image(2)];
        let before = rebuild_cells(2, 2, &images);
        let after = assign_cell(before.clone(), 0, 0, Some(ImageId(99)), &images);
        assert_eq!(after, before);
    }

    #[test]
    fn test_assign_none_clears_cell() {
        let images = vec![image(1)];
        let cells = assign_cell(rebuild_cells(1, 2, &images), 0, 1, None, &images);
        assert_eq!(cells[0][0].image_id, Some(ImageId(1)));
        assert!(cells[0][1].is_empty());
    }
}
