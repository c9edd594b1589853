use collage_layout::*;

fn a4_state() -> CollageState {
    CollageState::new(
        PageSize::from_paper(PaperSize::A4),
        LayoutPreset::new("grid-2x2", "2×2", 89.0, 127.0),
        SpaceMode::Loose,
    )
}

/// 5 columns × 2 rows of 40mm squares on a 210×90 page
fn ten_cell_state() -> CollageState {
    CollageState::new(
        PageSize::new("strip", "Strip", 210.0, 90.0, 5.0),
        LayoutPreset::new("sq", "Square", 40.0, 40.0),
        SpaceMode::Loose,
    )
}

fn with_images(mut state: CollageState, counts: &[usize]) -> CollageState {
    for (index, &count) in counts.iter().enumerate() {
        let id = ImageId(index as u64 + 1);
        let mut image = CollageImage::new(id, format!("{}.jpg", id), format!("Photo {}", id));
        image.count = count;
        state.images.push(image);
    }
    state
}

fn cell_ids(state: &CollageState) -> Vec<Option<u64>> {
    state
        .iter_cells()
        .map(|cell| cell.image_id.map(|id| id.0))
        .collect()
}

#[test]
fn test_new_state_is_consistent() {
    let state = a4_state();
    assert_eq!(state.rows, 2);
    assert_eq!(state.columns, 2);
    assert_eq!(state.total_cells(), 4);
    assert!(state.is_consistent());
    assert!(state.iter_cells().all(CollageCell::is_empty));
}

#[test]
fn test_distribute_equally_preserves_total() {
    let state = with_images(ten_cell_state(), &[1, 1, 1]);
    assert_eq!(state.total_cells(), 10);

    let state = distribute_equally(state);
    let counts: Vec<usize> = state.images.iter().map(|i| i.count).collect();
    assert_eq!(counts, vec![4, 3, 3]);
    assert_eq!(counts.iter().sum::<usize>(), 10);
}

#[test]
fn test_distribute_skips_zero_counts() {
    let state = with_images(ten_cell_state(), &[2, 0, 7, 1]);
    let state = distribute_equally(state);

    let counts: Vec<usize> = state.images.iter().map(|i| i.count).collect();
    assert_eq!(counts, vec![4, 0, 3, 3]);
}

#[test]
fn test_distribute_with_no_active_images_is_noop() {
    let state = with_images(ten_cell_state(), &[0, 0]);
    let before = state.clone();
    assert_eq!(distribute_equally(state), before);
}

#[test]
fn test_distribute_does_not_touch_grid() {
    let state = rearrange(with_images(a4_state(), &[1, 1]));
    let before = state.cells.clone();
    let state = distribute_equally(state);
    assert_eq!(state.cells, before);
}

#[test]
fn test_rearrange_row_major() {
    let state = rearrange(with_images(ten_cell_state(), &[3, 2, 1]));
    assert_eq!(
        cell_ids(&state),
        vec![
            Some(1),
            Some(1),
            Some(1),
            Some(2),
            Some(2),
            Some(3),
            None,
            None,
            None,
            None
        ]
    );
    // Row 1 starts after five cells of row 0
    assert_eq!(state.cells[1][0].image_id, Some(ImageId(3)));
    assert!(state.cells[1][1].is_empty());
}

#[test]
fn test_rearrange_caps_at_capacity() {
    let state = rearrange(with_images(a4_state(), &[10]));
    assert_eq!(cell_ids(&state), vec![Some(1); 4]);

    let report = capacity_report(&state);
    assert_eq!(report.requested, 10);
    assert_eq!(report.capacity, 4);
    assert_eq!(report.placed, 4);
    assert_eq!(report.overflow(), 6);
    assert!(report.is_over_capacity());
}

#[test]
fn test_rearrange_drops_later_images_when_full() {
    let state = rearrange(with_images(a4_state(), &[3, 3]));
    assert_eq!(cell_ids(&state), vec![Some(1), Some(1), Some(1), Some(2)]);
}

#[test]
fn test_rearrange_is_deterministic() {
    let state = with_images(ten_cell_state(), &[2, 5, 1]);
    let first = rearrange(state.clone());
    let second = rearrange(first.clone());
    assert_eq!(first.cells, second.cells);
    assert_eq!(rearrange(state).cells, first.cells);
}

#[test]
fn test_rearrange_clears_stale_assignments() {
    let state = rearrange(with_images(a4_state(), &[4]));
    let state = update_count(state, ImageId(1), 1);
    let state = rearrange(state);
    assert_eq!(cell_ids(&state), vec![Some(1), None, None, None]);
    assert_eq!(state.cells[0][1].orientation, ImageOrientation::Auto);
}

#[test]
fn test_tight_mode_alternates_auto_orientation() {
    let mut state = with_images(ten_cell_state(), &[3, 2]);
    state.mode = SpaceMode::Tight;
    state.images[1].orientation = ImageOrientation::Landscape;

    let state = rearrange(state);
    let orientations: Vec<ImageOrientation> = state
        .iter_cells()
        .take(5)
        .map(|cell| cell.orientation)
        .collect();
    assert_eq!(
        orientations,
        vec![
            ImageOrientation::Portrait,
            ImageOrientation::Landscape,
            ImageOrientation::Portrait,
            ImageOrientation::Landscape,
            ImageOrientation::Landscape,
        ]
    );
}

#[test]
fn test_loose_mode_keeps_image_orientation() {
    let mut state = with_images(a4_state(), &[2, 2]);
    state.images[1].orientation = ImageOrientation::Portrait;

    let state = rearrange(state);
    let orientations: Vec<ImageOrientation> =
        state.iter_cells().map(|cell| cell.orientation).collect();
    assert_eq!(
        orientations,
        vec![
            ImageOrientation::Auto,
            ImageOrientation::Auto,
            ImageOrientation::Portrait,
            ImageOrientation::Portrait,
        ]
    );
}

#[test]
fn test_remove_image_clears_cells_and_is_idempotent() {
    let state = rearrange(with_images(a4_state(), &[2, 2]));

    let once = remove_image(state, ImageId(1));
    assert!(once.image(ImageId(1)).is_none());
    assert!(once.iter_cells().all(|c| c.image_id != Some(ImageId(1))));
    assert_eq!(cell_ids(&once), vec![None, None, Some(2), Some(2)]);
    assert!(once.is_consistent());

    let twice = remove_image(once.clone(), ImageId(1));
    assert_eq!(twice, once);
}

#[test]
fn test_update_count_leaves_grid() {
    let state = rearrange(with_images(a4_state(), &[1, 1]));
    let before = state.cells.clone();

    let state = update_count(state, ImageId(2), 3);
    assert_eq!(state.image(ImageId(2)).unwrap().count, 3);
    assert_eq!(state.cells, before);

    // Unknown ids are ignored
    let unchanged = update_count(state.clone(), ImageId(42), 9);
    assert_eq!(unchanged, state);
}

#[test]
fn test_reset_canvas_keeps_images() {
    let state = reset_canvas(rearrange(with_images(a4_state(), &[2, 2])));

    assert_eq!(state.images.len(), 2);
    assert!(state.images.iter().all(|i| i.count == 0));
    assert!(state.iter_cells().all(CollageCell::is_empty));
    assert_eq!((state.rows, state.columns), (2, 2));
}

#[test]
fn test_clear_all_empties_pool() {
    let state = clear_all(rearrange(with_images(a4_state(), &[2, 2])));

    assert!(state.images.is_empty());
    assert!(state.iter_cells().all(CollageCell::is_empty));
    assert!(state.is_consistent());
}

#[test]
fn test_rebuild_cells_single_image_rule() {
    let images = vec![CollageImage::new(ImageId(1), "a.jpg", "a")];
    let cells = rebuild_cells(3, 2, &images);
    assert_eq!(cells.len(), 3);
    assert!(cells.iter().all(|row| row.len() == 2));
    assert!(cells.iter().flatten().all(|c| c.image_id == Some(ImageId(1))));
}

#[test]
fn test_assign_cell_out_of_bounds() {
    let state = with_images(a4_state(), &[1, 1]);
    let cells = assign_cell(state.cells.clone(), 9, 9, Some(ImageId(1)), &state.images);
    assert_eq!(cells, state.cells);
}
