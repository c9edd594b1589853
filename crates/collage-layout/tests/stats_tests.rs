use collage_layout::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_statistics_after_rearrange() {
    let mut controller = CollageController::new(ControllerConfig::default());
    controller.add_image(NewImage::new("a.jpg", "a").with_count(2));
    let b = controller.add_image(NewImage::new("b.jpg", "b"));
    controller.update_count(b, 5);
    controller.rearrange();

    let stats = calculate_statistics(controller.state());
    assert_eq!(stats.rows, 2);
    assert_eq!(stats.columns, 2);
    assert_eq!(stats.total_cells, 4);
    assert_eq!(stats.filled_cells, 4);
    assert_eq!(stats.empty_cells, 0);
    assert_eq!(stats.images_placed, 2);
    assert_eq!(stats.requested_instances, 7);
    assert_eq!(stats.overflow, 3);
}

#[test]
fn test_statistics_empty_collage() {
    let controller = CollageController::new(ControllerConfig::default());
    let stats = controller.statistics();

    assert_eq!(stats.filled_cells, 0);
    assert_eq!(stats.empty_cells, 4);
    assert_eq!(stats.images_placed, 0);
    assert_eq!(stats.overflow, 0);
    // Four 89×127 cells on a 210×297 page
    assert!(approx(stats.coverage_percent, 4.0 * 89.0 * 127.0 / (210.0 * 297.0) * 100.0));
}

#[test]
fn test_cell_rect_centres_grid() {
    let controller = CollageController::new(ControllerConfig::default());
    let state = controller.state();

    // Grid is 178×254 inside a 200×287 usable area
    let rect = cell_rect(state, GridPosition::new(0, 0)).unwrap();
    assert!(approx(rect.x, 16.0));
    assert!(approx(rect.y, 21.5));
    assert!(approx(rect.width, 89.0));
    assert!(approx(rect.height, 127.0));

    let rect = cell_rect(state, GridPosition::new(1, 1)).unwrap();
    assert!(approx(rect.x, 105.0));
    assert!(approx(rect.bottom(), 275.5));

    assert!(cell_rect(state, GridPosition::new(2, 0)).is_none());
}

#[test]
fn test_cut_lines_cover_every_boundary() {
    let controller = CollageController::new(ControllerConfig::default());
    let lines = cut_lines(controller.state());

    let vertical: Vec<f32> = lines
        .iter()
        .filter(|l| l.axis == Axis::Vertical)
        .map(|l| l.position_mm)
        .collect();
    let horizontal: Vec<f32> = lines
        .iter()
        .filter(|l| l.axis == Axis::Horizontal)
        .map(|l| l.position_mm)
        .collect();

    assert_eq!(vertical.len(), 3);
    assert_eq!(horizontal.len(), 3);
    assert!(approx(vertical[0], 16.0));
    assert!(approx(vertical[2], 194.0));
    assert!(approx(horizontal[1], 148.5));
    assert!(lines.iter().all(|l| l.start_mm == 0.0));
}

#[test]
fn test_cut_lines_empty_for_degenerate_grid() {
    let mut controller = CollageController::new(ControllerConfig::default());
    controller.set_layout(LayoutPreset::new("huge", "Huge", 500.0, 500.0));
    assert!(cut_lines(controller.state()).is_empty());
}
