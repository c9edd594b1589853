use collage_layout::{ImageId, NewImage, PresetError, SpaceMode, Unit};
use collage_runtime::*;

async fn expect_update(handle: &mut EngineHandle) -> CollageUpdate {
    handle.next_update().await.expect("engine stopped early")
}

#[tokio::test]
async fn test_initial_snapshot_is_published() {
    let handle = spawn_engine(ControllerConfig::default());
    let state = handle.snapshot();
    assert_eq!((state.rows, state.columns), (2, 2));
    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_apply_publishes_new_snapshot() {
    let mut handle = spawn_engine(ControllerConfig::default());
    let mut states = handle.subscribe();
    let before = handle.snapshot();

    handle
        .apply(CollageAction::AddImage {
            image: NewImage::new("a.jpg", "a"),
        })
        .unwrap();

    let id = match expect_update(&mut handle).await {
        CollageUpdate::Applied { outcome } => outcome.added_image.unwrap(),
        other => panic!("Expected Applied, got {:?}", other),
    };

    states.changed().await.unwrap();
    let after = states.borrow_and_update().clone();
    assert!(after.iter_cells().all(|cell| cell.image_id == Some(id)));
    // Earlier snapshot is untouched
    assert!(before.images.is_empty());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_action_reports_error() {
    let mut handle = spawn_engine(ControllerConfig::default());
    let before = handle.snapshot();

    handle
        .apply(CollageAction::SelectLayout {
            id: "missing".to_string(),
        })
        .unwrap();

    match expect_update(&mut handle).await {
        CollageUpdate::Error { message } => {
            assert!(message.contains(&PresetError::NotFound("missing".to_string()).to_string()));
        }
        other => panic!("Expected Error, got {:?}", other),
    }
    assert_eq!(*handle.snapshot(), *before);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_queued_rearranges_are_coalesced() {
    let mut handle = spawn_engine(ControllerConfig::default());

    // Queued before the engine task gets to run
    handle.apply(CollageAction::Rearrange).unwrap();
    handle.apply(CollageAction::Rearrange).unwrap();
    handle.apply(CollageAction::Rearrange).unwrap();
    handle.send(CollageCommand::CalculateStats).unwrap();

    match expect_update(&mut handle).await {
        CollageUpdate::Applied { outcome } => assert!(outcome.capacity.is_some()),
        other => panic!("Expected Applied, got {:?}", other),
    }
    match expect_update(&mut handle).await {
        CollageUpdate::StatsCalculated { stats } => assert_eq!(stats.total_cells, 4),
        other => panic!("Expected StatsCalculated, got {:?}", other),
    }
    assert!(handle.try_recv_update().is_none());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_commands_after_rearrange_keep_their_order() {
    let mut handle = spawn_engine(ControllerConfig::default());

    handle
        .apply(CollageAction::AddImage {
            image: NewImage::new("a.jpg", "a"),
        })
        .unwrap();
    handle
        .apply(CollageAction::AddImage {
            image: NewImage::new("b.jpg", "b"),
        })
        .unwrap();
    handle.apply(CollageAction::Rearrange).unwrap();
    handle
        .apply(CollageAction::AssignCell {
            row: 1,
            col: 1,
            image_id: Some(ImageId(1)),
        })
        .unwrap();

    for _ in 0..4 {
        assert!(matches!(
            expect_update(&mut handle).await,
            CollageUpdate::Applied { .. }
        ));
    }

    let state = handle.snapshot();
    assert_eq!(state.filled_cells(), 3);
    assert_eq!(state.cells[1][1].image_id, Some(ImageId(1)));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_warnings_travel_with_outcome() {
    let mut handle = spawn_engine(ControllerConfig::default());
    handle
        .apply(CollageAction::AddImage {
            image: NewImage::new("a.jpg", "a").with_count(9),
        })
        .unwrap();

    match expect_update(&mut handle).await {
        CollageUpdate::Applied { outcome } => {
            assert_eq!(
                outcome.warnings,
                vec![CollageWarning::OverCapacity {
                    requested: 9,
                    capacity: 4
                }]
            );
        }
        other => panic!("Expected Applied, got {:?}", other),
    }

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_load_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collage.json");
    let config = ControllerConfig {
        unit: Unit::Inches,
        mode: SpaceMode::Tight,
        page_id: "letter".to_string(),
        ..Default::default()
    };
    config.save(&path).await.unwrap();

    let mut handle = spawn_engine(ControllerConfig::default());
    handle.send(CollageCommand::LoadConfig { path }).unwrap();

    match expect_update(&mut handle).await {
        CollageUpdate::ConfigLoaded { config: loaded } => assert_eq!(loaded, config),
        other => panic!("Expected ConfigLoaded, got {:?}", other),
    }
    let state = handle.snapshot();
    assert_eq!(state.page.id, "letter");
    assert_eq!(state.mode, SpaceMode::Tight);
    assert_eq!(state.unit, Unit::Inches);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_preset_import_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    tokio::fs::write(
        &input,
        r#"[
            { "id": "mini", "label": "Mini", "cellWidth": 40, "cellHeight": 60 },
            { "id": "broken", "label": "Broken", "cellWidth": -1, "cellHeight": 60 }
        ]"#,
    )
    .await
    .unwrap();

    let mut handle = spawn_engine(ControllerConfig::default());
    handle
        .send(CollageCommand::ImportPresets {
            kind: PresetKind::Layout,
            path: input,
        })
        .unwrap();
    handle
        .send(CollageCommand::ExportPresets {
            kind: PresetKind::Layout,
            path: output.clone(),
        })
        .unwrap();
    handle
        .apply(CollageAction::SelectLayout {
            id: "mini".to_string(),
        })
        .unwrap();

    match expect_update(&mut handle).await {
        CollageUpdate::PresetsImported { kind, report } => {
            assert_eq!(kind, PresetKind::Layout);
            assert_eq!(report.accepted, 1);
            assert_eq!(report.rejected, 1);
        }
        other => panic!("Expected PresetsImported, got {:?}", other),
    }
    match expect_update(&mut handle).await {
        CollageUpdate::PresetsExported { count, path, .. } => {
            assert_eq!(count, 1);
            assert_eq!(path, output);
        }
        other => panic!("Expected PresetsExported, got {:?}", other),
    }
    assert!(matches!(
        expect_update(&mut handle).await,
        CollageUpdate::Applied { .. }
    ));
    assert_eq!(handle.snapshot().layout.id, "mini");

    let written = tokio::fs::read_to_string(&output).await.unwrap();
    assert!(written.contains("\"mini\""));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_preset_file_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut handle = spawn_engine(ControllerConfig::default());
    handle
        .send(CollageCommand::ImportPresets {
            kind: PresetKind::Page,
            path: dir.path().join("missing.json"),
        })
        .unwrap();

    assert!(matches!(
        expect_update(&mut handle).await,
        CollageUpdate::Error { .. }
    ));

    handle.shutdown().await.unwrap();
}
