use crate::{CollageUpdate, PresetKind};
use collage_layout::{CollageAction, CollageController, ControllerConfig};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub fn handle_apply(
    action: CollageAction,
    controller: &mut CollageController,
    update_tx: &mpsc::UnboundedSender<CollageUpdate>,
) {
    match controller.apply(action) {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                log::warn!("{}", warning);
            }
            let _ = update_tx.send(CollageUpdate::Applied { outcome });
        }
        Err(e) => {
            let _ = update_tx.send(CollageUpdate::Error {
                message: format!("Action failed: {e}"),
            });
        }
    }
}

pub async fn handle_load_config(
    path: PathBuf,
    controller: &mut CollageController,
    update_tx: &mpsc::UnboundedSender<CollageUpdate>,
) {
    let result = match ControllerConfig::load(&path).await {
        Ok(config) => controller.apply_config(&config).map(|()| config),
        Err(e) => Err(e),
    };

    match result {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            let _ = update_tx.send(CollageUpdate::ConfigLoaded { config });
        }
        Err(e) => {
            let _ = update_tx.send(CollageUpdate::Error {
                message: format!("Failed to load config: {e}"),
            });
        }
    }
}

pub async fn handle_import_presets(
    kind: PresetKind,
    path: PathBuf,
    controller: &mut CollageController,
    update_tx: &mpsc::UnboundedSender<CollageUpdate>,
) {
    let result = match kind {
        PresetKind::Page => controller.pages_mut().import_file(&path).await,
        PresetKind::Layout => controller.layouts_mut().import_file(&path).await,
    };

    match result {
        Ok(report) => {
            let _ = update_tx.send(CollageUpdate::PresetsImported { kind, report });
        }
        Err(e) => {
            let _ = update_tx.send(CollageUpdate::Error {
                message: format!("Failed to import presets: {e}"),
            });
        }
    }
}

pub async fn handle_export_presets(
    kind: PresetKind,
    path: PathBuf,
    controller: &CollageController,
    update_tx: &mpsc::UnboundedSender<CollageUpdate>,
) {
    let (result, count) = match kind {
        PresetKind::Page => {
            let pages = controller.pages();
            (pages.export_file(&path).await, pages.custom().count())
        }
        PresetKind::Layout => {
            let layouts = controller.layouts();
            (layouts.export_file(&path).await, layouts.custom().count())
        }
    };

    match result {
        Ok(()) => {
            let _ = update_tx.send(CollageUpdate::PresetsExported { kind, path, count });
        }
        Err(e) => {
            let _ = update_tx.send(CollageUpdate::Error {
                message: format!("Failed to export presets: {e}"),
            });
        }
    }
}

pub fn handle_calculate_stats(
    controller: &CollageController,
    update_tx: &mpsc::UnboundedSender<CollageUpdate>,
) {
    let stats = controller.statistics();
    let _ = update_tx.send(CollageUpdate::StatsCalculated { stats });
}
