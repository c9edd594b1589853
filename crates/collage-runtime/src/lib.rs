//! Message types and the engine task that sits between a view layer and the
//! collage controller.
//!
//! The view sends [`CollageCommand`]s and reads back [`CollageUpdate`]s plus a
//! stream of immutable state snapshots. All mutation happens on the engine
//! task, one command at a time.

mod handlers;
mod worker;

use std::path::PathBuf;
use thiserror::Error;

// Re-export types from the engine crate
pub use collage_layout::{
    ActionOutcome, CollageAction, CollageController, CollageError, CollageState,
    CollageStatistics, CollageWarning, ControllerConfig, ImportReport,
};
pub use worker::{EngineHandle, engine_task, spawn_engine, spawn_engine_with};

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Collage engine has shut down")]
    Closed,

    #[error(transparent)]
    Engine(#[from] CollageError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Which preset registry a command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Page,
    Layout,
}

/// Commands sent from the view to the engine
#[derive(Debug, Clone)]
pub enum CollageCommand {
    /// Run a user action through the controller
    Apply {
        action: CollageAction,
    },
    /// Load a config file and apply it to the current collage
    LoadConfig {
        path: PathBuf,
    },
    ImportPresets {
        kind: PresetKind,
        path: PathBuf,
    },
    ExportPresets {
        kind: PresetKind,
        path: PathBuf,
    },
    CalculateStats,
}

/// Updates sent from the engine to the view
#[derive(Debug, Clone)]
pub enum CollageUpdate {
    Applied {
        outcome: ActionOutcome,
    },
    ConfigLoaded {
        config: ControllerConfig,
    },
    PresetsImported {
        kind: PresetKind,
        report: ImportReport,
    },
    PresetsExported {
        kind: PresetKind,
        path: PathBuf,
        count: usize,
    },
    StatsCalculated {
        stats: CollageStatistics,
    },
    Error {
        message: String,
    },
}
