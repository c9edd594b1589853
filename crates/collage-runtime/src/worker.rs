use crate::{CollageCommand, CollageUpdate, Result, RuntimeError, handlers};
use collage_layout::{CollageAction, CollageController, CollageError, CollageState, ControllerConfig};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// View-side handle to a running engine task
pub struct EngineHandle {
    command_tx: mpsc::UnboundedSender<CollageCommand>,
    update_rx: mpsc::UnboundedReceiver<CollageUpdate>,
    state_rx: watch::Receiver<Arc<CollageState>>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    pub fn send(&self, cmd: CollageCommand) -> Result<()> {
        self.command_tx.send(cmd).map_err(|_| RuntimeError::Closed)
    }

    pub fn apply(&self, action: CollageAction) -> Result<()> {
        self.send(CollageCommand::Apply { action })
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<CollageState> {
        Arc::clone(&self.state_rx.borrow())
    }

    /// Independent receiver for snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<Arc<CollageState>> {
        self.state_rx.clone()
    }

    /// Next pending update without waiting
    pub fn try_recv_update(&mut self) -> Option<CollageUpdate> {
        self.update_rx.try_recv().ok()
    }

    /// Wait for the next update. `None` once the engine has stopped and
    /// every update has been read.
    pub async fn next_update(&mut self) -> Option<CollageUpdate> {
        self.update_rx.recv().await
    }

    /// Close the command channel and wait for queued commands to finish
    pub async fn shutdown(self) -> Result<()> {
        let Self {
            command_tx, task, ..
        } = self;
        drop(command_tx);
        task.await.map_err(CollageError::from)?;
        Ok(())
    }
}

/// Start an engine over the built-in presets.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_engine(config: ControllerConfig) -> EngineHandle {
    spawn_engine_with(CollageController::new(config))
}

/// Start an engine around an existing controller
pub fn spawn_engine_with(controller: CollageController) -> EngineHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(controller.snapshot());

    let task = tokio::spawn(engine_task(controller, command_rx, update_tx, state_tx));

    EngineHandle {
        command_tx,
        update_rx,
        state_rx,
        task,
    }
}

/// Async task that owns the controller, processes commands in order and
/// publishes a snapshot after each one that changed the state
pub async fn engine_task(
    mut controller: CollageController,
    mut command_rx: mpsc::UnboundedReceiver<CollageCommand>,
    update_tx: mpsc::UnboundedSender<CollageUpdate>,
    state_tx: watch::Sender<Arc<CollageState>>,
) {
    let mut pending: Option<CollageCommand> = None;

    loop {
        let cmd = match pending.take() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        if is_rearrange(&cmd) {
            // A burst of rearranges collapses into one; anything else queued
            // behind them still runs afterwards, in order
            while let Ok(next_cmd) = command_rx.try_recv() {
                if is_rearrange(&next_cmd) {
                    log::debug!("Discarding queued rearrange");
                    continue;
                }
                pending = Some(next_cmd);
                break;
            }
        }

        process_command(cmd, &mut controller, &update_tx).await;

        let snapshot = controller.snapshot();
        let changed = !Arc::ptr_eq(&state_tx.borrow(), &snapshot);
        if changed {
            state_tx.send_replace(snapshot);
        }
    }

    log::debug!("Collage engine stopped");
}

async fn process_command(
    cmd: CollageCommand,
    controller: &mut CollageController,
    update_tx: &mpsc::UnboundedSender<CollageUpdate>,
) {
    match cmd {
        CollageCommand::Apply { action } => {
            handlers::handle_apply(action, controller, update_tx);
        }
        CollageCommand::LoadConfig { path } => {
            handlers::handle_load_config(path, controller, update_tx).await;
        }
        CollageCommand::ImportPresets { kind, path } => {
            handlers::handle_import_presets(kind, path, controller, update_tx).await;
        }
        CollageCommand::ExportPresets { kind, path } => {
            handlers::handle_export_presets(kind, path, controller, update_tx).await;
        }
        CollageCommand::CalculateStats => {
            handlers::handle_calculate_stats(controller, update_tx);
        }
    }
}

fn is_rearrange(cmd: &CollageCommand) -> bool {
    matches!(
        cmd,
        CollageCommand::Apply {
            action: CollageAction::Rearrange
        }
    )
}
