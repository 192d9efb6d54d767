use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::{ConfigWatcher, HyprlandService, ProcessService};
use crate::config::ConfigPaths;
use crate::messages::{BarCommand, BarEvent};

/// Central hub for managing all async services
pub struct ServiceHub {
    /// Event receiver for the GTK side
    event_rx: async_channel::Receiver<BarEvent>,
    /// Command sender for the GTK side
    command_tx: mpsc::Sender<BarCommand>,
    runtime: Arc<Runtime>,
}

impl ServiceHub {
    /// Create a new ServiceHub with its own tokio runtime
    pub fn new(paths: ConfigPaths, min_workspaces: usize) -> anyhow::Result<Self> {
        let runtime = Arc::new(Runtime::new()?);

        let (event_tx, event_rx) = async_channel::bounded::<BarEvent>(64);
        let (command_tx, command_rx) = mpsc::channel::<BarCommand>(64);

        let (hyprland_tx, hyprland_rx) = mpsc::channel::<BarCommand>(64);
        let (process_tx, process_rx) = mpsc::channel::<BarCommand>(64);
        runtime.spawn(Self::route_commands(command_rx, hyprland_tx, process_tx));

        let event_tx_hyprland = event_tx.clone();
        runtime.spawn(async move {
            let service = HyprlandService::new(event_tx_hyprland, hyprland_rx, min_workspaces);
            if let Err(e) = service.run().await {
                error!("Hyprland service error: {}", e);
            }
        });

        runtime.spawn(async move {
            let service = ProcessService::new(process_rx);
            if let Err(e) = service.run().await {
                error!("Process service error: {}", e);
            }
        });

        runtime.spawn(async move {
            let watcher = ConfigWatcher::new(paths, event_tx);
            if let Err(e) = watcher.run().await {
                error!("Config watcher error: {}", e);
            }
        });

        info!("ServiceHub initialized with all services");

        Ok(Self {
            event_rx,
            command_tx,
            runtime,
        })
    }

    /// Route commands to the service that executes them
    async fn route_commands(
        mut rx: mpsc::Receiver<BarCommand>,
        hyprland_tx: mpsc::Sender<BarCommand>,
        process_tx: mpsc::Sender<BarCommand>,
    ) {
        while let Some(cmd) = rx.recv().await {
            let target = match &cmd {
                BarCommand::Spawn(_) => &process_tx,
                BarCommand::ActivateWorkspace(_)
                | BarCommand::FocusWindow(_)
                | BarCommand::MinimizeWindow(_)
                | BarCommand::RestoreWindow(_) => &hyprland_tx,
            };
            if target.send(cmd).await.is_err() {
                error!("Service stopped, dropping command");
            }
        }
    }

    /// Get a clone of the event receiver for the GTK side
    pub fn event_receiver(&self) -> async_channel::Receiver<BarEvent> {
        self.event_rx.clone()
    }

    /// Get a clone of the command sender for the GTK side
    pub fn command_sender(&self) -> mpsc::Sender<BarCommand> {
        self.command_tx.clone()
    }

    /// Enter the runtime context (for GTK callbacks)
    pub fn enter_runtime(&self) -> tokio::runtime::EnterGuard<'_> {
        self.runtime.enter()
    }
}
