use async_channel::Sender;
use hyprland::data::{Client, Clients, Workspace, Workspaces};
use hyprland::dispatch::{Dispatch, DispatchType, WindowIdentifier, WorkspaceIdentifierWithSpecial};
use hyprland::event_listener::EventListener;
use hyprland::shared::{Address, HyprData, HyprDataActive, HyprDataActiveOptional};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

use super::tracker::{ClientState, WindowTracker, MINIMIZED_WORKSPACE};
use crate::host::{HostSignal, HostSnapshot, WorkspaceSource};
use crate::messages::{BarCommand, BarEvent};

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Async service for Hyprland IPC: publishes workspace/window snapshots and
/// executes window commands.
pub struct HyprlandService {
    event_tx: Sender<BarEvent>,
    command_rx: mpsc::Receiver<BarCommand>,
    min_workspaces: usize,
    tracker: WindowTracker,
}

impl HyprlandService {
    pub fn new(
        event_tx: Sender<BarEvent>,
        command_rx: mpsc::Receiver<BarCommand>,
        min_workspaces: usize,
    ) -> Self {
        Self {
            event_tx,
            command_rx,
            min_workspaces,
            tracker: WindowTracker::new(),
        }
    }

    /// Check if Hyprland is running by looking for its socket
    fn is_hyprland_running() -> bool {
        let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") else {
            return false;
        };
        if let Ok(sig) = std::env::var("HYPRLAND_INSTANCE_SIGNATURE") {
            let socket_path = format!("{}/hypr/{}/.socket.sock", runtime_dir, sig);
            return std::path::Path::new(&socket_path).exists();
        }
        false
    }

    /// Main run loop: waits for Hyprland, then serves refreshes and commands
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!("Starting Hyprland service");

        loop {
            if Self::is_hyprland_running() {
                match self.publish(HostSignal::WorkspaceCountChanged).await {
                    Ok(()) => break,
                    Err(e) => warn!("Failed to query Hyprland: {}, retrying in 2s", e),
                }
            } else {
                warn!("Hyprland not running, waiting...");
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
        let _ = self.event_tx.send(BarEvent::HyprlandConnected).await;
        info!("Connected to Hyprland IPC");

        let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel::<HostSignal>();
        let event_tx = self.event_tx.clone();
        // the listener's handlers are not Send, so it gets its own thread
        std::thread::Builder::new()
            .name("hyprland-events".into())
            .spawn(move || {
                supervise_listener(&refresh_tx, &event_tx, RECONNECT_DELAY, Self::run_event_listener)
            })?;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    if let Err(e) = self.handle_command(cmd).await {
                        error!("Failed to execute command: {}", e);
                    }
                }
                Some(cause) = refresh_rx.recv() => {
                    // a burst of compositor events needs only one query
                    while refresh_rx.try_recv().is_ok() {}
                    if let Err(e) = self.publish(cause).await {
                        warn!("Failed to refresh Hyprland state: {}", e);
                    }
                }
            }
        }

        Ok(())
    }

    /// Query the compositor and send a snapshot tagged with `cause`
    async fn publish(&mut self, cause: HostSignal) -> anyhow::Result<()> {
        let snapshot = self.query_snapshot().await?;
        trace!(
            "Snapshot: {} workspaces, {} windows ({:?})",
            snapshot.count(),
            snapshot.windows().len(),
            cause
        );
        self.event_tx
            .send(BarEvent::Snapshot { snapshot, cause })
            .await
            .map_err(|_| crate::error::BarError::ChannelClosed("bar events"))?;
        Ok(())
    }

    async fn query_snapshot(&mut self) -> anyhow::Result<HostSnapshot> {
        let (workspaces, clients, active, focused) = futures::try_join!(
            Workspaces::get_async(),
            Clients::get_async(),
            Workspace::get_active_async(),
            Client::get_active_async(),
        )?;

        let workspace_ids: Vec<i32> = workspaces.into_iter().map(|ws| ws.id).collect();
        let focused = focused.map(|client| client.address.to_string());
        let clients = clients
            .into_iter()
            .map(|client| ClientState {
                address: client.address.to_string().into(),
                workspace_id: client.workspace.id,
                workspace_name: client.workspace.name.into(),
                class: client.class.into(),
                title: client.title.into(),
                pid: client.pid,
                pinned: client.pinned,
                floating: client.floating,
            })
            .collect();

        Ok(self.tracker.snapshot(
            self.min_workspaces,
            &workspace_ids,
            active.id,
            focused.as_deref(),
            clients,
        ))
    }

    /// Run the event listener (blocks until error)
    fn run_event_listener(tx: &mpsc::UnboundedSender<HostSignal>) -> anyhow::Result<()> {
        let mut listener = EventListener::new();

        let tx1 = tx.clone();
        listener.add_workspace_added_handler(move |_| {
            let _ = tx1.send(HostSignal::WorkspaceCountChanged);
        });

        let tx2 = tx.clone();
        listener.add_workspace_destroy_handler(move |_| {
            let _ = tx2.send(HostSignal::WorkspaceCountChanged);
        });

        let tx3 = tx.clone();
        listener.add_workspace_change_handler(move |_| {
            let _ = tx3.send(HostSignal::Restacked);
        });

        let tx4 = tx.clone();
        listener.add_window_open_handler(move |_| {
            let _ = tx4.send(HostSignal::Restacked);
        });

        let tx5 = tx.clone();
        listener.add_window_close_handler(move |_| {
            let _ = tx5.send(HostSignal::Restacked);
        });

        let tx6 = tx.clone();
        listener.add_active_window_change_handler(move |_| {
            let _ = tx6.send(HostSignal::Restacked);
        });

        let tx7 = tx.clone();
        listener.add_window_moved_handler(move |_| {
            let _ = tx7.send(HostSignal::Restacked);
        });

        let tx8 = tx.clone();
        listener.add_window_title_change_handler(move |_| {
            let _ = tx8.send(HostSignal::Restacked);
        });

        let tx9 = tx.clone();
        listener.add_active_monitor_change_handler(move |_| {
            let _ = tx9.send(HostSignal::WindowLeftMonitor);
        });

        debug!("Starting Hyprland event listener");
        listener.start_listener()?;

        Ok(())
    }

    /// Handle a command from the GTK UI
    async fn handle_command(&mut self, cmd: BarCommand) -> anyhow::Result<()> {
        match cmd {
            BarCommand::ActivateWorkspace(index) => {
                debug!("Switching to workspace {}", index + 1);
                Dispatch::call_async(DispatchType::Workspace(WorkspaceIdentifierWithSpecial::Id(
                    index as i32 + 1,
                )))
                .await?;
            }

            BarCommand::FocusWindow(addr) => {
                if self.tracker.is_minimized(&addr) {
                    return self.restore(&addr).await;
                }
                debug!("Focusing window: {}", addr);
                Dispatch::call_async(DispatchType::FocusWindow(WindowIdentifier::Address(
                    Address::new(&addr),
                )))
                .await?;
            }

            BarCommand::MinimizeWindow(addr) => {
                let Some(origin) = self.tracker.mark_minimized(&addr) else {
                    warn!("Cannot minimize unknown window {}", addr);
                    return Ok(());
                };
                debug!("Minimizing window {} from workspace {}", addr, origin);
                Dispatch::call_async(DispatchType::MoveToWorkspaceSilent(
                    WorkspaceIdentifierWithSpecial::Special(Some(MINIMIZED_WORKSPACE.into())),
                    Some(WindowIdentifier::Address(Address::new(&addr))),
                ))
                .await?;
                self.publish(HostSignal::Restacked).await?;
            }

            BarCommand::RestoreWindow(addr) => {
                self.restore(&addr).await?;
            }

            // Handled by ProcessService
            BarCommand::Spawn(_) => {}
        }

        Ok(())
    }

    /// Move a minimized window back to its workspace and focus it
    async fn restore(&mut self, addr: &str) -> anyhow::Result<()> {
        let target = match self.tracker.take_origin(addr) {
            Some(origin) => WorkspaceIdentifierWithSpecial::Id(origin),
            None => WorkspaceIdentifierWithSpecial::Relative(0),
        };
        debug!("Restoring window: {}", addr);
        Dispatch::call_async(DispatchType::MoveToWorkspaceSilent(
            target,
            Some(WindowIdentifier::Address(Address::new(addr))),
        ))
        .await?;
        Dispatch::call_async(DispatchType::FocusWindow(WindowIdentifier::Address(
            Address::new(addr),
        )))
        .await?;
        self.publish(HostSignal::Restacked).await
    }
}

/// Keep the event listener running until the service stops listening.
///
/// Events are lost while disconnected, so every reconnect queues a full
/// refresh.
fn supervise_listener(
    refresh_tx: &mpsc::UnboundedSender<HostSignal>,
    event_tx: &Sender<BarEvent>,
    delay: Duration,
    mut listen: impl FnMut(&mpsc::UnboundedSender<HostSignal>) -> anyhow::Result<()>,
) {
    while !refresh_tx.is_closed() {
        if let Err(e) = listen(refresh_tx) {
            error!("Event listener error: {}, reconnecting...", e);
            let _ = event_tx.send_blocking(BarEvent::HyprlandDisconnected);
            std::thread::sleep(delay);
            let _ = refresh_tx.send(HostSignal::WorkspaceCountChanged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_failure_queues_refresh() {
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = async_channel::unbounded();
        let mut refresh_rx = Some(refresh_rx);
        let mut queued = Vec::new();
        let mut attempts = 0;

        supervise_listener(&refresh_tx, &event_tx, Duration::ZERO, |_| {
            attempts += 1;
            if attempts == 1 {
                anyhow::bail!("socket closed");
            }
            // closing the receiver stops the loop
            if let Some(mut rx) = refresh_rx.take() {
                while let Ok(signal) = rx.try_recv() {
                    queued.push(signal);
                }
            }
            Ok(())
        });

        assert_eq!(attempts, 2);
        assert_eq!(queued, vec![HostSignal::WorkspaceCountChanged]);
        assert!(matches!(event_rx.try_recv(), Ok(BarEvent::HyprlandDisconnected)));
        assert!(event_rx.try_recv().is_err());
    }
}
