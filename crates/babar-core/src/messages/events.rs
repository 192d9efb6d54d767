use crate::config::{FavoritesConfig, WorkspaceNames};
use crate::host::{HostSignal, HostSnapshot};

/// Events FROM async services TO GTK (updates UI)
#[derive(Debug, Clone)]
pub enum BarEvent {
    // =========== Hyprland Events ===========

    /// Fresh workspace/window state, and the host signal that caused it
    Snapshot {
        snapshot: HostSnapshot,
        cause: HostSignal,
    },

    /// Successfully connected to Hyprland IPC
    HyprlandConnected,

    /// Lost connection to Hyprland IPC
    HyprlandDisconnected,

    // =========== Configuration Events ===========

    /// settings.json changed on disk
    SettingsChanged,

    /// workspace-names.json changed on disk
    WorkspaceNamesChanged(WorkspaceNames),

    /// favorites.json changed on disk
    FavoritesChanged(FavoritesConfig),
}

impl BarEvent {
    /// Host signal this event raises, if any
    pub fn signal(&self) -> Option<HostSignal> {
        match self {
            BarEvent::Snapshot { cause, .. } => Some(*cause),
            BarEvent::SettingsChanged => Some(HostSignal::SettingsChanged),
            BarEvent::WorkspaceNamesChanged(_) => Some(HostSignal::WorkspaceNamesChanged),
            BarEvent::FavoritesChanged(_) => Some(HostSignal::FavoritesChanged),
            BarEvent::HyprlandConnected | BarEvent::HyprlandDisconnected => None,
        }
    }
}
