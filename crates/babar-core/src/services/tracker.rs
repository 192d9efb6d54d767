use ahash::AHashMap;
use compact_str::CompactString;

use crate::host::{HostSnapshot, WindowId, WindowInfo, WindowType};

/// Name of the special workspace minimized windows are parked on
pub const MINIMIZED_WORKSPACE: &str = "minimized";

/// A compositor client reduced to what the bar needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientState {
    pub address: CompactString,
    pub workspace_id: i32,
    pub workspace_name: CompactString,
    pub class: CompactString,
    pub title: CompactString,
    /// Owning process; only used to order windows seen for the first time
    pub pid: i32,
    pub pinned: bool,
    pub floating: bool,
}

impl ClientState {
    fn is_special(&self) -> bool {
        self.workspace_id < 0 || self.workspace_name.starts_with("special:")
    }
}

/// Assigns creation-ordered ids to compositor windows and remembers where
/// minimized windows came from.
#[derive(Debug, Default)]
pub struct WindowTracker {
    ids: AHashMap<CompactString, u64>,
    next_id: u64,
    minimized: AHashMap<CompactString, i32>,
    workspaces: AHashMap<CompactString, i32>,
}

impl WindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `address`, allocating the next one on first sight
    pub fn id_for(&mut self, address: &str) -> WindowId {
        if let Some(id) = self.ids.get(address) {
            return WindowId(*id);
        }
        self.next_id += 1;
        self.ids.insert(address.into(), self.next_id);
        WindowId(self.next_id)
    }

    /// Remember that `address` was minimized away from its workspace
    pub fn mark_minimized(&mut self, address: &str) -> Option<i32> {
        let origin = *self.workspaces.get(address)?;
        self.minimized.insert(address.into(), origin);
        Some(origin)
    }

    /// Workspace a minimized window should go back to
    pub fn take_origin(&mut self, address: &str) -> Option<i32> {
        self.minimized.remove(address)
    }

    pub fn is_minimized(&self, address: &str) -> bool {
        self.minimized.contains_key(address)
    }

    /// Build a snapshot from one query and drop state of vanished windows.
    ///
    /// Workspace ids are 1-based in Hyprland and become 0-based indices.
    /// Windows on special workspaces are left out unless this bar minimized
    /// them, in which case they are reported hidden on their origin.
    pub fn snapshot(
        &mut self,
        min_workspaces: usize,
        workspace_ids: &[i32],
        active_workspace: i32,
        focused: Option<&str>,
        mut clients: Vec<ClientState>,
    ) -> HostSnapshot {
        let highest = workspace_ids.iter().copied().filter(|id| *id > 0).max().unwrap_or(0);
        let count = min_workspaces.max(highest as usize).max(1);
        let active = (active_workspace.max(1) - 1) as usize;
        let mut snapshot = HostSnapshot::new(count, active);

        self.ids.retain(|address, _| clients.iter().any(|c| c.address == *address));
        self.minimized.retain(|address, _| clients.iter().any(|c| c.address == *address));
        self.workspaces.clear();

        // Hyprland reports no creation time. Windows already open at startup
        // get ids in process start order, then address order within one
        // process, which can differ from the order they were opened in.
        clients.sort_by(|a, b| a.pid.cmp(&b.pid).then_with(|| a.address.cmp(&b.address)));

        for client in clients {
            let hidden = self.minimized.get(&client.address).copied();
            let workspace_id = match hidden {
                Some(origin) => origin,
                None if client.is_special() => continue,
                None => client.workspace_id,
            };
            self.workspaces.insert(client.address.clone(), workspace_id);

            let window = WindowInfo {
                id: self.id_for(&client.address),
                workspace: (!client.pinned).then(|| (workspace_id.max(1) - 1) as usize),
                on_all_workspaces: client.pinned,
                title: client.title,
                hidden: hidden.is_some(),
                focused: focused == Some(client.address.as_str()),
                window_type: if client.floating && client.class.is_empty() {
                    WindowType::DropdownMenu
                } else {
                    WindowType::Normal
                },
                app_id: (!client.class.is_empty()).then_some(client.class),
            };
            snapshot.push_window(window, client.address);
        }

        snapshot
    }
}
