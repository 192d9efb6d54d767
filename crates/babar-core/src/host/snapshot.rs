use ahash::AHashMap;
use compact_str::CompactString;

use super::{WindowId, WindowInfo, WorkspaceSource};

/// Workspace and window state captured from one compositor query.
///
/// Pinned windows are listed by every workspace, the way the compositor
/// reports them; the bar decides where to draw them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSnapshot {
    workspace_count: usize,
    active_index: usize,
    windows: Vec<WindowInfo>,
    addresses: AHashMap<WindowId, CompactString>,
}

impl HostSnapshot {
    pub fn new(workspace_count: usize, active_index: usize) -> Self {
        Self {
            workspace_count: workspace_count.max(1),
            active_index,
            ..Default::default()
        }
    }

    pub fn push_window(&mut self, window: WindowInfo, address: impl Into<CompactString>) {
        if let Some(index) = window.workspace {
            if index >= self.workspace_count {
                self.workspace_count = index + 1;
            }
        }
        self.addresses.insert(window.id, address.into());
        self.windows.push(window);
    }

    pub fn with_window(mut self, window: WindowInfo) -> Self {
        let address = compact_str::format_compact!("{:x}", window.id.0);
        self.push_window(window, address);
        self
    }

    /// Compositor address of a window, for dispatching commands
    pub fn address_of(&self, id: WindowId) -> Option<&CompactString> {
        self.addresses.get(&id)
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowInfo> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn focused_window(&self) -> Option<&WindowInfo> {
        self.windows.iter().find(|w| w.focused)
    }

    pub fn windows(&self) -> &[WindowInfo] {
        &self.windows
    }
}

impl WorkspaceSource for HostSnapshot {
    fn count(&self) -> usize {
        self.workspace_count
    }

    fn active_index(&self) -> usize {
        self.active_index
    }

    fn windows_of(&self, index: usize) -> Vec<WindowInfo> {
        self.windows
            .iter()
            .filter(|w| w.on_all_workspaces || w.workspace == Some(index))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_window_listed_everywhere() {
        let snapshot = HostSnapshot::new(3, 0)
            .with_window(WindowInfo::new(1, 0))
            .with_window(WindowInfo::new(2, 2))
            .with_window(WindowInfo::pinned(3));

        assert_eq!(snapshot.windows_of(0).len(), 2);
        assert_eq!(snapshot.windows_of(1).len(), 1);
        assert_eq!(snapshot.windows_of(2).len(), 2);
    }

    #[test]
    fn test_window_on_unknown_workspace_grows_count() {
        let snapshot = HostSnapshot::new(2, 0).with_window(WindowInfo::new(9, 5));
        assert_eq!(snapshot.count(), 6);
    }

    #[test]
    fn test_count_is_at_least_one() {
        assert_eq!(HostSnapshot::new(0, 0).count(), 1);
    }

    #[test]
    fn test_address_lookup() {
        let mut snapshot = HostSnapshot::new(1, 0);
        snapshot.push_window(WindowInfo::new(4, 0).focused(), "0x55aa");
        assert_eq!(snapshot.address_of(WindowId(4)).map(|a| a.as_str()), Some("0x55aa"));
        assert_eq!(snapshot.focused_window().map(|w| w.id), Some(WindowId(4)));
        assert!(snapshot.address_of(WindowId(5)).is_none());
    }
}
