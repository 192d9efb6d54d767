use compact_str::CompactString;

/// Commands FROM GTK TO async services
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarCommand {
    // =========== Hyprland Commands ===========

    /// Switch to a workspace by 0-based index
    ActivateWorkspace(usize),

    /// Focus a window by address
    FocusWindow(CompactString),

    /// Minimize window to the special workspace
    MinimizeWindow(CompactString),

    /// Restore a minimized window and focus it
    RestoreWindow(CompactString),

    // =========== Process Commands ===========

    /// Run a shell command line (app launch, overview, app grid)
    Spawn(CompactString),
}
