use compact_str::CompactString;
use std::cell::{Cell, RefCell};
use std::time::Instant;
use tracing::{debug, warn};

use babar_core::host::{
    AppInfo, AppLookup, FavoritesSource, NameStore, Overview, WindowControl, WindowId, WindowInfo,
    WorkspaceSource,
};
use babar_core::{AppIndex, BarCommand, BarSettings, FavoritesConfig, HostSnapshot, WorkspaceNames};

use crate::common::MessageBus;

/// A resolved favorite and the command line that opens it
#[derive(Debug, Clone)]
struct Favorite {
    info: AppInfo,
    command: String,
}

/// Workspace, window and app state as last reported by the services.
///
/// Queries answer from the latest [`HostSnapshot`]; commands are queued on
/// the [`MessageBus`] and take effect when Hyprland reports back.
pub struct HyprHost {
    snapshot: RefCell<HostSnapshot>,
    names: RefCell<WorkspaceNames>,
    favorites: RefCell<Vec<Favorite>>,
    apps: AppIndex,
    overview_visible: Cell<bool>,
    overview_command: CompactString,
    app_grid_command: CompactString,
    started: Instant,
    bus: MessageBus,
}

impl HyprHost {
    pub fn new(
        settings: &BarSettings,
        apps: AppIndex,
        names: WorkspaceNames,
        favorites: &FavoritesConfig,
        bus: MessageBus,
    ) -> Self {
        let host = Self {
            snapshot: RefCell::new(HostSnapshot::new(settings.min_workspaces, 0)),
            names: RefCell::new(names),
            favorites: RefCell::new(Vec::new()),
            apps,
            overview_visible: Cell::new(false),
            overview_command: settings.overview_command.as_str().into(),
            app_grid_command: settings.app_grid_command.as_str().into(),
            started: Instant::now(),
            bus,
        };
        host.set_favorites(favorites);
        host
    }

    pub fn set_snapshot(&self, snapshot: HostSnapshot) {
        *self.snapshot.borrow_mut() = snapshot;
    }

    pub fn set_names(&self, names: WorkspaceNames) {
        *self.names.borrow_mut() = names;
    }

    pub fn set_favorites(&self, config: &FavoritesConfig) {
        let resolved: Vec<Favorite> = self
            .apps
            .resolve_favorites(&config.apps)
            .into_iter()
            .map(|(info, entry)| Favorite {
                info,
                command: entry.command(),
            })
            .collect();
        if resolved.len() < config.apps.len() {
            debug!(
                "{} favorites are not installed",
                config.apps.len() - resolved.len()
            );
        }
        *self.favorites.borrow_mut() = resolved;
    }

    /// Class of the focused window, shown by the AppMenu label
    pub fn focused_app_name(&self) -> Option<CompactString> {
        let snapshot = self.snapshot.borrow();
        let window = snapshot.focused_window()?;
        let app_id = window.app_id.as_ref()?;
        Some(
            self.apps
                .for_window_class(app_id)
                .map(|entry| entry.name.clone())
                .unwrap_or_else(|| app_id.clone()),
        )
    }

    fn address_of(&self, window: WindowId) -> Option<(CompactString, bool)> {
        let snapshot = self.snapshot.borrow();
        let address = snapshot.address_of(window)?.clone();
        let hidden = snapshot.window(window).map(|w| w.hidden).unwrap_or(false);
        Some((address, hidden))
    }

    fn run_overview_command(&self, visible: bool) {
        self.overview_visible.set(visible);
        self.bus.send_command(BarCommand::Spawn(self.overview_command.clone()));
    }
}

impl WorkspaceSource for HyprHost {
    fn count(&self) -> usize {
        self.snapshot.borrow().count()
    }

    fn active_index(&self) -> usize {
        self.snapshot.borrow().active_index()
    }

    fn windows_of(&self, index: usize) -> Vec<WindowInfo> {
        self.snapshot.borrow().windows_of(index)
    }
}

impl WindowControl for HyprHost {
    fn activate_window(&self, window: WindowId, _timestamp: u32) {
        let Some((address, hidden)) = self.address_of(window) else {
            warn!("Window {} is gone, not activating", window);
            return;
        };
        let cmd = if hidden {
            BarCommand::RestoreWindow(address)
        } else {
            BarCommand::FocusWindow(address)
        };
        self.bus.send_command(cmd);
    }

    fn minimize_window(&self, window: WindowId) {
        match self.address_of(window) {
            Some((address, _)) => self.bus.send_command(BarCommand::MinimizeWindow(address)),
            None => warn!("Window {} is gone, not minimizing", window),
        }
    }

    fn activate_workspace(&self, index: usize, _timestamp: u32) {
        self.bus.send_command(BarCommand::ActivateWorkspace(index));
    }

    fn current_time(&self) -> u32 {
        // wraps after ~49 days, same as X11 server time
        self.started.elapsed().as_millis() as u32
    }
}

impl Overview for HyprHost {
    fn is_visible(&self) -> bool {
        self.overview_visible.get()
    }

    fn show(&self) {
        if !self.overview_visible.get() {
            self.run_overview_command(true);
        }
    }

    fn hide(&self) {
        if self.overview_visible.get() {
            self.run_overview_command(false);
        }
    }

    fn toggle(&self) {
        self.run_overview_command(!self.overview_visible.get());
    }

    fn toggle_app_grid(&self) {
        self.bus.send_command(BarCommand::Spawn(self.app_grid_command.clone()));
    }
}

impl AppLookup for HyprHost {
    fn icon_for(&self, window: &WindowInfo) -> Option<CompactString> {
        self.apps.icon_for_class(window.app_id.as_deref()?)
    }
}

impl FavoritesSource for HyprHost {
    fn favorites(&self) -> Vec<AppInfo> {
        self.favorites.borrow().iter().map(|f| f.info.clone()).collect()
    }

    fn open_new_window(&self, index: usize) {
        let command = match self.favorites.borrow().get(index) {
            Some(favorite) => favorite.command.clone(),
            None => return,
        };
        self.bus.send_command(BarCommand::Spawn(command.into()));
    }
}

impl NameStore for HyprHost {
    fn workspace_names(&self) -> Vec<String> {
        self.names.borrow().to_strings()
    }
}
