//! Narrow capability interfaces onto the shell host.
//!
//! The bar never talks to the compositor or the toolkit directly. Each
//! concern the host provides (workspace enumeration, window commands, the
//! overview, icon lookup, favorites, the settings store, panel affordances,
//! views, signals and timers) is a small trait, so the logic in
//! [`crate::bar`], [`crate::menus`] and [`crate::lifecycle`] runs unchanged
//! against the GTK/Hyprland host or a test fake.

mod signals;
mod snapshot;
mod status_area;

#[cfg(test)]
pub(crate) mod fake;

use compact_str::CompactString;
use std::rc::Rc;
use std::time::Duration;

use crate::bar::BarModel;
use crate::menus::FavoriteItem;

pub use signals::{HandlerId, SignalRegistry, Subscription, SubscriptionSet};
pub use snapshot::HostSnapshot;
pub use status_area::StatusLayout;

/// Host-assigned window identity, monotonic in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of window, as far as the bar cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    #[default]
    Normal,
    Dialog,
    Utility,
    DropdownMenu,
}

/// A window as seen at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    /// Owning workspace; `None` when pinned to all workspaces.
    pub workspace: Option<usize>,
    pub on_all_workspaces: bool,
    pub title: CompactString,
    pub hidden: bool,
    pub focused: bool,
    pub window_type: WindowType,
    /// Application identifier (window class / desktop id).
    pub app_id: Option<CompactString>,
}

impl WindowInfo {
    pub fn new(id: u64, workspace: usize) -> Self {
        Self {
            id: WindowId(id),
            workspace: Some(workspace),
            on_all_workspaces: false,
            title: CompactString::default(),
            hidden: false,
            focused: false,
            window_type: WindowType::Normal,
            app_id: None,
        }
    }

    pub fn pinned(id: u64) -> Self {
        Self {
            workspace: None,
            on_all_workspaces: true,
            ..Self::new(id, 0)
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_app(mut self, app_id: &str) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn focused(mut self) -> Self {
        self.focused = true;
        self
    }
}

/// Application shown in the favorites menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub id: CompactString,
    pub name: CompactString,
    pub icon: Option<CompactString>,
}

/// Workspace enumeration
pub trait WorkspaceSource {
    fn count(&self) -> usize;
    fn active_index(&self) -> usize;
    fn windows_of(&self, index: usize) -> Vec<WindowInfo>;
}

/// Window and workspace commands
pub trait WindowControl {
    fn activate_window(&self, window: WindowId, timestamp: u32);
    fn minimize_window(&self, window: WindowId);
    fn activate_workspace(&self, index: usize, timestamp: u32);
    /// Current event time, used for focus arbitration
    fn current_time(&self) -> u32;
}

/// The host's overview mode and launcher view
pub trait Overview {
    fn is_visible(&self) -> bool;
    fn show(&self);
    fn hide(&self);
    fn toggle(&self);
    fn toggle_app_grid(&self);
}

/// Icon lookup for a window's owning application
pub trait AppLookup {
    fn icon_for(&self, window: &WindowInfo) -> Option<CompactString>;
}

/// Externally persisted favorites list
pub trait FavoritesSource {
    fn favorites(&self) -> Vec<AppInfo>;
    fn open_new_window(&self, index: usize);
}

/// Workspace name overrides from the settings store
pub trait NameStore {
    fn workspace_names(&self) -> Vec<String>;
}

/// Label of the host's Places indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacesLabel {
    Icon(CompactString),
    Text(CompactString),
}

/// Native panel affordances the bar alters and restores
pub trait PanelHost {
    fn set_activities_visible(&self, visible: bool);
    fn set_app_menu_visible(&self, visible: bool);
    fn add_style_class(&self, class: &str);
    fn remove_style_class(&self, class: &str);
    fn has_places_indicator(&self) -> bool;
    fn set_places_label(&self, label: PlacesLabel);
    fn is_session_locked(&self) -> bool;
    fn notify(&self, message: &str);
}

/// Side of the panel a status item lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelSide {
    Left,
    Center,
    Right,
}

/// Where a view is inserted into the panel status area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPlacement {
    pub key: &'static str,
    pub priority: i32,
    pub side: PanelSide,
}

/// Screen anchor of a hovered window button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonAnchor {
    pub x: i32,
    pub hovered: bool,
}

/// Launcher toggle button
pub trait LauncherView {
    fn destroy(&mut self);
}

/// Favorites popup menu
pub trait MenuView {
    fn remove_all(&mut self);
    fn add_item(&mut self, item: &FavoriteItem);
    fn destroy(&mut self);
}

/// Workspace/task bar widget tree
pub trait BarView {
    /// Destroy every child widget
    fn clear(&mut self);
    fn render(&mut self, model: &BarModel);
    fn destroy(&mut self);
}

/// The shared floating tooltip
pub trait TooltipView {
    fn show_at(&mut self, x: i32, y: i32, text: &str);
    fn hide(&mut self);
    fn destroy(&mut self);
}

/// Creates the views the bar places into the panel
pub trait ViewFactory {
    fn app_grid_button(&self, placement: StatusPlacement, icon: &str) -> Box<dyn LauncherView>;
    fn favorites_menu(&self, placement: StatusPlacement, icon: &str) -> Box<dyn MenuView>;
    fn task_bar(&self, placement: StatusPlacement) -> Box<dyn BarView>;
    fn tooltip(&self) -> Box<dyn TooltipView>;
}

/// Host notifications the bar subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostSignal {
    WorkspaceCountChanged,
    Restacked,
    WindowLeftMonitor,
    WorkspaceNamesChanged,
    FavoritesChanged,
    SettingsChanged,
    ExtensionStateChanged,
}

/// Signal connection bookkeeping
pub trait SignalHub {
    fn connect(&self, signal: HostSignal) -> HandlerId;
    fn disconnect(&self, id: HandlerId);
}

/// Handle of a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// One-shot timers on the host's event loop
pub trait Scheduler {
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId;
    fn cancel(&self, id: TimerId);
}

/// Everything the bar needs from its host
#[derive(Clone)]
pub struct HostContext {
    pub workspaces: Rc<dyn WorkspaceSource>,
    pub windows: Rc<dyn WindowControl>,
    pub overview: Rc<dyn Overview>,
    pub apps: Rc<dyn AppLookup>,
    pub favorites: Rc<dyn FavoritesSource>,
    pub names: Rc<dyn NameStore>,
    pub panel: Rc<dyn PanelHost>,
    pub views: Rc<dyn ViewFactory>,
    pub signals: Rc<dyn SignalHub>,
    pub scheduler: Rc<dyn Scheduler>,
}
