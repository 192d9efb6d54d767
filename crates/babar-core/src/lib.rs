//! Workspace and task bar for a Hyprland panel.
//!
//! The bar logic ([`bar`], [`menus`], [`lifecycle`]) only talks to the
//! capability traits in [`host`]; the GTK side and the async [`services`]
//! provide them.

pub mod bar;
pub mod config;
pub mod desktop;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod menus;
pub mod messages;
pub mod services;
pub mod theme;

pub use bar::{BarAction, BarModel, TaskBarSync, TooltipController};
pub use config::{BarSettings, ConfigPaths, FavoritesConfig, WorkspaceNames};
pub use desktop::{AppIndex, DesktopEntry};
pub use error::{BarError, Result};
pub use host::{HostContext, HostSignal, HostSnapshot, SignalRegistry};
pub use lifecycle::{BarInput, Extension};
pub use messages::{BarCommand, BarEvent};
pub use services::{ConfigWatcher, HyprlandService, ProcessService, ServiceHub};
pub use theme::{load_css, PANEL_CSS};
