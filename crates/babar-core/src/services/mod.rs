mod hyprland;
mod config_watcher;
mod process;
mod hub;
mod tracker;

pub use hyprland::HyprlandService;
pub use config_watcher::{ConfigFile, ConfigWatcher};
pub use process::ProcessService;
pub use hub::ServiceHub;
pub use tracker::{ClientState, WindowTracker, MINIMIZED_WORKSPACE};
