use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{BarError, Result};

/// BaBar settings (settings.json)
///
/// Read once when the bar is enabled and handed to every component as an
/// immutable value. Changing the file afterwards only triggers a restart
/// notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarSettings {
    // Appearance
    pub reduce_padding: bool,
    pub app_grid_icon_name: String,
    pub places_icon_name: String,
    pub favorites_icon_name: String,
    pub fallback_icon_name: String,
    pub icon_size: i32,
    pub rounded_workspaces_buttons: bool,
    pub tooltip_vertical_padding: i32,
    pub hidden_opacity: u8,
    pub unfocused_opacity: u8,
    pub focused_opacity: u8,
    pub desaturate_icons: bool,

    // What to display
    pub display_activities: bool,
    pub display_app_grid: bool,
    pub display_places_icon: bool,
    pub display_favorites: bool,
    pub display_workspaces: bool,
    pub display_tasks: bool,
    pub display_app_menu: bool,

    // Host panel
    pub panel_height: i32,
    pub min_workspaces: usize,
    pub overview_command: String,
    pub app_grid_command: String,
    pub enable_places_menu: bool,
}

impl Default for BarSettings {
    fn default() -> Self {
        Self {
            reduce_padding: false,
            app_grid_icon_name: "view-app-grid-symbolic".into(),
            places_icon_name: "folder-symbolic".into(),
            favorites_icon_name: "starred-symbolic".into(),
            fallback_icon_name: "applications-system-symbolic".into(),
            icon_size: 20,
            rounded_workspaces_buttons: true,
            tooltip_vertical_padding: 10,
            hidden_opacity: 127,
            unfocused_opacity: 255,
            focused_opacity: 255,
            desaturate_icons: false,

            display_activities: false,
            display_app_grid: true,
            display_places_icon: true,
            display_favorites: true,
            display_workspaces: true,
            display_tasks: true,
            display_app_menu: false,

            panel_height: 32,
            min_workspaces: 4,
            overview_command: "hyprctl dispatch hyprexpo:expo toggle".into(),
            app_grid_command: "rofi -show drun".into(),
            enable_places_menu: true,
        }
    }
}

impl BarSettings {
    /// Load settings, falling back to defaults when the file is missing or
    /// cannot be parsed.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(BarError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {:?}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings, reporting any read or parse error.
    pub fn try_load(path: &Path) -> Result<Self> {
        super::read_json(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        super::write_json(path, self)
    }

    /// Vertical position of the window tooltip, below the panel.
    pub fn tooltip_y(&self) -> i32 {
        self.panel_height + self.tooltip_vertical_padding
    }
}
