use tracing::debug;

use crate::config::BarSettings;
use crate::host::{HostContext, LauncherView, PanelSide, StatusPlacement};

pub const APP_GRID_PLACEMENT: StatusPlacement = StatusPlacement {
    key: "babar-app-grid-button",
    priority: 0,
    side: PanelSide::Left,
};

/// Panel button that toggles the host's application grid
pub struct AppGridLauncher {
    host: HostContext,
    view: Option<Box<dyn LauncherView>>,
}

impl AppGridLauncher {
    pub fn new(settings: &BarSettings, host: HostContext) -> Self {
        let view = host
            .views
            .app_grid_button(APP_GRID_PLACEMENT, &settings.app_grid_icon_name);
        Self {
            host,
            view: Some(view),
        }
    }

    pub fn activate(&self) {
        if self.view.is_some() {
            debug!("Toggling app grid");
            self.host.overview.toggle_app_grid();
        }
    }

    pub fn destroy(&mut self) {
        if let Some(mut view) = self.view.take() {
            view.destroy();
        }
    }
}

impl Drop for AppGridLauncher {
    fn drop(&mut self) {
        self.destroy();
    }
}
