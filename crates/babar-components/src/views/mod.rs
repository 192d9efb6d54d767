mod favorites;
mod launcher;
mod task_bar;
mod tooltip;

use gtk4::Application;
use std::rc::Rc;

use babar_core::host::{BarView, LauncherView, MenuView, StatusPlacement, TooltipView, ViewFactory};

use crate::common::MessageBus;
use crate::panel::PanelWindow;

pub use favorites::FavoritesPopover;
pub use launcher::LauncherButton;
pub use task_bar::{opacity_fraction, TaskBarBox, DESATURATED_CLASS};
pub use tooltip::TooltipPopup;

/// Builds the bar's GTK views inside the panel
pub struct GtkViewFactory {
    app: Application,
    panel: Rc<PanelWindow>,
    bus: MessageBus,
}

impl GtkViewFactory {
    pub fn new(app: &Application, panel: Rc<PanelWindow>, bus: MessageBus) -> Self {
        Self {
            app: app.clone(),
            panel,
            bus,
        }
    }
}

impl ViewFactory for GtkViewFactory {
    fn app_grid_button(&self, placement: StatusPlacement, icon: &str) -> Box<dyn LauncherView> {
        Box::new(LauncherButton::new(self.panel.clone(), placement, icon, self.bus.clone()))
    }

    fn favorites_menu(&self, placement: StatusPlacement, icon: &str) -> Box<dyn MenuView> {
        Box::new(FavoritesPopover::new(self.panel.clone(), placement, icon, self.bus.clone()))
    }

    fn task_bar(&self, placement: StatusPlacement) -> Box<dyn BarView> {
        Box::new(TaskBarBox::new(self.panel.clone(), placement, self.bus.clone()))
    }

    fn tooltip(&self) -> Box<dyn TooltipView> {
        Box::new(TooltipPopup::new(&self.app))
    }
}
