use gtk4::prelude::*;
use gtk4::{Button, Image};
use std::rc::Rc;

use babar_core::host::{LauncherView, StatusPlacement};
use babar_core::BarInput;

use crate::common::MessageBus;
use crate::panel::PanelWindow;

/// Status-area button that toggles the app grid
pub struct LauncherButton {
    panel: Rc<PanelWindow>,
    key: &'static str,
    destroyed: bool,
}

impl LauncherButton {
    pub fn new(panel: Rc<PanelWindow>, placement: StatusPlacement, icon: &str, bus: MessageBus) -> Self {
        let button = Button::new();
        button.add_css_class("panel-button");
        button.set_child(Some(&Image::from_icon_name(icon)));
        button.set_tooltip_text(Some("Show Applications"));
        button.connect_clicked(move |_| bus.send_input(BarInput::AppGrid));

        panel.add_to_status_area(placement, &button);
        Self {
            panel,
            key: placement.key,
            destroyed: false,
        }
    }
}

impl LauncherView for LauncherButton {
    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.panel.remove_from_status_area(self.key);
        }
    }
}
