use gtk4::prelude::*;
use gtk4::{Application, Label};

use babar_core::host::TooltipView;

use crate::common::{LayerConfig, LayerMargins, LayerWindow};

/// Overlay surface showing a window title below the panel
pub struct TooltipPopup {
    window: LayerWindow,
    label: Label,
    destroyed: bool,
}

impl TooltipPopup {
    pub fn new(app: &Application) -> Self {
        let window = LayerWindow::new(app, LayerConfig::tooltip());
        window.add_css_class("babar-tooltip");
        window.set_can_target(false);

        let label = Label::new(None);
        label.add_css_class("window-tooltip");
        window.set_child(Some(&label));

        Self {
            window,
            label,
            destroyed: false,
        }
    }
}

impl TooltipView for TooltipPopup {
    fn show_at(&mut self, x: i32, y: i32, text: &str) {
        if self.destroyed {
            return;
        }
        self.label.set_label(text);
        self.window.set_margins(LayerMargins { top: y, left: x.max(0) });
        self.window.present();
    }

    fn hide(&mut self) {
        if !self.destroyed {
            self.window.hide();
        }
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.window.close();
        }
    }
}
