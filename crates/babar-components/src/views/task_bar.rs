use gtk4::prelude::*;
use gtk4::{graphene, Box as GtkBox, Button, EventControllerMotion, Image, Label, Orientation};
use std::rc::Rc;

use babar_core::bar::{BarModel, WindowButton, WorkspaceIndicator};
use babar_core::host::{BarView, ButtonAnchor, StatusPlacement};
use babar_core::BarInput;

use crate::common::MessageBus;
use crate::panel::PanelWindow;

pub const DESATURATED_CLASS: &str = "window-desaturated";

/// Status-area box holding workspace indicators and window buttons.
///
/// Every render starts from an empty box; widgets are never patched.
pub struct TaskBarBox {
    panel: Rc<PanelWindow>,
    key: &'static str,
    container: GtkBox,
    bus: MessageBus,
    destroyed: bool,
}

impl TaskBarBox {
    pub fn new(panel: Rc<PanelWindow>, placement: StatusPlacement, bus: MessageBus) -> Self {
        let container = GtkBox::new(Orientation::Horizontal, 2);
        container.add_css_class("babar-workspaces");
        panel.add_to_status_area(placement, &container);
        Self {
            panel,
            key: placement.key,
            container,
            bus,
            destroyed: false,
        }
    }

    fn indicator(&self, indicator: &WorkspaceIndicator) -> Button {
        let button = Button::new();
        button.set_child(Some(&Label::new(Some(indicator.label.as_str()))));
        button.add_css_class(indicator.style.css_class());

        let action = indicator.action;
        let bus = self.bus.clone();
        button.connect_clicked(move |_| bus.send_input(BarInput::Action(action)));
        button
    }

    fn window_button(&self, model: &WindowButton) -> Button {
        let image = Image::from_icon_name(&model.icon);
        image.set_pixel_size(model.icon_size);

        let button = Button::new();
        button.set_child(Some(&image));
        button.add_css_class(model.state.css_class());
        button.set_opacity(opacity_fraction(model.opacity));
        if model.desaturate {
            button.add_css_class(DESATURATED_CLASS);
        }

        let action = model.action;
        let bus = self.bus.clone();
        button.connect_clicked(move |_| bus.send_input(BarInput::Action(action)));

        let motion = EventControllerMotion::new();
        let title = model.title.to_string();
        let bus = self.bus.clone();
        let weak = button.downgrade();
        motion.connect_enter(move |_, _, _| {
            let x = weak.upgrade().and_then(|b| screen_x(&b)).unwrap_or(0);
            bus.send_input(BarInput::Hover {
                anchor: ButtonAnchor { x, hovered: true },
                title: title.clone(),
            });
        });
        let title = model.title.to_string();
        let bus = self.bus.clone();
        motion.connect_leave(move |_| {
            bus.send_input(BarInput::Hover {
                anchor: ButtonAnchor { x: 0, hovered: false },
                title: title.clone(),
            });
        });
        button.add_controller(motion);

        button
    }
}

/// Left edge of `button` within its toplevel, which spans the screen width
fn screen_x(button: &Button) -> Option<i32> {
    let root = button.root()?;
    let point = button.compute_point(&root, &graphene::Point::new(0.0, 0.0))?;
    Some(point.x() as i32)
}

/// GTK opacity for a 0-255 setting
pub fn opacity_fraction(opacity: u8) -> f64 {
    f64::from(opacity) / 255.0
}

impl BarView for TaskBarBox {
    fn clear(&mut self) {
        while let Some(child) = self.container.first_child() {
            self.container.remove(&child);
        }
    }

    fn render(&mut self, model: &BarModel) {
        if self.destroyed {
            return;
        }
        for group in &model.groups {
            if model.show_indicators {
                self.container.append(&self.indicator(&group.indicator));
            }
            for button in &group.buttons {
                self.container.append(&self.window_button(button));
            }
        }
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.clear();
            self.panel.remove_from_status_area(self.key);
        }
    }
}
