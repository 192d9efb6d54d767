use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, Image, Label, MenuButton, Orientation, Popover};
use std::rc::Rc;

use babar_core::host::{MenuView, StatusPlacement};
use babar_core::menus::FavoriteItem;
use babar_core::BarInput;

use crate::common::MessageBus;
use crate::panel::PanelWindow;

/// Status-area menu button with one row per favorite application
pub struct FavoritesPopover {
    panel: Rc<PanelWindow>,
    key: &'static str,
    popover: Popover,
    list: GtkBox,
    bus: MessageBus,
    destroyed: bool,
}

impl FavoritesPopover {
    pub fn new(panel: Rc<PanelWindow>, placement: StatusPlacement, icon: &str, bus: MessageBus) -> Self {
        let button = MenuButton::new();
        button.add_css_class("panel-button");
        button.set_icon_name(icon);
        button.set_tooltip_text(Some("Favorites"));

        let list = GtkBox::new(Orientation::Vertical, 2);
        let popover = Popover::new();
        popover.set_child(Some(&list));
        button.set_popover(Some(&popover));

        panel.add_to_status_area(placement, &button);
        Self {
            panel,
            key: placement.key,
            popover,
            list,
            bus,
            destroyed: false,
        }
    }
}

impl MenuView for FavoritesPopover {
    fn remove_all(&mut self) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
    }

    fn add_item(&mut self, item: &FavoriteItem) {
        let row = GtkBox::new(Orientation::Horizontal, 8);
        let image = Image::from_icon_name(&item.icon);
        image.set_pixel_size(item.icon_size);
        row.append(&image);
        row.append(&Label::new(Some(item.name.as_str())));

        let button = Button::new();
        button.add_css_class("favorites-menu-item");
        button.set_has_frame(false);
        button.set_child(Some(&row));

        let index = item.index;
        let bus = self.bus.clone();
        let popover = self.popover.clone();
        button.connect_clicked(move |_| {
            popover.popdown();
            bus.send_input(BarInput::Favorite(index));
        });
        self.list.append(&button);
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.remove_all();
            self.panel.remove_from_status_area(self.key);
        }
    }
}
