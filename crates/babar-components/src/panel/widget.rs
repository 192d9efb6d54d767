use gtk4::prelude::*;
use gtk4::{Application, Box as GtkBox, Button, Label, Orientation, Widget};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

use babar_core::host::{Overview, PanelHost, PanelSide, PlacesLabel, StatusLayout, StatusPlacement};
use babar_core::{BarCommand, BarSettings};

use crate::common::{LayerConfig, LayerWindow, MessageBus};
use crate::host::{session_locked, shell_quote};
use crate::panel::PlacesMenu;

/// The top panel: native Activities button, AppMenu label, optional Places
/// menu and a status area the bar's views are inserted into.
pub struct PanelWindow {
    window: LayerWindow,
    left_box: GtkBox,
    status_left: GtkBox,
    status_center: GtkBox,
    status_right: GtkBox,
    layout: RefCell<StatusLayout>,
    items: RefCell<Vec<(&'static str, Widget)>>,
    activities: Button,
    app_menu: Label,
    places: Option<PlacesMenu>,
    bus: MessageBus,
}

impl PanelWindow {
    pub fn new(
        app: &Application,
        settings: &BarSettings,
        overview: Rc<dyn Overview>,
        bus: MessageBus,
    ) -> Self {
        let window = LayerWindow::new(app, LayerConfig::panel(settings.panel_height));
        window.add_css_class("babar-panel");

        let main_box = GtkBox::new(Orientation::Horizontal, 0);
        main_box.add_css_class("panel-container");

        let left_box = GtkBox::new(Orientation::Horizontal, 4);
        left_box.add_css_class("panel-leftbox");
        left_box.set_hexpand(true);
        left_box.set_halign(gtk4::Align::Start);

        let activities = Button::with_label("Activities");
        activities.add_css_class("panel-button");
        activities.connect_clicked(move |_| overview.toggle());
        left_box.append(&activities);

        let status_left = GtkBox::new(Orientation::Horizontal, 4);
        left_box.append(&status_left);

        let app_menu = Label::new(None);
        app_menu.add_css_class("app-menu-label");
        left_box.append(&app_menu);

        let places = settings.enable_places_menu.then(|| {
            let places = PlacesMenu::new(bus.clone());
            left_box.append(places.widget());
            places
        });

        let status_center = GtkBox::new(Orientation::Horizontal, 4);
        status_center.set_halign(gtk4::Align::Center);
        let status_right = GtkBox::new(Orientation::Horizontal, 4);
        status_right.set_hexpand(true);
        status_right.set_halign(gtk4::Align::End);

        main_box.append(&left_box);
        main_box.append(&status_center);
        main_box.append(&status_right);
        window.set_child(Some(&main_box));

        Self {
            window,
            left_box,
            status_left,
            status_center,
            status_right,
            layout: RefCell::new(StatusLayout::new()),
            items: RefCell::new(Vec::new()),
            activities,
            app_menu,
            places,
            bus,
        }
    }

    pub fn present(&self) {
        self.window.present();
    }

    fn container(&self, side: PanelSide) -> &GtkBox {
        match side {
            PanelSide::Left => &self.status_left,
            PanelSide::Center => &self.status_center,
            PanelSide::Right => &self.status_right,
        }
    }

    /// Insert a view into the status area, ordered by placement priority.
    pub fn add_to_status_area(&self, placement: StatusPlacement, widget: &impl IsA<Widget>) {
        self.remove_from_status_area(placement.key);

        let index = self.layout.borrow_mut().insert(placement);
        let container = self.container(placement.side);

        let mut sibling: Option<Widget> = None;
        let mut child = container.first_child();
        for _ in 0..index {
            sibling = child.clone();
            child = child.and_then(|c| c.next_sibling());
        }
        container.insert_child_after(widget, sibling.as_ref());

        self.items
            .borrow_mut()
            .push((placement.key, widget.clone().upcast()));
        debug!("Status item {} added at {:?}[{}]", placement.key, placement.side, index);
    }

    pub fn remove_from_status_area(&self, key: &str) {
        if self.layout.borrow_mut().remove(key).is_none() {
            return;
        }
        let mut items = self.items.borrow_mut();
        if let Some(pos) = items.iter().position(|(k, _)| *k == key) {
            let (_, widget) = items.remove(pos);
            if let Some(parent) = widget.parent().and_downcast::<GtkBox>() {
                parent.remove(&widget);
            }
        }
    }

    /// Show the focused application's name in the AppMenu label
    pub fn set_app_menu_text(&self, text: Option<&str>) {
        self.app_menu.set_label(text.unwrap_or_default());
    }
}

impl PanelHost for PanelWindow {
    fn set_activities_visible(&self, visible: bool) {
        self.activities.set_visible(visible);
    }

    fn set_app_menu_visible(&self, visible: bool) {
        self.app_menu.set_visible(visible);
    }

    fn add_style_class(&self, class: &str) {
        self.left_box.add_css_class(class);
    }

    fn remove_style_class(&self, class: &str) {
        self.left_box.remove_css_class(class);
    }

    fn has_places_indicator(&self) -> bool {
        self.places.is_some()
    }

    fn set_places_label(&self, label: PlacesLabel) {
        if let Some(places) = &self.places {
            places.set_label(&label);
        }
    }

    fn is_session_locked(&self) -> bool {
        session_locked()
    }

    fn notify(&self, message: &str) {
        let command = format!("notify-send BaBar {}", shell_quote(message));
        self.bus.send_command(BarCommand::Spawn(command.into()));
    }
}
