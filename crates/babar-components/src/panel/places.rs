use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, MenuButton, Orientation, Popover};
use std::path::PathBuf;

use babar_core::host::PlacesLabel;
use babar_core::BarCommand;

use crate::common::MessageBus;
use crate::host::shell_quote;

/// A folder listed in the Places menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub label: &'static str,
    pub path: PathBuf,
}

impl Place {
    pub fn open_command(&self) -> String {
        format!("xdg-open {}", shell_quote(&self.path.to_string_lossy()))
    }
}

/// Home followed by the XDG user directories that are configured
pub fn user_places() -> Vec<Place> {
    let candidates = [
        ("Home", dirs::home_dir()),
        ("Desktop", dirs::desktop_dir()),
        ("Documents", dirs::document_dir()),
        ("Downloads", dirs::download_dir()),
        ("Music", dirs::audio_dir()),
        ("Pictures", dirs::picture_dir()),
        ("Videos", dirs::video_dir()),
    ];
    let mut places: Vec<Place> = Vec::new();
    for (label, path) in candidates {
        let Some(path) = path else { continue };
        // unset XDG dirs fall back to $HOME
        if places.iter().any(|p| p.path == path) {
            continue;
        }
        places.push(Place { label, path });
    }
    places
}

/// Panel menu listing user folders, opened with `xdg-open`
pub struct PlacesMenu {
    button: MenuButton,
}

impl PlacesMenu {
    pub fn new(bus: MessageBus) -> Self {
        let button = MenuButton::new();
        button.add_css_class("panel-button");
        button.set_label(babar_core::lifecycle::PLACES_LABEL);

        let list = GtkBox::new(Orientation::Vertical, 2);
        let popover = Popover::new();
        popover.set_child(Some(&list));
        button.set_popover(Some(&popover));

        for place in user_places() {
            let item = Button::with_label(place.label);
            item.add_css_class("places-menu-item");
            item.set_has_frame(false);
            item.set_tooltip_text(Some(place.path.to_string_lossy().as_ref()));
            let bus = bus.clone();
            let popover = popover.clone();
            let command = place.open_command();
            item.connect_clicked(move |_| {
                popover.popdown();
                bus.send_command(BarCommand::Spawn(command.as_str().into()));
            });
            list.append(&item);
        }

        Self { button }
    }

    pub fn widget(&self) -> &MenuButton {
        &self.button
    }

    pub fn set_label(&self, label: &PlacesLabel) {
        match label {
            PlacesLabel::Icon(name) => self.button.set_icon_name(name),
            PlacesLabel::Text(text) => self.button.set_label(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_places_start_at_home_without_duplicates() {
        let places = user_places();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(places[0], Place { label: "Home", path: home });
        }
        for (i, place) in places.iter().enumerate() {
            assert!(places[i + 1..].iter().all(|p| p.path != place.path));
        }
    }

    #[test]
    fn test_open_command_quotes_path() {
        let place = Place {
            label: "Music",
            path: PathBuf::from("/home/me/My Music"),
        };
        assert_eq!(place.open_command(), "xdg-open '/home/me/My Music'");
    }
}
