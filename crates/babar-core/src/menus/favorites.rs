use compact_str::CompactString;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::config::BarSettings;
use crate::host::{HostContext, HostSignal, MenuView, PanelSide, StatusPlacement, SubscriptionSet};

pub const FAVORITES_PLACEMENT: StatusPlacement = StatusPlacement {
    key: "babar-favorites-menu",
    priority: 3,
    side: PanelSide::Left,
};

/// One launchable entry of the favorites menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteItem {
    /// Position in the favorites list when the menu was built
    pub index: usize,
    pub name: CompactString,
    pub icon: CompactString,
    pub icon_size: i32,
}

/// Panel menu listing the user's favorite applications.
///
/// The items are thrown away and rebuilt whenever the favorites list
/// changes.
pub struct FavoritesMenu {
    settings: Rc<BarSettings>,
    host: HostContext,
    view: Option<Box<dyn MenuView>>,
    items: Vec<FavoriteItem>,
    subscriptions: SubscriptionSet,
}

impl FavoritesMenu {
    pub fn new(settings: Rc<BarSettings>, host: HostContext) -> Self {
        let mut subscriptions = SubscriptionSet::new();
        subscriptions.connect(&host.signals, HostSignal::FavoritesChanged);

        let view = host
            .views
            .favorites_menu(FAVORITES_PLACEMENT, &settings.favorites_icon_name);

        let mut menu = Self {
            settings,
            host,
            view: Some(view),
            items: Vec::new(),
            subscriptions,
        };
        menu.rebuild();
        menu
    }

    pub fn handles(&self, signal: HostSignal) -> bool {
        self.view.is_some() && self.subscriptions.contains(signal)
    }

    pub fn handle_signal(&mut self, signal: HostSignal) {
        if self.handles(signal) {
            self.rebuild();
        }
    }

    /// Replace every menu item with the current favorites.
    pub fn rebuild(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        view.remove_all();

        self.items = self
            .host
            .favorites
            .favorites()
            .into_iter()
            .enumerate()
            .map(|(index, app)| FavoriteItem {
                index,
                name: app.name,
                icon: app
                    .icon
                    .filter(|icon| !icon.is_empty())
                    .unwrap_or_else(|| self.settings.fallback_icon_name.as_str().into()),
                icon_size: self.settings.icon_size,
            })
            .collect();

        for item in &self.items {
            view.add_item(item);
        }
        debug!("Favorites menu has {} items", self.items.len());
    }

    /// Launch a new instance of the favorite at `index`.
    pub fn activate(&self, index: usize) {
        if self.view.is_none() {
            return;
        }
        if index < self.host.favorites.favorites().len() {
            self.host.favorites.open_new_window(index);
        } else {
            warn!("Favorite {} no longer exists", index);
        }
    }

    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn destroy(&mut self) {
        self.subscriptions.release();
        if let Some(mut view) = self.view.take() {
            view.remove_all();
            view.destroy();
        }
        self.items.clear();
    }
}

impl Drop for FavoritesMenu {
    fn drop(&mut self) {
        self.destroy();
    }
}
