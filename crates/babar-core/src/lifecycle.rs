//! Startup and teardown of the whole bar.
//!
//! [`Extension::enable`] reads the settings once, alters the host panel and
//! builds the enabled components; [`Extension::disable`] undoes all of it in
//! reverse order, leaving no signal connection or view behind.

use std::rc::Rc;
use tracing::{debug, info};

use crate::bar::{BarAction, TaskBarSync};
use crate::config::BarSettings;
use crate::host::{ButtonAnchor, HostContext, HostSignal, PlacesLabel, SubscriptionSet};
use crate::menus::{AppGridLauncher, FavoritesMenu};

pub const REDUCED_PADDING_CLASS: &str = "leftbox-reduced-padding";
pub const RESTART_NOTICE: &str = "Please restart BaBar to apply changes.";
pub const PLACES_LABEL: &str = "Places";

/// Input coming back from the bar's views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarInput {
    Action(BarAction),
    Hover { anchor: ButtonAnchor, title: String },
    AppGrid,
    Favorite(usize),
}

/// Everything built by one `enable()`
struct Enabled {
    settings: Rc<BarSettings>,
    settings_subscription: SubscriptionSet,
    settings_notified: bool,
    app_grid: Option<AppGridLauncher>,
    places_subscription: Option<SubscriptionSet>,
    favorites: Option<FavoritesMenu>,
    tasks: Option<TaskBarSync>,
}

/// Owns the bar's components between `enable()` and `disable()`.
pub struct Extension {
    host: HostContext,
    load_settings: Box<dyn Fn() -> BarSettings>,
    enabled: Option<Enabled>,
}

impl Extension {
    pub fn new(host: HostContext, load_settings: impl Fn() -> BarSettings + 'static) -> Self {
        Self {
            host,
            load_settings: Box::new(load_settings),
            enabled: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.is_some()
    }

    /// Settings captured by the running instance
    pub fn settings(&self) -> Option<&BarSettings> {
        self.enabled.as_ref().map(|e| e.settings.as_ref())
    }

    pub fn enable(&mut self) {
        if self.enabled.is_some() {
            debug!("BaBar already enabled");
            return;
        }

        let settings = Rc::new((self.load_settings)());
        let host = &self.host;

        let mut settings_subscription = SubscriptionSet::new();
        settings_subscription.connect(&host.signals, HostSignal::SettingsChanged);

        if settings.reduce_padding {
            host.panel.add_style_class(REDUCED_PADDING_CLASS);
        }

        if !settings.display_activities {
            host.panel.set_activities_visible(false);
        }

        let app_grid = settings
            .display_app_grid
            .then(|| AppGridLauncher::new(&settings, host.clone()));

        let places_subscription = settings.display_places_icon.then(|| {
            Self::show_places_icon(host, &settings, true);
            let mut subscription = SubscriptionSet::new();
            subscription.connect(&host.signals, HostSignal::ExtensionStateChanged);
            subscription
        });

        let favorites = settings
            .display_favorites
            .then(|| FavoritesMenu::new(settings.clone(), host.clone()));

        let tasks = settings
            .display_tasks
            .then(|| TaskBarSync::new(settings.clone(), host.clone()));

        if !settings.display_app_menu {
            host.panel.set_app_menu_visible(false);
        }

        info!(
            "BaBar enabled (app grid: {}, favorites: {}, tasks: {})",
            app_grid.is_some(),
            favorites.is_some(),
            tasks.is_some()
        );

        self.enabled = Some(Enabled {
            settings,
            settings_subscription,
            settings_notified: false,
            app_grid,
            places_subscription,
            favorites,
            tasks,
        });
    }

    pub fn disable(&mut self) {
        let Some(mut enabled) = self.enabled.take() else {
            return;
        };
        let host = &self.host;
        let settings = enabled.settings.clone();

        if let Some(mut tasks) = enabled.tasks.take() {
            tasks.destroy();
        }
        if let Some(mut favorites) = enabled.favorites.take() {
            favorites.destroy();
        }
        if let Some(mut app_grid) = enabled.app_grid.take() {
            app_grid.destroy();
        }

        if settings.reduce_padding {
            host.panel.remove_style_class(REDUCED_PADDING_CLASS);
        }

        if let Some(mut subscription) = enabled.places_subscription.take() {
            Self::show_places_icon(host, &settings, false);
            subscription.release();
        }

        host.panel.set_activities_visible(!host.panel.is_session_locked());

        if !host.overview.is_visible() && !host.panel.is_session_locked() {
            host.panel.set_app_menu_visible(true);
        }

        enabled.settings_subscription.release();
        info!("BaBar disabled");
    }

    /// Swap the Places indicator's text label for an icon, or back.
    fn show_places_icon(host: &HostContext, settings: &BarSettings, show_icon: bool) {
        if !host.panel.has_places_indicator() {
            return;
        }
        let label = if show_icon {
            PlacesLabel::Icon(settings.places_icon_name.as_str().into())
        } else {
            PlacesLabel::Text(PLACES_LABEL.into())
        };
        host.panel.set_places_label(label);
    }

    /// Deliver a host signal to the components listening for it.
    pub fn handle_signal(&mut self, signal: HostSignal) {
        let Some(enabled) = self.enabled.as_mut() else {
            return;
        };

        match signal {
            HostSignal::SettingsChanged => {
                if enabled.settings_subscription.contains(signal) && !enabled.settings_notified {
                    enabled.settings_notified = true;
                    self.host.panel.notify(RESTART_NOTICE);
                }
            }
            HostSignal::ExtensionStateChanged => {
                if enabled.places_subscription.is_some() {
                    Self::show_places_icon(&self.host, &enabled.settings, true);
                }
            }
            HostSignal::FavoritesChanged => {
                if let Some(favorites) = enabled.favorites.as_mut() {
                    favorites.handle_signal(signal);
                }
            }
            HostSignal::WorkspaceNamesChanged
            | HostSignal::WorkspaceCountChanged
            | HostSignal::Restacked
            | HostSignal::WindowLeftMonitor => {
                if let Some(tasks) = enabled.tasks.as_mut() {
                    tasks.handle_signal(signal);
                }
            }
        }
    }

    /// Deliver input from one of the bar's views.
    pub fn handle_input(&self, input: BarInput) {
        match input {
            BarInput::Action(action) => self.handle_action(action),
            BarInput::Hover { anchor, title } => self.on_hover_change(anchor, &title),
            BarInput::AppGrid => self.activate_app_grid(),
            BarInput::Favorite(index) => self.activate_favorite(index),
        }
    }

    pub fn handle_action(&self, action: BarAction) {
        if let Some(tasks) = self.task_bar() {
            tasks.dispatch(action);
        }
    }

    pub fn on_hover_change(&self, anchor: ButtonAnchor, title: &str) {
        if let Some(tasks) = self.task_bar() {
            tasks.on_hover_change(anchor, title);
        }
    }

    pub fn activate_app_grid(&self) {
        if let Some(app_grid) = self.enabled.as_ref().and_then(|e| e.app_grid.as_ref()) {
            app_grid.activate();
        }
    }

    pub fn activate_favorite(&self, index: usize) {
        if let Some(favorites) = self.favorites() {
            favorites.activate(index);
        }
    }

    pub fn task_bar(&self) -> Option<&TaskBarSync> {
        self.enabled.as_ref().and_then(|e| e.tasks.as_ref())
    }

    pub fn favorites(&self) -> Option<&FavoritesMenu> {
        self.enabled.as_ref().and_then(|e| e.favorites.as_ref())
    }
}

impl Drop for Extension {
    fn drop(&mut self) {
        self.disable();
    }
}
