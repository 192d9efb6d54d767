//! In-memory host used by the unit tests.

use compact_str::CompactString;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::bar::BarModel;
use crate::menus::FavoriteItem;

/// A host command observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ActivateWindow(WindowId, u32),
    MinimizeWindow(WindowId),
    ActivateWorkspace(usize, u32),
    ShowOverview,
    HideOverview,
    ToggleOverview,
    ToggleAppGrid,
    OpenFavorite(usize),
}

/// What the views have been asked to display
#[derive(Debug, Default)]
pub struct ViewLog {
    pub live: Cell<usize>,
    pub bar_clears: Cell<usize>,
    pub bar: RefCell<Option<BarModel>>,
    pub menu_items: RefCell<Vec<FavoriteItem>>,
    pub placements: RefCell<Vec<&'static str>>,
    pub tooltip: RefCell<Option<(i32, i32, String)>>,
    pub tooltip_shows: Cell<usize>,
}

pub struct FakeHost {
    pub snapshot: RefCell<HostSnapshot>,
    pub overview_visible: Cell<bool>,
    pub icons: RefCell<BTreeMap<String, String>>,
    pub favorites: RefCell<Vec<AppInfo>>,
    pub names: RefCell<Vec<String>>,
    pub calls: RefCell<Vec<Call>>,
    pub time: Cell<u32>,

    pub activities_visible: Cell<bool>,
    pub app_menu_visible: Cell<bool>,
    pub style_classes: RefCell<Vec<String>>,
    pub places: Cell<bool>,
    pub places_label: RefCell<Option<PlacesLabel>>,
    pub locked: Cell<bool>,
    pub notices: RefCell<Vec<String>>,

    pub views: Rc<ViewLog>,
    pub registry: Rc<SignalRegistry>,
    pub scheduler: Rc<ManualScheduler>,
}

impl FakeHost {
    pub fn new(snapshot: HostSnapshot) -> Rc<Self> {
        Rc::new(Self {
            snapshot: RefCell::new(snapshot),
            overview_visible: Cell::new(false),
            icons: RefCell::new(BTreeMap::new()),
            favorites: RefCell::new(Vec::new()),
            names: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            time: Cell::new(1000),
            activities_visible: Cell::new(true),
            app_menu_visible: Cell::new(true),
            style_classes: RefCell::new(Vec::new()),
            places: Cell::new(false),
            places_label: RefCell::new(None),
            locked: Cell::new(false),
            notices: RefCell::new(Vec::new()),
            views: Rc::new(ViewLog::default()),
            registry: Rc::new(SignalRegistry::new()),
            scheduler: Rc::new(ManualScheduler::default()),
        })
    }

    pub fn context(self: &Rc<Self>) -> HostContext {
        HostContext {
            workspaces: self.clone(),
            windows: self.clone(),
            overview: self.clone(),
            apps: self.clone(),
            favorites: self.clone(),
            names: self.clone(),
            panel: self.clone(),
            views: self.clone(),
            signals: self.registry.clone(),
            scheduler: self.scheduler.clone(),
        }
    }

    pub fn set_snapshot(&self, snapshot: HostSnapshot) {
        *self.snapshot.borrow_mut() = snapshot;
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn rendered(&self) -> BarModel {
        self.views.bar.borrow().clone().unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl WorkspaceSource for FakeHost {
    fn count(&self) -> usize {
        self.snapshot.borrow().count()
    }

    fn active_index(&self) -> usize {
        self.snapshot.borrow().active_index()
    }

    fn windows_of(&self, index: usize) -> Vec<WindowInfo> {
        self.snapshot.borrow().windows_of(index)
    }
}

impl WindowControl for FakeHost {
    fn activate_window(&self, window: WindowId, timestamp: u32) {
        self.record(Call::ActivateWindow(window, timestamp));
    }

    fn minimize_window(&self, window: WindowId) {
        self.record(Call::MinimizeWindow(window));
    }

    fn activate_workspace(&self, index: usize, timestamp: u32) {
        self.record(Call::ActivateWorkspace(index, timestamp));
    }

    fn current_time(&self) -> u32 {
        self.time.get()
    }
}

impl Overview for FakeHost {
    fn is_visible(&self) -> bool {
        self.overview_visible.get()
    }

    fn show(&self) {
        self.overview_visible.set(true);
        self.record(Call::ShowOverview);
    }

    fn hide(&self) {
        self.overview_visible.set(false);
        self.record(Call::HideOverview);
    }

    fn toggle(&self) {
        self.overview_visible.set(!self.overview_visible.get());
        self.record(Call::ToggleOverview);
    }

    fn toggle_app_grid(&self) {
        self.record(Call::ToggleAppGrid);
    }
}

impl AppLookup for FakeHost {
    fn icon_for(&self, window: &WindowInfo) -> Option<CompactString> {
        let app = window.app_id.as_ref()?;
        self.icons.borrow().get(app.as_str()).map(|s| s.as_str().into())
    }
}

impl FavoritesSource for FakeHost {
    fn favorites(&self) -> Vec<AppInfo> {
        self.favorites.borrow().clone()
    }

    fn open_new_window(&self, index: usize) {
        self.record(Call::OpenFavorite(index));
    }
}

impl NameStore for FakeHost {
    fn workspace_names(&self) -> Vec<String> {
        self.names.borrow().clone()
    }
}

impl PanelHost for FakeHost {
    fn set_activities_visible(&self, visible: bool) {
        self.activities_visible.set(visible);
    }

    fn set_app_menu_visible(&self, visible: bool) {
        self.app_menu_visible.set(visible);
    }

    fn add_style_class(&self, class: &str) {
        self.style_classes.borrow_mut().push(class.to_string());
    }

    fn remove_style_class(&self, class: &str) {
        self.style_classes.borrow_mut().retain(|c| c != class);
    }

    fn has_places_indicator(&self) -> bool {
        self.places.get()
    }

    fn set_places_label(&self, label: PlacesLabel) {
        *self.places_label.borrow_mut() = Some(label);
    }

    fn is_session_locked(&self) -> bool {
        self.locked.get()
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}

struct FakeLauncher(Rc<ViewLog>, bool);

impl LauncherView for FakeLauncher {
    fn destroy(&mut self) {
        if !self.1 {
            self.1 = true;
            self.0.live.set(self.0.live.get() - 1);
        }
    }
}

struct FakeMenu(Rc<ViewLog>, bool);

impl MenuView for FakeMenu {
    fn remove_all(&mut self) {
        self.0.menu_items.borrow_mut().clear();
    }

    fn add_item(&mut self, item: &FavoriteItem) {
        self.0.menu_items.borrow_mut().push(item.clone());
    }

    fn destroy(&mut self) {
        if !self.1 {
            self.1 = true;
            self.0.menu_items.borrow_mut().clear();
            self.0.live.set(self.0.live.get() - 1);
        }
    }
}

struct FakeBar(Rc<ViewLog>, bool);

impl BarView for FakeBar {
    fn clear(&mut self) {
        self.0.bar_clears.set(self.0.bar_clears.get() + 1);
        *self.0.bar.borrow_mut() = None;
    }

    fn render(&mut self, model: &BarModel) {
        *self.0.bar.borrow_mut() = Some(model.clone());
    }

    fn destroy(&mut self) {
        if !self.1 {
            self.1 = true;
            *self.0.bar.borrow_mut() = None;
            self.0.live.set(self.0.live.get() - 1);
        }
    }
}

struct FakeTooltip(Rc<ViewLog>, bool);

impl TooltipView for FakeTooltip {
    fn show_at(&mut self, x: i32, y: i32, text: &str) {
        self.0.tooltip_shows.set(self.0.tooltip_shows.get() + 1);
        *self.0.tooltip.borrow_mut() = Some((x, y, text.to_string()));
    }

    fn hide(&mut self) {
        *self.0.tooltip.borrow_mut() = None;
    }

    fn destroy(&mut self) {
        if !self.1 {
            self.1 = true;
            *self.0.tooltip.borrow_mut() = None;
            self.0.live.set(self.0.live.get() - 1);
        }
    }
}

impl FakeHost {
    fn created(&self, key: &'static str) -> Rc<ViewLog> {
        self.views.live.set(self.views.live.get() + 1);
        self.views.placements.borrow_mut().push(key);
        self.views.clone()
    }
}

impl ViewFactory for FakeHost {
    fn app_grid_button(&self, placement: StatusPlacement, _icon: &str) -> Box<dyn LauncherView> {
        Box::new(FakeLauncher(self.created(placement.key), false))
    }

    fn favorites_menu(&self, placement: StatusPlacement, _icon: &str) -> Box<dyn MenuView> {
        Box::new(FakeMenu(self.created(placement.key), false))
    }

    fn task_bar(&self, placement: StatusPlacement) -> Box<dyn BarView> {
        Box::new(FakeBar(self.created(placement.key), false))
    }

    fn tooltip(&self) -> Box<dyn TooltipView> {
        Box::new(FakeTooltip(self.created("tooltip"), false))
    }
}

/// Scheduler whose timers only fire when a test says so
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    pending: RefCell<Vec<(TimerId, Duration, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn pending_delays(&self) -> Vec<Duration> {
        self.pending.borrow().iter().map(|(_, d, _)| *d).collect()
    }

    /// Fire every pending timer
    pub fn fire_all(&self) {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        for (_, _, callback) in due {
            callback();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.pending.borrow_mut().push((id, delay, callback));
        id
    }

    fn cancel(&self, id: TimerId) {
        self.pending.borrow_mut().retain(|(pending, _, _)| *pending != id);
    }
}
