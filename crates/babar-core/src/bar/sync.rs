use smallvec::SmallVec;
use std::rc::Rc;
use tracing::{debug, trace};

use crate::config::{BarSettings, WorkspaceNames};
use crate::host::{
    BarView, ButtonAnchor, HostContext, HostSignal, PanelSide, StatusPlacement, SubscriptionSet,
    WindowId, WindowInfo, WindowType,
};

use super::model::{BarAction, BarModel, IndicatorStyle, WindowButton, WorkspaceGroup, WorkspaceIndicator};
use super::tooltip::TooltipController;

/// Status-area slot of the workspace/task bar
pub const TASK_BAR_PLACEMENT: StatusPlacement = StatusPlacement {
    key: "babar-workspaces-bar",
    priority: 4,
    side: PanelSide::Left,
};

const SIGNALS: [HostSignal; 4] = [
    HostSignal::WorkspaceNamesChanged,
    HostSignal::WorkspaceCountChanged,
    HostSignal::Restacked,
    HostSignal::WindowLeftMonitor,
];

/// Keeps the workspace/task bar in step with the host.
///
/// Every qualifying host signal throws the whole widget tree away and builds
/// it again from a fresh query; nothing about workspaces or windows is kept
/// between rebuilds except the workspace name overrides.
pub struct TaskBarSync {
    settings: Rc<BarSettings>,
    host: HostContext,
    view: Box<dyn BarView>,
    tooltip: TooltipController,
    names: WorkspaceNames,
    model: BarModel,
    subscriptions: SubscriptionSet,
    destroyed: bool,
}

impl TaskBarSync {
    pub fn new(settings: Rc<BarSettings>, host: HostContext) -> Self {
        let mut subscriptions = SubscriptionSet::new();
        for signal in SIGNALS {
            subscriptions.connect(&host.signals, signal);
        }

        let view = host.views.task_bar(TASK_BAR_PLACEMENT);
        let tooltip = TooltipController::new(&settings, &host);

        let mut bar = Self {
            settings,
            host,
            view,
            tooltip,
            names: WorkspaceNames::default(),
            model: BarModel::default(),
            subscriptions,
            destroyed: false,
        };
        bar.refresh_names();
        bar
    }

    /// Whether this bar reacts to `signal`
    pub fn handles(&self, signal: HostSignal) -> bool {
        !self.destroyed && self.subscriptions.contains(signal)
    }

    pub fn handle_signal(&mut self, signal: HostSignal) {
        if !self.handles(signal) {
            return;
        }
        match signal {
            HostSignal::WorkspaceNamesChanged => self.refresh_names(),
            _ => self.rebuild(),
        }
    }

    /// Re-read the name overrides and rebuild.
    pub fn refresh_names(&mut self) {
        self.names = WorkspaceNames::new(self.host.names.workspace_names());
        self.rebuild();
    }

    /// Destroy the current widget tree and build it again from host state.
    pub fn rebuild(&mut self) {
        if self.destroyed {
            return;
        }
        self.view.clear();
        self.model = self.build_model();
        self.view.render(&self.model);
        debug!(
            "Rebuilt bar: {} workspaces, {} windows",
            self.model.indicator_count(),
            self.model.button_count()
        );
    }

    /// Compute the bar for the current host state.
    pub fn build_model(&self) -> BarModel {
        let workspaces = &self.host.workspaces;
        let count = workspaces.count();
        let active = workspaces.active_index();

        let groups = (0..count)
            .map(|index| WorkspaceGroup {
                indicator: WorkspaceIndicator {
                    index,
                    label: self.names.label_for(index),
                    style: IndicatorStyle::new(index == active, self.settings.rounded_workspaces_buttons),
                    action: BarAction::ToggleWorkspace(index),
                },
                buttons: self.buttons_for(index),
            })
            .collect();

        BarModel {
            groups,
            show_indicators: self.settings.display_workspaces,
        }
    }

    fn buttons_for(&self, index: usize) -> SmallVec<[WindowButton; 8]> {
        let mut windows = self.host.workspaces.windows_of(index);
        windows.sort_by_key(|w| w.id);

        let mut buttons = SmallVec::new();
        let mut pinned = 0;
        for window in windows.iter().filter(|w| w.window_type != WindowType::DropdownMenu) {
            if window.on_all_workspaces {
                // drawn once, in front of workspace 0's group
                if index != 0 {
                    continue;
                }
                buttons.insert(pinned, self.button(index, window));
                pinned += 1;
            } else {
                buttons.push(self.button(index, window));
            }
        }
        buttons
    }

    fn button(&self, index: usize, window: &WindowInfo) -> WindowButton {
        let icon = self.host.apps.icon_for(window);
        if icon.is_none() {
            trace!("No icon for window {}, using fallback", window.id);
        }
        WindowButton::new(index, window, icon, &self.settings)
    }

    /// Peek at the current workspace, or switch to another one and show the
    /// overview.
    pub fn toggle_workspace(&self, index: usize) {
        let overview = &self.host.overview;
        if index == self.host.workspaces.active_index() {
            overview.toggle();
        } else {
            let now = self.host.windows.current_time();
            self.host.windows.activate_workspace(index, now);
            overview.show();
        }
    }

    /// Minimize the focused window, or bring another one (and its workspace)
    /// forward.
    pub fn toggle_window(&self, workspace: usize, window: WindowId) {
        let Some(info) = self
            .host
            .workspaces
            .windows_of(workspace)
            .into_iter()
            .find(|w| w.id == window)
        else {
            debug!("Window {} is gone from workspace {}", window, workspace);
            return;
        };

        let windows = &self.host.windows;
        let overview = &self.host.overview;
        // pinned buttons are bound to index 0
        let on_active = workspace == self.host.workspaces.active_index();

        if on_active && info.focused && !overview.is_visible() {
            windows.minimize_window(window);
        } else {
            windows.activate_window(window, windows.current_time());
        }
        if overview.is_visible() {
            overview.hide();
        }
        if !info.on_all_workspaces {
            windows.activate_workspace(workspace, windows.current_time());
        }
    }

    pub fn dispatch(&self, action: BarAction) {
        if self.destroyed {
            return;
        }
        match action {
            BarAction::ToggleWorkspace(index) => self.toggle_workspace(index),
            BarAction::ToggleWindow { workspace, window } => self.toggle_window(workspace, window),
        }
    }

    pub fn on_hover_change(&self, anchor: ButtonAnchor, title: &str) {
        if !self.destroyed {
            self.tooltip.on_hover_change(anchor, title);
        }
    }

    pub fn model(&self) -> &BarModel {
        &self.model
    }

    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    /// Disconnect every signal, cancel the tooltip timer and destroy all
    /// widgets.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.subscriptions.release();
        self.tooltip.destroy();
        self.view.clear();
        self.view.destroy();
        self.model = BarModel::default();
    }
}

impl Drop for TaskBarSync {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::WindowState;
    use crate::host::fake::{Call, FakeHost};
    use crate::host::{HostSnapshot, WorkspaceSource};
    use std::rc::Rc;

    fn bar_for(host: &Rc<FakeHost>) -> TaskBarSync {
        TaskBarSync::new(Rc::new(BarSettings::default()), host.context())
    }

    fn ids(model: &BarModel, index: usize) -> Vec<u64> {
        model.groups[index].buttons.iter().map(|b| b.window.0).collect()
    }

    #[test]
    fn test_one_indicator_per_workspace() {
        for count in 1..6 {
            let host = FakeHost::new(HostSnapshot::new(count, 0));
            let bar = bar_for(&host);
            assert_eq!(bar.model().indicator_count(), count);
            assert_eq!(host.rendered().indicator_count(), count);
        }
    }

    #[test]
    fn test_labels_use_overrides_then_numbers() {
        let host = FakeHost::new(HostSnapshot::new(3, 0));
        *host.names.borrow_mut() = vec!["Mail".into(), "".into()];
        let bar = bar_for(&host);
        let labels: Vec<_> = bar.model().groups.iter().map(|g| g.indicator.label.to_string()).collect();
        assert_eq!(labels, vec!["Mail", "2", "3"]);
    }

    #[test]
    fn test_names_refresh_on_signal() {
        let host = FakeHost::new(HostSnapshot::new(2, 0));
        let mut bar = bar_for(&host);
        assert_eq!(bar.model().groups[1].indicator.label, "2");

        *host.names.borrow_mut() = vec!["One".into(), "Two".into()];
        bar.handle_signal(HostSignal::WorkspaceNamesChanged);
        assert_eq!(bar.model().groups[1].indicator.label, "Two");
    }

    #[test]
    fn test_active_and_shape_select_style() {
        let host = FakeHost::new(HostSnapshot::new(3, 1));
        let bar = bar_for(&host);
        let styles: Vec<_> = bar.model().groups.iter().map(|g| g.indicator.style).collect();
        assert_eq!(
            styles,
            vec![
                IndicatorStyle::InactiveRounded,
                IndicatorStyle::ActiveRounded,
                IndicatorStyle::InactiveRounded,
            ]
        );

        let squared = BarSettings {
            rounded_workspaces_buttons: false,
            ..Default::default()
        };
        let bar = TaskBarSync::new(Rc::new(squared), host.context());
        assert_eq!(bar.model().groups[1].indicator.style, IndicatorStyle::ActiveSquared);
        assert_eq!(bar.model().groups[0].indicator.style, IndicatorStyle::InactiveSquared);
        assert_eq!(bar.model().active_index(), Some(1));
    }

    #[test]
    fn test_buttons_sorted_by_creation_id() {
        let snapshot = HostSnapshot::new(2, 0)
            .with_window(WindowInfo::new(42, 1))
            .with_window(WindowInfo::new(7, 1))
            .with_window(WindowInfo::new(19, 1))
            .with_window(WindowInfo::new(3, 0));
        let host = FakeHost::new(snapshot);
        let bar = bar_for(&host);
        assert_eq!(ids(bar.model(), 0), vec![3]);
        assert_eq!(ids(bar.model(), 1), vec![7, 19, 42]);
    }

    #[test]
    fn test_dropdown_menus_are_skipped() {
        let snapshot = HostSnapshot::new(1, 0)
            .with_window(WindowInfo::new(1, 0))
            .with_window(WindowInfo::new(2, 0).with_type(WindowType::DropdownMenu))
            .with_window(WindowInfo::new(3, 0).with_type(WindowType::Dialog));
        let host = FakeHost::new(snapshot);
        let bar = bar_for(&host);
        assert_eq!(ids(bar.model(), 0), vec![1, 3]);
    }

    #[test]
    fn test_pinned_window_drawn_once_at_front_of_first_group() {
        let snapshot = HostSnapshot::new(3, 2)
            .with_window(WindowInfo::new(1, 0))
            .with_window(WindowInfo::new(2, 2))
            .with_window(WindowInfo::pinned(9))
            .with_window(WindowInfo::pinned(5));
        let host = FakeHost::new(snapshot);
        let bar = bar_for(&host);

        let model = bar.model();
        assert_eq!(ids(model, 0), vec![5, 9, 1]);
        assert_eq!(ids(model, 1), Vec::<u64>::new());
        assert_eq!(ids(model, 2), vec![2]);
        assert_eq!(model.buttons().filter(|b| b.window == WindowId(9)).count(), 1);
    }

    #[test]
    fn test_button_state_and_icon() {
        let snapshot = HostSnapshot::new(1, 0)
            .with_window(WindowInfo::new(1, 0).hidden().focused())
            .with_window(WindowInfo::new(2, 0).focused().with_app("firefox"))
            .with_window(WindowInfo::new(3, 0).with_app("unknown"));
        let host = FakeHost::new(snapshot);
        host.icons.borrow_mut().insert("firefox".into(), "firefox".into());
        let bar = bar_for(&host);

        let states: Vec<_> = bar.model().buttons().map(|b| b.state).collect();
        assert_eq!(states, vec![WindowState::Hidden, WindowState::Focused, WindowState::Unfocused]);

        let icons: Vec<_> = bar.model().buttons().map(|b| (b.icon.to_string(), b.icon_is_fallback)).collect();
        assert_eq!(icons[1], ("firefox".to_string(), false));
        assert_eq!(icons[2], ("applications-system-symbolic".to_string(), true));
    }

    #[test]
    fn test_rebuild_is_idempotent_and_clears_first() {
        let snapshot = HostSnapshot::new(2, 1)
            .with_window(WindowInfo::new(4, 1).with_title("a"))
            .with_window(WindowInfo::pinned(2).with_title("b"));
        let host = FakeHost::new(snapshot);
        let mut bar = bar_for(&host);

        let first = bar.model().clone();
        let clears = host.views.bar_clears.get();
        bar.handle_signal(HostSignal::Restacked);
        assert_eq!(bar.model(), &first);
        assert_eq!(host.rendered(), first);
        assert_eq!(host.views.bar_clears.get(), clears + 1);
    }

    #[test]
    fn test_host_changes_picked_up_on_signal() {
        let host = FakeHost::new(HostSnapshot::new(1, 0));
        let mut bar = bar_for(&host);
        assert_eq!(bar.model().indicator_count(), 1);

        host.set_snapshot(HostSnapshot::new(4, 3).with_window(WindowInfo::new(1, 3)));
        bar.handle_signal(HostSignal::WorkspaceCountChanged);
        assert_eq!(bar.model().indicator_count(), 4);
        assert_eq!(ids(bar.model(), 3), vec![1]);
    }

    #[test]
    fn test_hidden_indicators_flag_follows_settings() {
        let host = FakeHost::new(HostSnapshot::new(2, 0));
        let settings = BarSettings {
            display_workspaces: false,
            ..Default::default()
        };
        let bar = TaskBarSync::new(Rc::new(settings), host.context());
        assert!(!bar.model().show_indicators);
        assert_eq!(bar.model().indicator_count(), 2);
    }

    #[test]
    fn test_toggle_current_workspace_toggles_overview() {
        let host = FakeHost::new(HostSnapshot::new(2, 0));
        let bar = bar_for(&host);

        bar.toggle_workspace(0);
        assert!(host.overview_visible.get());
        assert_eq!(host.take_calls(), vec![Call::ToggleOverview]);

        bar.toggle_workspace(0);
        assert!(!host.overview_visible.get());
    }

    #[test]
    fn test_toggle_other_workspace_switches_and_shows_overview() {
        let host = FakeHost::new(HostSnapshot::new(2, 0));
        let bar = bar_for(&host);

        bar.dispatch(BarAction::ToggleWorkspace(1));
        assert!(host.overview_visible.get());
        assert_eq!(
            host.take_calls(),
            vec![Call::ActivateWorkspace(1, 1000), Call::ShowOverview]
        );
    }

    #[test]
    fn test_toggle_focused_window_minimizes() {
        let host = FakeHost::new(HostSnapshot::new(2, 0).with_window(WindowInfo::new(1, 0).focused()));
        let bar = bar_for(&host);

        bar.toggle_window(0, WindowId(1));
        assert_eq!(
            host.take_calls(),
            vec![Call::MinimizeWindow(WindowId(1)), Call::ActivateWorkspace(0, 1000)]
        );
    }

    #[test]
    fn test_toggle_focused_window_with_overview_activates() {
        let host = FakeHost::new(HostSnapshot::new(2, 0).with_window(WindowInfo::new(1, 0).focused()));
        host.overview_visible.set(true);
        let bar = bar_for(&host);

        bar.toggle_window(0, WindowId(1));
        assert!(!host.overview_visible.get());
        assert_eq!(
            host.take_calls(),
            vec![
                Call::ActivateWindow(WindowId(1), 1000),
                Call::HideOverview,
                Call::ActivateWorkspace(0, 1000),
            ]
        );
    }

    #[test]
    fn test_toggle_window_on_other_workspace_switches_to_it() {
        let host = FakeHost::new(HostSnapshot::new(2, 0).with_window(WindowInfo::new(1, 1).focused()));
        let bar = bar_for(&host);

        bar.dispatch(BarAction::ToggleWindow {
            workspace: 1,
            window: WindowId(1),
        });
        assert_eq!(
            host.take_calls(),
            vec![Call::ActivateWindow(WindowId(1), 1000), Call::ActivateWorkspace(1, 1000)]
        );
    }

    #[test]
    fn test_toggle_pinned_window_keeps_workspace() {
        let host = FakeHost::new(HostSnapshot::new(2, 1).with_window(WindowInfo::pinned(3)));
        let bar = bar_for(&host);

        bar.toggle_window(0, WindowId(3));
        assert_eq!(host.take_calls(), vec![Call::ActivateWindow(WindowId(3), 1000)]);
    }

    #[test]
    fn test_focused_pinned_window_minimizes_only_from_first_workspace() {
        let host = FakeHost::new(HostSnapshot::new(3, 2).with_window(WindowInfo::pinned(3).focused()));
        let bar = bar_for(&host);

        bar.toggle_window(0, WindowId(3));
        assert_eq!(host.take_calls(), vec![Call::ActivateWindow(WindowId(3), 1000)]);

        host.set_snapshot(HostSnapshot::new(3, 0).with_window(WindowInfo::pinned(3).focused()));
        bar.toggle_window(0, WindowId(3));
        assert_eq!(host.take_calls(), vec![Call::MinimizeWindow(WindowId(3))]);
    }

    #[test]
    fn test_toggle_vanished_window_is_ignored() {
        let host = FakeHost::new(HostSnapshot::new(1, 0));
        let bar = bar_for(&host);
        bar.toggle_window(0, WindowId(77));
        assert!(host.take_calls().is_empty());
    }

    #[test]
    fn test_destroy_releases_everything() {
        let host = FakeHost::new(HostSnapshot::new(2, 0).with_window(WindowInfo::new(1, 0).with_title("t")));
        let mut bar = bar_for(&host);
        bar.on_hover_change(ButtonAnchor { x: 5, hovered: true }, "t");
        assert_eq!(host.registry.connection_count(), 4);
        assert_eq!(host.views.live.get(), 2);
        assert_eq!(host.scheduler.pending_count(), 1);

        bar.destroy();
        assert_eq!(host.registry.connection_count(), 0);
        assert_eq!(host.views.live.get(), 0);
        assert_eq!(host.scheduler.pending_count(), 0);
        assert!(!bar.handles(HostSignal::Restacked));

        // signals after teardown do nothing
        bar.handle_signal(HostSignal::Restacked);
        assert!(host.rendered().groups.is_empty());
        drop(bar);
        assert_eq!(host.registry.connection_count(), 0);
    }

    #[test]
    fn test_host_source_matches_snapshot() {
        let host = FakeHost::new(HostSnapshot::new(3, 2));
        assert_eq!(host.count(), 3);
        assert_eq!(host.active_index(), 2);
    }
}
