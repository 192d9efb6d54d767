use compact_str::CompactString;
use smallvec::SmallVec;

use crate::config::BarSettings;
use crate::host::{WindowId, WindowInfo};

/// What a click on a bar widget does, bound when the widget is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarAction {
    ToggleWorkspace(usize),
    ToggleWindow { workspace: usize, window: WindowId },
}

/// Style variant of a workspace indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    ActiveRounded,
    InactiveRounded,
    ActiveSquared,
    InactiveSquared,
}

impl IndicatorStyle {
    pub fn new(active: bool, rounded: bool) -> Self {
        match (active, rounded) {
            (true, true) => Self::ActiveRounded,
            (false, true) => Self::InactiveRounded,
            (true, false) => Self::ActiveSquared,
            (false, false) => Self::InactiveSquared,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::ActiveRounded => "workspace-active-rounded",
            Self::InactiveRounded => "workspace-inactive-rounded",
            Self::ActiveSquared => "workspace-active-squared",
            Self::InactiveSquared => "workspace-inactive-squared",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::ActiveRounded | Self::ActiveSquared)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceIndicator {
    pub index: usize,
    pub label: CompactString,
    pub style: IndicatorStyle,
    pub action: BarAction,
}

/// Visual state of a window button, derived from the window's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Hidden,
    Focused,
    Unfocused,
}

impl WindowState {
    /// Hidden wins over focused, focused over unfocused.
    pub fn of(window: &WindowInfo) -> Self {
        if window.hidden {
            Self::Hidden
        } else if window.focused {
            Self::Focused
        } else {
            Self::Unfocused
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Hidden => "window-hidden",
            Self::Focused => "window-focused",
            Self::Unfocused => "window-unfocused",
        }
    }

    pub fn opacity(&self, settings: &BarSettings) -> u8 {
        match self {
            Self::Hidden => settings.hidden_opacity,
            Self::Focused => settings.focused_opacity,
            Self::Unfocused => settings.unfocused_opacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowButton {
    pub window: WindowId,
    pub workspace: usize,
    pub title: CompactString,
    pub icon: CompactString,
    pub icon_is_fallback: bool,
    pub icon_size: i32,
    pub state: WindowState,
    pub opacity: u8,
    pub desaturate: bool,
    pub action: BarAction,
}

impl WindowButton {
    pub fn new(workspace: usize, window: &WindowInfo, icon: Option<CompactString>, settings: &BarSettings) -> Self {
        let state = WindowState::of(window);
        let (icon, icon_is_fallback) = match icon.filter(|name| !name.is_empty()) {
            Some(name) => (name, false),
            None => (settings.fallback_icon_name.as_str().into(), true),
        };

        Self {
            window: window.id,
            workspace,
            title: window.title.clone(),
            icon,
            icon_is_fallback,
            icon_size: settings.icon_size,
            state,
            opacity: state.opacity(settings),
            desaturate: settings.desaturate_icons,
            action: BarAction::ToggleWindow {
                workspace,
                window: window.id,
            },
        }
    }
}

/// One workspace indicator and the buttons of its windows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceGroup {
    pub indicator: WorkspaceIndicator,
    pub buttons: SmallVec<[WindowButton; 8]>,
}

/// The whole bar, as rendered by one rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarModel {
    pub groups: Vec<WorkspaceGroup>,
    pub show_indicators: bool,
}

impl BarModel {
    pub fn indicator_count(&self) -> usize {
        self.groups.len()
    }

    pub fn button_count(&self) -> usize {
        self.groups.iter().map(|g| g.buttons.len()).sum()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &WindowButton> {
        self.groups.iter().flat_map(|g| g.buttons.iter())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.groups
            .iter()
            .find(|g| g.indicator.style.is_active())
            .map(|g| g.indicator.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_state_priority() {
        let base = WindowInfo::new(1, 0);
        assert_eq!(WindowState::of(&base), WindowState::Unfocused);
        assert_eq!(WindowState::of(&base.clone().focused()), WindowState::Focused);
        assert_eq!(WindowState::of(&base.clone().hidden()), WindowState::Hidden);
        assert_eq!(WindowState::of(&base.hidden().focused()), WindowState::Hidden);
    }

    #[test]
    fn test_indicator_styles_are_exclusive() {
        let classes: Vec<_> = [(true, true), (false, true), (true, false), (false, false)]
            .into_iter()
            .map(|(active, rounded)| IndicatorStyle::new(active, rounded).css_class())
            .collect();
        assert_eq!(
            classes,
            vec![
                "workspace-active-rounded",
                "workspace-inactive-rounded",
                "workspace-active-squared",
                "workspace-inactive-squared",
            ]
        );
    }

    #[test]
    fn test_button_uses_fallback_for_missing_or_empty_icon() {
        let settings = BarSettings::default();
        let window = WindowInfo::new(1, 0);

        let missing = WindowButton::new(0, &window, None, &settings);
        assert!(missing.icon_is_fallback);
        assert_eq!(missing.icon, settings.fallback_icon_name);

        let empty = WindowButton::new(0, &window, Some("".into()), &settings);
        assert!(empty.icon_is_fallback);

        let found = WindowButton::new(0, &window, Some("firefox".into()), &settings);
        assert!(!found.icon_is_fallback);
        assert_eq!(found.icon, "firefox");
    }

    #[test]
    fn test_button_opacity_follows_state() {
        let settings = BarSettings {
            hidden_opacity: 10,
            focused_opacity: 20,
            unfocused_opacity: 30,
            ..Default::default()
        };
        let hidden = WindowButton::new(0, &WindowInfo::new(1, 0).hidden(), None, &settings);
        let focused = WindowButton::new(0, &WindowInfo::new(2, 0).focused(), None, &settings);
        let other = WindowButton::new(0, &WindowInfo::new(3, 0), None, &settings);
        assert_eq!((hidden.state, hidden.opacity), (WindowState::Hidden, 10));
        assert_eq!((focused.state, focused.opacity), (WindowState::Focused, 20));
        assert_eq!((other.state, other.opacity), (WindowState::Unfocused, 30));
    }
}
