use gtk4::gdk::Display;
use gtk4::CssProvider;
use tracing::debug;

/// Stylesheet for the panel, the bar and its tooltip
pub const PANEL_CSS: &str = r#"
/* ========== Panel ========== */

window.babar-panel {
    background-color: rgba(20, 20, 20, 0.85);
}

.panel-container {
    padding: 0 6px;
}

.panel-leftbox {
    padding: 0 8px;
}

.panel-leftbox.leftbox-reduced-padding {
    padding: 0 2px;
}

.panel-leftbox.leftbox-reduced-padding > * {
    margin: 0 1px;
}

.panel-button {
    background: transparent;
    border: none;
    border-radius: 6px;
    padding: 2px 8px;
    color: rgba(255, 255, 255, 0.9);
}

.panel-button:hover {
    background: rgba(255, 255, 255, 0.12);
}

.app-menu-label {
    font-weight: bold;
    padding: 0 8px;
}

/* ========== Workspace indicators ========== */

.workspace-active-rounded,
.workspace-inactive-rounded,
.workspace-active-squared,
.workspace-inactive-squared {
    min-width: 18px;
    min-height: 18px;
    padding: 0 4px;
    margin: 0 2px;
    border: 1px solid rgba(255, 255, 255, 0.4);
    font-size: 11px;
    font-weight: bold;
    color: rgba(255, 255, 255, 0.85);
    background: transparent;
}

.workspace-active-rounded,
.workspace-inactive-rounded {
    border-radius: 9px;
}

.workspace-active-squared,
.workspace-inactive-squared {
    border-radius: 2px;
}

.workspace-active-rounded,
.workspace-active-squared {
    background: rgba(255, 255, 255, 0.85);
    color: rgba(0, 0, 0, 0.9);
}

.workspace-inactive-rounded:hover,
.workspace-inactive-squared:hover {
    background: rgba(255, 255, 255, 0.2);
}

/* ========== Window buttons ========== */

.window-focused,
.window-unfocused,
.window-hidden {
    background: transparent;
    border: none;
    border-radius: 4px;
    padding: 1px 3px;
    margin: 0 1px;
}

.window-focused {
    background: rgba(255, 255, 255, 0.15);
    border-bottom: 2px solid rgba(255, 255, 255, 0.8);
}

.window-unfocused:hover,
.window-hidden:hover {
    background: rgba(255, 255, 255, 0.1);
}

.window-desaturated image {
    -gtk-icon-filter: grayscale(1);
}

/* ========== Tooltip ========== */

window.babar-tooltip {
    background: transparent;
}

.window-tooltip {
    background: rgba(30, 30, 30, 0.95);
    border: 1px solid rgba(255, 255, 255, 0.15);
    border-radius: 6px;
    padding: 4px 10px;
    color: white;
}

/* ========== Menus ========== */

.favorites-menu-item {
    padding: 4px 8px;
    border-radius: 4px;
}

.favorites-menu-item:hover {
    background: rgba(255, 255, 255, 0.1);
}

.places-menu-item {
    padding: 4px 8px;
}
"#;

/// Load and apply the panel CSS theme
pub fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_data(PANEL_CSS);

    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        debug!("CSS theme loaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::{IndicatorStyle, WindowState};
    use crate::lifecycle::REDUCED_PADDING_CLASS;

    #[test]
    fn test_every_model_class_is_styled() {
        let mut classes = vec![REDUCED_PADDING_CLASS];
        for active in [true, false] {
            for rounded in [true, false] {
                classes.push(IndicatorStyle::new(active, rounded).css_class());
            }
        }
        for state in [WindowState::Hidden, WindowState::Focused, WindowState::Unfocused] {
            classes.push(state.css_class());
        }
        for class in classes {
            assert!(PANEL_CSS.contains(&format!(".{class}")), "missing {class}");
        }
    }
}
