use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow};
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use tracing::debug;

/// Layer shell window configuration
#[derive(Debug, Clone)]
pub struct LayerConfig {
    pub layer: Layer,
    pub anchors: Vec<Edge>,
    pub exclusive_zone: ExclusiveZone,
    pub keyboard_mode: KeyboardMode,
    pub margins: LayerMargins,
    /// Namespace for the surface
    pub namespace: String,
    /// Requested height, -1 for natural size
    pub height: i32,
}

/// Exclusive zone configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusiveZone {
    /// Auto-calculate based on window size
    Auto,
    None,
}

/// Margins for layer shell window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerMargins {
    pub top: i32,
    pub left: i32,
}

impl LayerConfig {
    /// Full-width bar along the top edge
    pub fn panel(height: i32) -> Self {
        Self {
            layer: Layer::Top,
            anchors: vec![Edge::Top, Edge::Left, Edge::Right],
            exclusive_zone: ExclusiveZone::Auto,
            keyboard_mode: KeyboardMode::None,
            margins: LayerMargins::default(),
            namespace: "babar-panel".to_string(),
            height,
        }
    }

    /// Popup positioned by its top/left margins
    pub fn tooltip() -> Self {
        Self {
            layer: Layer::Overlay,
            anchors: vec![Edge::Top, Edge::Left],
            exclusive_zone: ExclusiveZone::None,
            keyboard_mode: KeyboardMode::None,
            margins: LayerMargins::default(),
            namespace: "babar-tooltip".to_string(),
            height: -1,
        }
    }
}

/// Wrapper for layer-shell enabled windows
pub struct LayerWindow {
    window: ApplicationWindow,
}

impl LayerWindow {
    pub fn new(app: &Application, config: LayerConfig) -> Self {
        let window = ApplicationWindow::builder()
            .application(app)
            .decorated(false)
            .default_height(config.height)
            .build();

        window.init_layer_shell();
        window.set_layer(config.layer);

        for edge in &config.anchors {
            window.set_anchor(*edge, true);
        }

        match config.exclusive_zone {
            ExclusiveZone::Auto => window.auto_exclusive_zone_enable(),
            ExclusiveZone::None => window.set_exclusive_zone(-1),
        }

        window.set_keyboard_mode(config.keyboard_mode);
        window.set_namespace(&config.namespace);

        let layer_window = Self { window };
        layer_window.set_margins(config.margins);

        debug!(
            "Created layer window: layer={:?}, anchors={:?}, namespace={}",
            config.layer, config.anchors, config.namespace
        );

        layer_window
    }

    pub fn window(&self) -> &ApplicationWindow {
        &self.window
    }

    pub fn set_child(&self, child: Option<&impl IsA<gtk4::Widget>>) {
        self.window.set_child(child);
    }

    pub fn present(&self) {
        self.window.present();
    }

    pub fn hide(&self) {
        self.window.set_visible(false);
    }

    pub fn close(&self) {
        self.window.close();
    }

    /// Move the surface relative to its top-left anchor
    pub fn set_margins(&self, margins: LayerMargins) {
        self.window.set_margin(Edge::Top, margins.top);
        self.window.set_margin(Edge::Left, margins.left);
    }
}

impl std::ops::Deref for LayerWindow {
    type Target = ApplicationWindow;

    fn deref(&self) -> &Self::Target {
        &self.window
    }
}
