//! GTK4 layer-shell host for the BaBar workspace and task bar.

pub mod common;
pub mod host;
pub mod panel;
pub mod views;

pub use common::{LayerConfig, LayerWindow, MessageBus};
pub use host::{GlibScheduler, HyprHost};
pub use panel::PanelWindow;
pub use views::GtkViewFactory;
