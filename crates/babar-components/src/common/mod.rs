mod layer_window;
mod message_bus;

pub use layer_window::{ExclusiveZone, LayerConfig, LayerMargins, LayerWindow};
pub use message_bus::MessageBus;
