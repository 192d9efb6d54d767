mod commands;
mod events;

pub use commands::BarCommand;
pub use events::BarEvent;
