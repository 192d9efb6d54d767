mod hyprland;
mod scheduler;
mod session;

pub use hyprland::HyprHost;
pub use scheduler::GlibScheduler;
pub use session::{session_locked, shell_quote};
