mod index;
mod parser;

pub use index::AppIndex;
pub use parser::{application_dirs, parse_desktop_entry, parse_desktop_file, DesktopEntry};
