mod css;

pub use css::{load_css, PANEL_CSS};
