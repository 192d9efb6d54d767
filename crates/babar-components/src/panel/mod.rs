mod places;
mod widget;

pub use places::{user_places, Place, PlacesMenu};
pub use widget::PanelWindow;
