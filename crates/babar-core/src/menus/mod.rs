mod app_grid;
mod favorites;

pub use app_grid::{AppGridLauncher, APP_GRID_PLACEMENT};
pub use favorites::{FavoriteItem, FavoritesMenu, FAVORITES_PLACEMENT};
