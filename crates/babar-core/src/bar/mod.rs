mod model;
mod sync;
mod tooltip;

pub use model::{BarAction, BarModel, IndicatorStyle, WindowButton, WindowState, WorkspaceGroup, WorkspaceIndicator};
pub use sync::{TaskBarSync, TASK_BAR_PLACEMENT};
pub use tooltip::{TooltipController, TOOLTIP_HIDE_DELAY};
