use compact_str::CompactString;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::trace;

use crate::config::BarSettings;
use crate::host::{ButtonAnchor, HostContext, Scheduler, TimerId, TooltipView};

/// How long a window tooltip stays up without further hover events
pub const TOOLTIP_HIDE_DELAY: Duration = Duration::from_secs(2);

struct TooltipState {
    view: Box<dyn TooltipView>,
    visible: bool,
    text: CompactString,
    position: (i32, i32),
    pending: Option<TimerId>,
    destroyed: bool,
}

impl TooltipState {
    fn hide(&mut self) {
        if !self.destroyed {
            self.view.hide();
        }
        self.visible = false;
    }
}

/// Shows a window's title under its hovered button.
///
/// There is a single tooltip view; hovering another button moves it. At most
/// one auto-hide timer is pending at any time.
pub struct TooltipController {
    state: Rc<RefCell<TooltipState>>,
    scheduler: Rc<dyn Scheduler>,
    y: i32,
}

impl TooltipController {
    pub fn new(settings: &BarSettings, host: &HostContext) -> Self {
        Self {
            state: Rc::new(RefCell::new(TooltipState {
                view: host.views.tooltip(),
                visible: false,
                text: CompactString::default(),
                position: (0, 0),
                pending: None,
                destroyed: false,
            })),
            scheduler: host.scheduler.clone(),
            y: settings.tooltip_y(),
        }
    }

    /// React to the pointer entering or leaving a window button.
    pub fn on_hover_change(&self, anchor: ButtonAnchor, title: &str) {
        if self.state.borrow().destroyed {
            return;
        }
        if !(anchor.hovered && !title.is_empty()) {
            self.hide();
            return;
        }

        self.cancel_timer();
        {
            let mut state = self.state.borrow_mut();
            state.position = (anchor.x, self.y);
            state.text = title.into();
            state.view.show_at(anchor.x, self.y, title);
            state.visible = true;
        }

        let weak: Weak<RefCell<TooltipState>> = Rc::downgrade(&self.state);
        let id = self.scheduler.schedule_once(
            TOOLTIP_HIDE_DELAY,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    let mut state = state.borrow_mut();
                    state.pending = None;
                    state.hide();
                    trace!("Tooltip auto-hidden");
                }
            }),
        );
        self.state.borrow_mut().pending = Some(id);
    }

    pub fn hide(&self) {
        self.cancel_timer();
        self.state.borrow_mut().hide();
    }

    fn cancel_timer(&self) {
        let pending = self.state.borrow_mut().pending.take();
        if let Some(id) = pending {
            self.scheduler.cancel(id);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn text(&self) -> CompactString {
        self.state.borrow().text.clone()
    }

    pub fn position(&self) -> (i32, i32) {
        self.state.borrow().position
    }

    pub fn has_pending_timer(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    /// Cancel the pending timer and destroy the view.
    pub fn destroy(&self) {
        if self.state.borrow().destroyed {
            return;
        }
        self.hide();
        let mut state = self.state.borrow_mut();
        state.destroyed = true;
        state.view.destroy();
    }
}
