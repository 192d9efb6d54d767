use glib::SourceId;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use babar_core::host::{Scheduler, TimerId};

/// One-shot timers on the glib main loop
#[derive(Default)]
pub struct GlibScheduler {
    next_id: Cell<u64>,
    sources: Rc<RefCell<HashMap<TimerId, SourceId>>>,
}

impl GlibScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.sources.borrow().len()
    }
}

impl Scheduler for GlibScheduler {
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get() + 1);
        self.next_id.set(id.0);

        let sources = self.sources.clone();
        let source = glib::timeout_add_local_once(delay, move || {
            // the source is finished once it fires; removing it again would panic
            sources.borrow_mut().remove(&id);
            callback();
        });
        self.sources.borrow_mut().insert(id, source);
        id
    }

    fn cancel(&self, id: TimerId) {
        if let Some(source) = self.sources.borrow_mut().remove(&id) {
            source.remove();
        }
    }
}

impl Drop for GlibScheduler {
    fn drop(&mut self) {
        for (_, source) in self.sources.borrow_mut().drain() {
            source.remove();
        }
    }
}
