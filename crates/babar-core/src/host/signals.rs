use ahash::AHashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};

use super::{HostSignal, SignalHub};

/// Identifier of one signal connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// A connected signal that disconnects itself when dropped.
///
/// Every `connect` made by a component lives in one of these, so each
/// connection is released exactly once.
pub struct Subscription {
    hub: Rc<dyn SignalHub>,
    id: HandlerId,
    signal: HostSignal,
}

impl Subscription {
    pub fn connect(hub: &Rc<dyn SignalHub>, signal: HostSignal) -> Self {
        let id = hub.connect(signal);
        Self {
            hub: hub.clone(),
            id,
            signal,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.disconnect(self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("signal", &self.signal)
            .finish()
    }
}

/// Subscriptions owned by one component, released in reverse order of
/// acquisition.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, hub: &Rc<dyn SignalHub>, signal: HostSignal) {
        self.subscriptions.push(Subscription::connect(hub, signal));
    }

    pub fn contains(&self, signal: HostSignal) -> bool {
        self.subscriptions.iter().any(|s| s.signal == signal)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn release(&mut self) {
        while let Some(subscription) = self.subscriptions.pop() {
            drop(subscription);
        }
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.release();
    }
}

/// Signal hub that only keeps the connection table.
///
/// The daemon owns the actual event sources and asks the registry whether
/// anything is listening before delivering a signal.
#[derive(Debug, Default)]
pub struct SignalRegistry {
    next_id: Cell<u64>,
    connections: RefCell<AHashMap<HandlerId, HostSignal>>,
}

impl SignalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self, signal: HostSignal) -> bool {
        self.connections.borrow().values().any(|s| *s == signal)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.borrow().len()
    }
}

impl SignalHub for SignalRegistry {
    fn connect(&self, signal: HostSignal) -> HandlerId {
        let id = HandlerId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.connections.borrow_mut().insert(id, signal);
        debug!("Connected {:?} as handler {}", signal, id.0);
        id
    }

    fn disconnect(&self, id: HandlerId) {
        if self.connections.borrow_mut().remove(&id).is_none() {
            warn!("Handler {} was not connected", id.0);
        }
    }
}
