use tokio::sync::mpsc;
use tracing::warn;

use babar_core::{BarCommand, BarInput};

/// Channels from GTK widgets to the services and back into the bar.
///
/// Widget callbacks never call into the bar directly: input is queued and
/// delivered by the daemon loop once the callback has returned.
#[derive(Clone)]
pub struct MessageBus {
    command_tx: mpsc::Sender<BarCommand>,
    input_tx: async_channel::Sender<BarInput>,
}

impl MessageBus {
    pub fn new(
        command_tx: mpsc::Sender<BarCommand>,
        input_tx: async_channel::Sender<BarInput>,
    ) -> Self {
        Self {
            command_tx,
            input_tx,
        }
    }

    /// Queue a command for the async services, keeping submission order
    pub fn send_command(&self, cmd: BarCommand) {
        if let Err(e) = self.command_tx.try_send(cmd) {
            warn!("Dropping command: {}", e);
        }
    }

    /// Queue input from a view for the bar
    pub fn send_input(&self, input: BarInput) {
        if self.input_tx.try_send(input).is_err() {
            warn!("Bar input channel closed");
        }
    }
}
