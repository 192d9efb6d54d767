use compact_str::CompactString;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::messages::BarCommand;

/// Service for launching shell command lines
pub struct ProcessService {
    command_rx: mpsc::Receiver<BarCommand>,
}

impl ProcessService {
    pub fn new(command_rx: mpsc::Receiver<BarCommand>) -> Self {
        Self { command_rx }
    }

    /// Run the process service (blocks forever)
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!("Starting process service");

        while let Some(cmd) = self.command_rx.recv().await {
            if let BarCommand::Spawn(command) = cmd {
                Self::spawn(command);
            }
        }

        Ok(())
    }

    /// Launch a command line in the background without waiting for it
    fn spawn(command: CompactString) {
        debug!("Spawning: {}", command);

        tokio::spawn(async move {
            let result = tokio::process::Command::new("sh")
                .args(["-c", command.as_str()])
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .spawn();

            match result {
                // reap the child so it does not linger as a zombie
                Ok(mut child) => {
                    if let Err(e) = child.wait().await {
                        debug!("Lost track of '{}': {}", command, e);
                    }
                }
                Err(e) => error!("Failed to spawn '{}': {}", command, e),
            }
        });
    }
}
