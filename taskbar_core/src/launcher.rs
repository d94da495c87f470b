//! Detached application launching

use log::{error, info, warn};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

/// Spawn `command` through the shell from a worker thread.
///
/// Output streams are discarded and the worker reaps the child, so the caller
/// never blocks on process creation. Failures are logged, never retried.
pub fn launch(command: &str) -> Option<JoinHandle<()>> {
    let command = command.trim().to_string();
    if command.is_empty() {
        warn!("Refusing to launch an empty command");
        return None;
    }

    let spawned = thread::Builder::new()
        .name("launcher".to_string())
        .spawn(move || {
            match Command::new("sh")
                .arg("-c")
                .arg(&command)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(mut child) => {
                    info!("Launched {} (pid {})", command, child.id());
                    match child.wait() {
                        Ok(status) if !status.success() => {
                            warn!("{} exited with {}", command, status)
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Failed to wait for {}: {}", command, e),
                    }
                }
                Err(e) => error!("Failed to launch {}: {}", command, e),
            }
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!("Failed to spawn launcher thread: {}", e);
            None
        }
    }
}
