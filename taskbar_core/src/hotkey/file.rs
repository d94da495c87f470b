//! Command-file polling source

use super::{ShortcutSource, SourceHandle};
use crate::channel::CommandFile;
use crate::command::{CommandOrigin, Token};
use crate::queue::{CommandSink, ControlMessage};
use crate::utils::{sleep_while_running, AppError, Result};
use log::{info, warn};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct CommandFileSource {
    channel: CommandFile,
    interval: Duration,
}

impl CommandFileSource {
    pub fn new(path: &Path, poll_interval_ms: u64) -> Self {
        Self {
            channel: CommandFile::new(path),
            interval: Duration::from_millis(poll_interval_ms),
        }
    }
}

impl ShortcutSource for CommandFileSource {
    fn name(&self) -> &'static str {
        "command-file"
    }

    fn spawn(
        self: Box<Self>,
        sink: CommandSink,
        running: Arc<AtomicBool>,
    ) -> Result<SourceHandle> {
        let CommandFileSource { channel, interval } = *self;
        info!("Polling {:?} every {:?}", channel.path(), interval);

        let thread = thread::Builder::new()
            .name("command-file".to_string())
            .spawn(move || {
                while running.load(Ordering::Relaxed) {
                    if !poll_once(&channel, &sink) {
                        break;
                    }
                    if !sleep_while_running(&running, interval) {
                        break;
                    }
                }
                info!("Command file poller exiting");
            })?;

        Ok(SourceHandle::new("command-file", Some(thread)))
    }
}

/// One poll; returns `false` once the queue is closed
pub(crate) fn poll_once(channel: &CommandFile, sink: &CommandSink) -> bool {
    match channel.poll() {
        Ok(Some(Token::Command(command))) => {
            info!("Command file: {}", command);
            sink.hotkey(command, CommandOrigin::CommandFile)
        }
        Ok(Some(Token::Ping)) => sink.send(ControlMessage::Ping {
            origin: CommandOrigin::CommandFile,
        }),
        Ok(None) => true,
        Err(AppError::Channel { message }) => {
            warn!("Ignoring command file payload: {}", message);
            true
        }
        Err(e) => {
            warn!("Command file poll failed: {}", e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::HotkeyCommand;
    use crate::queue::CommandQueue;
    use tempfile::tempdir;

    #[test]
    fn test_poll_once_forwards_command() {
        let dir = tempdir().unwrap();
        let channel = CommandFile::new(dir.path().join("cmd"));
        let queue = CommandQueue::new();
        channel.write("toggle_expansion").unwrap();

        assert!(poll_once(&channel, &queue.sink()));
        let mut seen = Vec::new();
        queue.drain(|m| seen.push(m));
        assert_eq!(
            seen,
            vec![ControlMessage::Hotkey {
                command: HotkeyCommand::ExpandToggle,
                origin: CommandOrigin::CommandFile,
            }]
        );
    }

    #[test]
    fn test_poll_once_ping() {
        let dir = tempdir().unwrap();
        let channel = CommandFile::new(dir.path().join("cmd"));
        let queue = CommandQueue::new();
        channel.write("test").unwrap();

        poll_once(&channel, &queue.sink());
        assert_eq!(
            queue.receiver().try_recv().ok(),
            Some(ControlMessage::Ping {
                origin: CommandOrigin::CommandFile
            })
        );
    }
}
