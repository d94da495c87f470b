//! Single command queue drained by the UI thread
//!
//! Every background worker (animator, sampler, shortcut sources, file poller)
//! only ever holds a [`CommandSink`]. The UI loop owns the [`CommandQueue`] and
//! is the only place where widget state is mutated.

use crate::animator::AnimationEvent;
use crate::command::{CommandOrigin, HotkeyCommand};
use crate::monitor::MonitorSample;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Messages produced by background workers
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    Hotkey {
        command: HotkeyCommand,
        origin: CommandOrigin,
    },
    Animation(AnimationEvent),
    Monitor(MonitorSample),
    Ping {
        origin: CommandOrigin,
    },
    Shutdown,
}

/// Callback that wakes the UI loop after a message was queued
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Cloneable producer handle
#[derive(Clone)]
pub struct CommandSink {
    sender: Sender<ControlMessage>,
    waker: Option<Waker>,
}

impl fmt::Debug for CommandSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSink")
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

impl CommandSink {
    /// Queue a message. Returns `false` once the UI side is gone.
    pub fn send(&self, message: ControlMessage) -> bool {
        if self.sender.send(message).is_err() {
            debug!("Command queue closed, dropping message");
            return false;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
        true
    }

    pub fn hotkey(&self, command: HotkeyCommand, origin: CommandOrigin) -> bool {
        self.send(ControlMessage::Hotkey { command, origin })
    }
}

/// Consumer side, owned by the UI loop
pub struct CommandQueue {
    sender: Sender<ControlMessage>,
    receiver: Receiver<ControlMessage>,
    waker: Option<Waker>,
}

impl CommandQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            waker: None,
        }
    }

    /// Queue whose sinks call `waker` after every send
    pub fn with_waker(waker: Waker) -> Self {
        let mut queue = Self::new();
        queue.waker = Some(waker);
        queue
    }

    pub fn sink(&self) -> CommandSink {
        CommandSink {
            sender: self.sender.clone(),
            waker: self.waker.clone(),
        }
    }

    /// Process all pending messages, returning how many were handled
    pub fn drain<F>(&self, mut handler: F) -> usize
    where
        F: FnMut(ControlMessage),
    {
        let mut count = 0;
        while let Ok(message) = self.receiver.try_recv() {
            handler(message);
            count += 1;
        }
        count
    }

    pub fn receiver(&self) -> &Receiver<ControlMessage> {
        &self.receiver
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_drain_preserves_order() {
        let queue = CommandQueue::new();
        let sink = queue.sink();
        sink.hotkey(HotkeyCommand::CornerCycle, CommandOrigin::CommandFile);
        sink.send(ControlMessage::Shutdown);

        let mut seen = Vec::new();
        assert_eq!(queue.drain(|m| seen.push(m)), 2);
        assert_eq!(
            seen,
            vec![
                ControlMessage::Hotkey {
                    command: HotkeyCommand::CornerCycle,
                    origin: CommandOrigin::CommandFile,
                },
                ControlMessage::Shutdown,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_waker_called_per_send() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        let queue = CommandQueue::with_waker(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let sink = queue.sink();
        sink.send(ControlMessage::Shutdown);
        sink.send(ControlMessage::Shutdown);
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let queue = CommandQueue::new();
        let sink = queue.sink();
        drop(queue);
        assert!(!sink.send(ControlMessage::Shutdown));
    }
}
