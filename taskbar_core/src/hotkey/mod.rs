//! Global shortcut sources
//!
//! Every backend turns some kind of keyboard input into [`HotkeyCommand`]s and
//! pushes them into the command queue. None of them touch widget state.

pub mod file;
pub mod xbindkeys;
pub mod xinput;

pub use file::CommandFileSource;
pub use xbindkeys::XbindkeysSource;
pub use xinput::{ChordDetector, KeyEdge, XiEventParser, XinputSource};

use crate::command::HotkeyCommand;
use crate::config::HotkeyConfig;
use crate::queue::CommandSink;
use crate::utils::Result;
use log::{info, warn};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::JoinHandle;

/// A pluggable shortcut backend
pub trait ShortcutSource: Send {
    fn name(&self) -> &'static str;

    /// Start the backend. Workers must exit once `running` is cleared.
    fn spawn(self: Box<Self>, sink: CommandSink, running: Arc<AtomicBool>)
        -> Result<SourceHandle>;
}

type StopHook = Box<dyn FnOnce() + Send>;

/// Running backend: optional worker thread plus a hook that unblocks it
pub struct SourceHandle {
    name: &'static str,
    thread: Option<JoinHandle<()>>,
    on_stop: Option<StopHook>,
}

impl SourceHandle {
    pub fn new(name: &'static str, thread: Option<JoinHandle<()>>) -> Self {
        Self {
            name,
            thread,
            on_stop: None,
        }
    }

    /// Run `hook` when stopping, before joining the worker
    pub fn on_stop<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_stop = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Call after clearing the running flag
    pub fn stop(&mut self) {
        if let Some(hook) = self.on_stop.take() {
            hook();
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Shortcut source {} panicked", self.name);
            }
        }
        info!("Shortcut source {} stopped", self.name);
    }
}

/// Keys read from the widget's own input while it has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusKey {
    Digit(u8),
    Function(u8),
}

/// Alt+1/2/3, or F1/F2/F3 without modifiers as a fallback
pub fn focus_command(alt: bool, key: FocusKey) -> Option<HotkeyCommand> {
    match key {
        FocusKey::Digit(d) if alt => HotkeyCommand::from_digit(d),
        FocusKey::Function(n) => HotkeyCommand::from_digit(n),
        _ => None,
    }
}

/// Backends enabled by `config`, in start order
pub fn build_sources(config: &HotkeyConfig) -> Vec<Box<dyn ShortcutSource>> {
    let mut sources: Vec<Box<dyn ShortcutSource>> = Vec::new();

    if config.use_xbindkeys {
        sources.push(Box::new(XbindkeysSource::new(
            &config.xbindkeys_config,
            &config.command_file,
        )));
    }
    if config.use_command_file {
        sources.push(Box::new(CommandFileSource::new(
            &config.command_file,
            config.poll_interval_ms,
        )));
    }
    if config.use_xinput {
        sources.push(Box::new(XinputSource::default()));
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_keys() {
        assert_eq!(
            focus_command(true, FocusKey::Digit(1)),
            Some(HotkeyCommand::ExpandToggle)
        );
        assert_eq!(focus_command(false, FocusKey::Digit(1)), None);
        assert_eq!(
            focus_command(false, FocusKey::Function(3)),
            Some(HotkeyCommand::VisibilityToggle)
        );
        assert_eq!(focus_command(true, FocusKey::Digit(4)), None);
    }

    #[test]
    fn test_build_sources_follows_config() {
        let config = HotkeyConfig::default();
        let names: Vec<&str> = build_sources(&config).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["xbindkeys", "command-file"]);

        let config = HotkeyConfig {
            use_xbindkeys: false,
            use_command_file: false,
            use_xinput: true,
            ..HotkeyConfig::default()
        };
        let names: Vec<&str> = build_sources(&config).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["xinput"]);
    }
}
