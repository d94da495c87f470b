//! Global key events read from `xinput test-xi2 --root`
//!
//! The utility prints one block per event:
//!
//! ```text
//! EVENT type 2 (KeyPress)
//!     device: 3 (3)
//!     detail: 10
//! ```
//!
//! [`XiEventParser`] pairs the header with its `detail:` keycode and
//! [`ChordDetector`] turns Alt+1/2/3 into commands.

use super::{ShortcutSource, SourceHandle};
use crate::command::{CommandOrigin, HotkeyCommand};
use crate::constants::{intervals, keycodes};
use crate::queue::CommandSink;
use crate::utils::{sleep_while_running, Result};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Press,
    Release,
}

/// Line-oriented parser for `xinput test-xi2` output
#[derive(Debug, Default)]
pub struct XiEventParser {
    pending: Option<KeyEdge>,
}

impl XiEventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line; yields a key event once its keycode is known
    pub fn feed(&mut self, line: &str) -> Option<(KeyEdge, u32)> {
        let line = line.trim();
        if line.starts_with("EVENT type") {
            // RawKeyPress 等其它事件会清掉待定状态
            self.pending = if line.ends_with("(KeyPress)") {
                Some(KeyEdge::Press)
            } else if line.ends_with("(KeyRelease)") {
                Some(KeyEdge::Release)
            } else {
                None
            };
            return None;
        }

        let detail = line.strip_prefix("detail:")?;
        let edge = self.pending.take()?;
        detail.trim().parse().ok().map(|code| (edge, code))
    }
}

/// Tracks held keys and recognises Alt+1/2/3
#[derive(Debug, Default)]
pub struct ChordDetector {
    held: HashSet<u32>,
}

impl ChordDetector {
    pub fn new() -> Self {
        Self::default()
    }

    fn alt_held(&self) -> bool {
        self.held.contains(&keycodes::ALT_L) || self.held.contains(&keycodes::ALT_R)
    }

    pub fn on_key(&mut self, edge: KeyEdge, code: u32) -> Option<HotkeyCommand> {
        match edge {
            KeyEdge::Release => {
                self.held.remove(&code);
                None
            }
            KeyEdge::Press => {
                // 自动重复只会再发 KeyPress，不触发第二次
                if !self.held.insert(code) || !self.alt_held() {
                    return None;
                }
                match code {
                    keycodes::DIGIT_1 => Some(HotkeyCommand::ExpandToggle),
                    keycodes::DIGIT_2 => Some(HotkeyCommand::CornerCycle),
                    keycodes::DIGIT_3 => Some(HotkeyCommand::VisibilityToggle),
                    _ => None,
                }
            }
        }
    }
}

/// Read events until EOF, a closed queue or the running flag is cleared
pub fn read_events<R: BufRead>(reader: R, sink: &CommandSink, running: &AtomicBool) {
    let mut parser = XiEventParser::new();
    let mut chords = ChordDetector::new();

    for line in reader.lines() {
        if !running.load(Ordering::Relaxed) {
            return;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("xinput read error: {}", e);
                return;
            }
        };
        let Some((edge, code)) = parser.feed(&line) else {
            continue;
        };
        if let Some(command) = chords.on_key(edge, code) {
            info!("Global chord {}", command);
            if !sink.hotkey(command, CommandOrigin::InputStream) {
                return;
            }
        }
    }
}

pub struct XinputSource {
    program: String,
    args: Vec<String>,
    restart_delay: Duration,
}

impl XinputSource {
    pub fn new(program: &str, args: &[&str], restart_delay: Duration) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            restart_delay,
        }
    }
}

impl Default for XinputSource {
    fn default() -> Self {
        Self::new(
            "xinput",
            &["test-xi2", "--root"],
            Duration::from_millis(intervals::XINPUT_RESTART),
        )
    }
}

type ChildSlot = Arc<Mutex<Option<Child>>>;

fn lock(slot: &Mutex<Option<Child>>) -> MutexGuard<'_, Option<Child>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn reap(slot: &Mutex<Option<Child>>) {
    if let Some(mut child) = lock(slot).take() {
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl ShortcutSource for XinputSource {
    fn name(&self) -> &'static str {
        "xinput"
    }

    fn spawn(
        self: Box<Self>,
        sink: CommandSink,
        running: Arc<AtomicBool>,
    ) -> Result<SourceHandle> {
        let XinputSource {
            program,
            args,
            restart_delay,
        } = *self;
        let slot: ChildSlot = Arc::new(Mutex::new(None));
        let worker_slot = Arc::clone(&slot);

        let thread = thread::Builder::new()
            .name("xinput".to_string())
            .spawn(move || {
                info!("Starting {} {:?}", program, args);
                while running.load(Ordering::Relaxed) {
                    match Command::new(&program)
                        .args(&args)
                        .stdin(Stdio::null())
                        .stdout(Stdio::piped())
                        .stderr(Stdio::null())
                        .spawn()
                    {
                        Ok(mut child) => {
                            let stdout = child.stdout.take();
                            *lock(&worker_slot) = Some(child);
                            if !running.load(Ordering::Relaxed) {
                                reap(&worker_slot);
                                break;
                            }
                            if let Some(stdout) = stdout {
                                read_events(BufReader::new(stdout), &sink, &running);
                            }
                            reap(&worker_slot);
                            debug!("{} exited", program);
                        }
                        Err(e) => warn!("Failed to start {}: {}", program, e),
                    }

                    if !sleep_while_running(&running, restart_delay) {
                        break;
                    }
                }
                info!("xinput reader exiting");
            })?;

        Ok(SourceHandle::new("xinput", Some(thread)).on_stop(move || {
            // 杀掉子进程让阻塞的 read 返回 EOF
            if let Some(child) = lock(&slot).as_mut() {
                let _ = child.kill();
            }
        }))
    }
}
