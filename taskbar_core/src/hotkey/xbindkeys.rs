//! xbindkeys daemon source
//!
//! Generates a config binding Alt+1/2/3 to shell commands that write a token
//! into the command file, then (re)starts xbindkeys with it. Commands arrive
//! through [`super::CommandFileSource`]; this backend owns only the daemon.

use super::{ShortcutSource, SourceHandle};
use crate::command::HotkeyCommand;
use crate::queue::CommandSink;
use crate::utils::{AppError, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub struct XbindkeysSource {
    config_path: PathBuf,
    command_file: PathBuf,
}

impl XbindkeysSource {
    pub fn new(config_path: &Path, command_file: &Path) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            command_file: command_file.to_path_buf(),
        }
    }
}

/// xbindkeys configuration for the three chords
pub fn render_config(command_file: &Path) -> String {
    let mut config = String::new();
    for command in HotkeyCommand::ALL {
        config.push_str(&format!(
            "\"echo '{}' > {}\"\n    Alt + {}\n\n",
            command.token(),
            command_file.display(),
            command.digit()
        ));
    }
    config
}

/// Kill any xbindkeys left over from a previous run
fn kill_existing() {
    match Command::new("killall")
        .arg("xbindkeys")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) if status.success() => info!("Stopped previous xbindkeys"),
        Ok(_) => {}
        Err(e) => warn!("killall unavailable: {}", e),
    }
}

fn start_daemon(config_path: &Path) -> Result<Child> {
    Command::new("xbindkeys")
        .arg("-n")
        .arg("-f")
        .arg(config_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| AppError::process(format!("Failed to start xbindkeys: {}", e)))
}

impl ShortcutSource for XbindkeysSource {
    fn name(&self) -> &'static str {
        "xbindkeys"
    }

    fn spawn(
        self: Box<Self>,
        _sink: CommandSink,
        _running: Arc<AtomicBool>,
    ) -> Result<SourceHandle> {
        let XbindkeysSource {
            config_path,
            command_file,
        } = *self;
        fs::write(&config_path, render_config(&command_file))?;
        kill_existing();

        let mut child = match start_daemon(&config_path) {
            Ok(child) => child,
            Err(e) => {
                let _ = fs::remove_file(&config_path);
                return Err(e);
            }
        };
        info!("xbindkeys running (pid {}) with {:?}", child.id(), config_path);

        Ok(SourceHandle::new("xbindkeys", None).on_stop(move || {
            if let Err(e) = child.kill() {
                warn!("Failed to stop xbindkeys: {}", e);
            }
            let _ = child.wait();
            let _ = fs::remove_file(&config_path);
        }))
    }
}
