//! Companion management process

use crate::config::CompanionConfig;
use crate::launcher;
use crate::utils::{AppError, Result};
use log::info;
use std::process::Command;

/// `pgrep` prints one pid per match; any output means something is running
pub fn pgrep_matched(stdout: &[u8]) -> bool {
    stdout.iter().any(|b| !b.is_ascii_whitespace())
}

pub fn is_running(pattern: &str) -> Result<bool> {
    let output = Command::new("pgrep")
        .arg("-f")
        .arg(pattern)
        .output()
        .map_err(|e| AppError::process(format!("Failed to run pgrep: {}", e)))?;
    Ok(pgrep_matched(&output.stdout))
}

/// Start the companion unless it is already running. Returns whether it was started.
pub fn ensure_running(config: &CompanionConfig) -> Result<bool> {
    if !config.enabled {
        return Ok(false);
    }
    if is_running(&config.pattern)? {
        info!("Companion {} already running", config.pattern);
        return Ok(false);
    }

    info!("Starting companion: {}", config.command);
    launcher::launch(&config.command)
        .map(|_| true)
        .ok_or_else(|| AppError::process("Failed to start companion"))
}
