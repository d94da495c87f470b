//! File-based command channel
//!
//! An external helper writes one token to a well-known path. The reader
//! deletes the file right after reading, so every write is delivered at most
//! once; writes faster than the poll interval coalesce.

use crate::command::Token;
use crate::utils::{AppError, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CommandFile {
    path: PathBuf,
}

impl CommandFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and delete the pending payload, if any
    pub fn take(&self) -> Result<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            // 另一个读者先删了：这次算它的
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        debug!("Command file payload: {:?}", content.trim());
        Ok(Some(content.trim().to_string()))
    }

    /// Take and parse the pending token
    pub fn poll(&self) -> Result<Option<Token>> {
        match self.take()? {
            Some(payload) => payload
                .parse::<Token>()
                .map(Some)
                .map_err(AppError::channel),
            None => Ok(None),
        }
    }

    /// Write a token, replacing anything still pending
    pub fn write(&self, token: &str) -> Result<()> {
        fs::write(&self.path, format!("{}\n", token))?;
        Ok(())
    }

    /// Best-effort removal on shutdown
    pub fn remove(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("Failed to remove {:?}: {}", self.path, e);
            }
        }
    }
}
