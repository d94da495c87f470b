//! cores_taskbar - the Core S floating taskbar
//!
//! A small always-on-top square that slides out into a bar with a clock,
//! CPU/RAM readout and application buttons. All behaviour lives in
//! `taskbar_core`; this crate draws it with egui and turns controller output
//! into viewport commands.

pub mod app;
pub mod ui;

// Re-exports for convenience
pub use app::CoresTaskbarApp;
pub use taskbar_core::{AppError, Result};
