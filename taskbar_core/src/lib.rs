//! taskbar_core - logic behind the Core S floating taskbar
//!
//! Everything that does not need a window lives here: the widget state
//! machine, corner geometry, the slide animator, resource monitoring, the
//! file command channel, global shortcut sources and the application context
//! tying their lifecycles together.

pub mod animator;
pub mod channel;
pub mod command;
pub mod companion;
pub mod config;
pub mod constants;
pub mod context;
pub mod controller;
pub mod corner;
pub mod geometry;
pub mod hotkey;
pub mod launcher;
pub mod monitor;
pub mod queue;
pub mod utils;

// Re-exports for convenience
pub use animator::{Animation, AnimationDriver, AnimationEvent, Direction, ThreadedAnimator};
pub use channel::CommandFile;
pub use command::{CommandOrigin, HotkeyCommand, Token};
pub use config::{AppConfig, AppEntry};
pub use context::TaskbarContext;
pub use controller::{ContentLayout, Controller, Surface, WidgetState};
pub use corner::Corner;
pub use geometry::{Layout, Rect, ScreenSize};
pub use monitor::{MonitorCache, MonitorSample, ResourceUsage};
pub use queue::{CommandQueue, CommandSink, ControlMessage};
pub use utils::{AppError, Result};
