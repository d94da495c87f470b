//! Application constants and default configuration values

/// Widget geometry in logical pixels
pub mod geometry {
    pub const SQUARE_SIZE: u32 = 70;
    pub const EXPANDED_WIDTH: u32 = 400;
    pub const BAR_HEIGHT: u32 = 45;
    pub const MARGIN: u32 = 20;
    /// Gap between the square and the expanded bar
    pub const SEAM: u32 = 2;
}

/// Slide animation
pub mod animation {
    pub const STEPS: u32 = 8;
    pub const STEP_DELAY_MS: u64 = 25;
    pub const MIN_STEPS: u32 = 2;
    pub const MAX_STEPS: u32 = 30;
}

/// Update intervals in milliseconds
pub mod intervals {
    pub const CLOCK_TICK: u64 = 1000;
    pub const COMMAND_POLL: u64 = 200;
    pub const MIN_COMMAND_POLL: u64 = 100;
    pub const MAX_COMMAND_POLL: u64 = 1000;
    pub const XINPUT_RESTART: u64 = 2000;
}

/// System monitor
pub mod monitor {
    /// Resources are sampled on every Nth clock tick
    pub const RESOURCE_EVERY_TICKS: u32 = 3;
    pub const HYSTERESIS_PERCENT: f32 = 1.0;
    pub const CLOCK_PLACEHOLDER: &str = "00:00:00";
    pub const CLOCK_FORMAT: &str = "%H:%M:%S";
}

/// Well-known temporary paths
pub mod paths {
    pub const COMMAND_FILE: &str = "/tmp/cores_taskbar_cmd";
    pub const XBINDKEYS_CONFIG: &str = "/tmp/cores_xbindkeys";
}

/// X11 keycodes used by the input event stream
pub mod keycodes {
    pub const ALT_L: u32 = 64;
    pub const ALT_R: u32 = 108;
    pub const DIGIT_1: u32 = 10;
    pub const DIGIT_2: u32 = 11;
    pub const DIGIT_3: u32 = 12;
}

/// Companion management process
pub mod companion {
    pub const PATTERN: &str = "manager.py";
    pub const COMMAND: &str = "python3 /opt/cores-system/scripts/manager.py";
}

/// Application metadata
pub mod app {
    pub const NAME: &str = "cores_taskbar";
    pub const TITLE: &str = "Core S Taskbar";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
    pub const LOG_FILE_MAX_SIZE: u64 = 10_000_000; // 10MB
    pub const LOG_FILE_MAX_COUNT: usize = 5;
}
