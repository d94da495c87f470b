//! Configuration management

use crate::constants::{animation, app, companion, geometry, intervals, monitor, paths};
use crate::utils::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub geometry: GeometryConfig,
    pub animation: AnimationConfig,
    pub monitor: MonitorConfig,
    pub hotkeys: HotkeyConfig,
    pub theme: ThemeConfig,
    pub companion: CompanionConfig,
    pub logging: LoggingConfig,
    pub apps: Vec<AppEntry>,
}

/// Widget dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub square_size: u32,
    pub expanded_width: u32,
    pub bar_height: u32,
    pub margin: u32,
    pub seam: u32,
}

/// Slide animation configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub steps: u32,
    pub step_delay_ms: u64,
}

/// System monitoring configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub clock_interval_ms: u64,
    /// 1 = sample CPU/RAM on every tick
    pub resource_every_ticks: u32,
    pub hysteresis_percent: f32,
}

/// Shortcut sources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    pub command_file: PathBuf,
    pub poll_interval_ms: u64,
    pub use_command_file: bool,
    pub use_xbindkeys: bool,
    pub xbindkeys_config: PathBuf,
    pub use_xinput: bool,
    pub use_focus_keys: bool,
    pub show_debug_panel: bool,
}

/// Colours as `#rrggbb`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: String,
    pub accent: String,
    pub secondary: String,
    pub text: String,
    pub opacity: f32,
}

/// Companion management process started alongside the widget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    pub enabled: bool,
    pub pattern: String,
    pub command: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub log_to_file: bool,
    pub log_dir: Option<PathBuf>,
    pub max_file_size: u64,
    pub max_files: usize,
}

/// Application button in the expanded bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEntry {
    pub icon: String,
    pub name: String,
    pub command: String,
}

impl AppEntry {
    fn new(icon: &str, name: &str, command: &str) -> Self {
        Self {
            icon: icon.to_string(),
            name: name.to_string(),
            command: command.to_string(),
        }
    }

    pub fn defaults() -> Vec<AppEntry> {
        vec![
            AppEntry::new("📁", "Files", "thunar"),
            AppEntry::new("🌐", "Browser", "firefox"),
            AppEntry::new("⚙", "Settings", "xfce4-settings-manager"),
            AppEntry::new("💻", "Terminal", "xfce4-terminal"),
            AppEntry::new("📝", "Editor", "mousepad"),
        ]
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            animation: AnimationConfig::default(),
            monitor: MonitorConfig::default(),
            hotkeys: HotkeyConfig::default(),
            theme: ThemeConfig::default(),
            companion: CompanionConfig::default(),
            logging: LoggingConfig::default(),
            apps: AppEntry::defaults(),
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            square_size: geometry::SQUARE_SIZE,
            expanded_width: geometry::EXPANDED_WIDTH,
            bar_height: geometry::BAR_HEIGHT,
            margin: geometry::MARGIN,
            seam: geometry::SEAM,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps: animation::STEPS,
            step_delay_ms: animation::STEP_DELAY_MS,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            clock_interval_ms: intervals::CLOCK_TICK,
            resource_every_ticks: monitor::RESOURCE_EVERY_TICKS,
            hysteresis_percent: monitor::HYSTERESIS_PERCENT,
        }
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            command_file: PathBuf::from(paths::COMMAND_FILE),
            poll_interval_ms: intervals::COMMAND_POLL,
            use_command_file: true,
            use_xbindkeys: true,
            xbindkeys_config: PathBuf::from(paths::XBINDKEYS_CONFIG),
            use_xinput: false,
            use_focus_keys: true,
            show_debug_panel: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#3F0808".to_string(),
            accent: "#ffffff".to_string(),
            secondary: "#2F0808".to_string(),
            text: "#f0f6fc".to_string(),
            opacity: 0.95,
        }
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pattern: companion::PATTERN.to_string(),
            command: companion::COMMAND.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: app::DEFAULT_LOG_LEVEL.to_string(),
            log_to_file: true,
            log_dir: None,
            max_file_size: app::LOG_FILE_MAX_SIZE,
            max_files: app::LOG_FILE_MAX_COUNT,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location or create it
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults there when missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| AppError::config(format!("Failed to read config file: {}", e)))?;

            let config: AppConfig = toml::from_str(&content)?;

            log::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            log::info!("Created default configuration at {:?}", path);
            Ok(config)
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| AppError::config(format!("Failed to write config file: {}", e)))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the config file path
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::config("Cannot determine config directory"))?;

        Ok(config_dir.join(app::NAME).join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&mut self) -> Result<()> {
        let g = &mut self.geometry;
        g.square_size = g.square_size.clamp(24, 256);
        g.bar_height = g.bar_height.clamp(12, g.square_size);
        g.seam = g.seam.min(16);
        // 展开宽度至少要放得下方块和缝隙
        g.expanded_width = g.expanded_width.max(g.square_size + g.seam + 40);

        self.animation.steps = self
            .animation
            .steps
            .clamp(animation::MIN_STEPS, animation::MAX_STEPS);
        self.animation.step_delay_ms = self.animation.step_delay_ms.clamp(1, 200);

        self.monitor.clock_interval_ms = self.monitor.clock_interval_ms.max(100);
        self.monitor.resource_every_ticks = self.monitor.resource_every_ticks.clamp(1, 60);
        self.monitor.hysteresis_percent = self.monitor.hysteresis_percent.clamp(0.0, 50.0);

        self.hotkeys.poll_interval_ms = self
            .hotkeys
            .poll_interval_ms
            .clamp(intervals::MIN_COMMAND_POLL, intervals::MAX_COMMAND_POLL);
        if self.hotkeys.command_file.as_os_str().is_empty() {
            return Err(AppError::config("hotkeys.command_file must not be empty"));
        }
        // xbindkeys 只负责写命令文件，必须有人读
        if self.hotkeys.use_xbindkeys && !self.hotkeys.use_command_file {
            log::warn!("xbindkeys needs the command file source, enabling it");
            self.hotkeys.use_command_file = true;
        }

        self.theme.opacity = self.theme.opacity.clamp(0.1, 1.0);
        for color in [
            &self.theme.background,
            &self.theme.accent,
            &self.theme.secondary,
            &self.theme.text,
        ] {
            parse_hex_color(color)?;
        }

        self.logging.max_file_size = self.logging.max_file_size.max(1_000_000); // At least 1MB
        self.logging.max_files = self.logging.max_files.clamp(1, 20);

        Ok(())
    }
}

/// Parse `#rrggbb` into RGB bytes
pub fn parse_hex_color(value: &str) -> Result<[u8; 3]> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(AppError::config(format!("Invalid colour: {}", value)));
    }

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| AppError::config(format!("Invalid colour: {}", value)))?;
    }
    Ok(rgb)
}
