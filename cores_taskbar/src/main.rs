//! cores_taskbar - Core S floating taskbar

use chrono::Local;
use cores_taskbar::{AppError, CoresTaskbarApp};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use log::{error, info};
use std::env;
use std::path::{Path, PathBuf};
use taskbar_core::config::LoggingConfig;
use taskbar_core::constants::app;
use taskbar_core::{AppConfig, HotkeyCommand};

/// Application entry point
fn main() -> eframe::Result<()> {
    // 第一个参数可指定配置文件
    let config_path = env::args().nth(1).map(PathBuf::from);

    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Keep the handle alive for the whole run
    let _logger = match initialize_logging(&config.logging) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting Core S Floating Taskbar");
    for command in HotkeyCommand::ALL {
        info!("  {}", command);
    }

    let size = config.geometry.square_size as f32;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::TITLE)
            .with_app_id(app::NAME)
            .with_inner_size([size, size])
            .with_decorations(false)
            .with_resizable(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        app::NAME,
        native_options,
        Box::new(move |cc| match CoresTaskbarApp::new(cc, config) {
            Ok(app) => {
                info!("Application created successfully");
                Ok(Box::new(app))
            }
            Err(e) => {
                error!("Failed to create application: {}", e);
                Err(e.into())
            }
        }),
    )
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if cfg!(feature = "debug_mode") {
        config.hotkeys.show_debug_panel = true;
    }
    config.validate()?;
    Ok(config)
}

fn initialize_logging(config: &LoggingConfig) -> Result<LoggerHandle, AppError> {
    let logger = Logger::try_with_str(&config.level)
        .map_err(|e| AppError::config(format!("Failed to create logger: {}", e)))?;

    let logger = if config.log_to_file {
        let timestamp = Local::now().format("%Y-%m-%d_%H_%M_%S").to_string();
        let directory = config
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("/tmp"));

        logger
            .format_for_files(flexi_logger::detailed_format)
            .format_for_stdout(flexi_logger::colored_opt_format)
            .log_to_file(
                FileSpec::default()
                    .directory(directory)
                    .basename(format!("{}_{}", app::NAME, timestamp))
                    .suffix("log"),
            )
            .duplicate_to_stdout(Duplicate::Debug)
            .rotate(
                Criterion::Size(config.max_file_size),
                Naming::Numbers,
                Cleanup::KeepLogFiles(config.max_files),
            )
    } else {
        logger
            .format(flexi_logger::colored_opt_format)
            .log_to_stdout()
    };

    logger
        .start()
        .map_err(|e| AppError::config(format!("Failed to start logger: {}", e)))
}
