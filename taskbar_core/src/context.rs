//! Application context: owns every background worker and its lifecycle

use crate::channel::CommandFile;
use crate::command::PING_TOKEN;
use crate::companion;
use crate::config::AppConfig;
use crate::hotkey::{self, SourceHandle};
use crate::monitor::{self, SysinfoProbe};
use crate::queue::{CommandSink, ControlMessage};
use crate::utils::Result;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub struct TaskbarContext {
    config: AppConfig,
    sink: CommandSink,
    running: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
    sources: Vec<SourceHandle>,
    temp_files: Vec<PathBuf>,
    started: bool,
}

impl TaskbarContext {
    pub fn new(config: AppConfig, sink: CommandSink) -> Self {
        Self {
            config,
            sink,
            running: Arc::new(AtomicBool::new(false)),
            workers: Vec::new(),
            sources: Vec::new(),
            temp_files: Vec::new(),
            started: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sink(&self) -> &CommandSink {
        &self.sink
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Names of the shortcut sources that started successfully
    pub fn active_sources(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Start the sampler, shortcut sources and companion check.
    ///
    /// A failing shortcut source is logged and skipped; the others keep running.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        self.running.store(true, Ordering::Relaxed);
        info!("Starting taskbar context");

        let hotkeys = &self.config.hotkeys;
        self.temp_files.push(hotkeys.command_file.clone());
        if hotkeys.use_xbindkeys {
            self.temp_files.push(hotkeys.xbindkeys_config.clone());
        }

        self.workers.push(monitor::spawn_sampler(
            self.config.monitor,
            SysinfoProbe::new(),
            self.sink.clone(),
            Arc::clone(&self.running),
        )?);

        for source in hotkey::build_sources(hotkeys) {
            let name = source.name();
            match source.spawn(self.sink.clone(), Arc::clone(&self.running)) {
                Ok(handle) => {
                    info!("Shortcut source {} started", name);
                    self.sources.push(handle);
                }
                Err(e) => warn!("Shortcut source {} unavailable: {}", name, e),
            }
        }

        if hotkeys.use_command_file {
            // 自检：轮询线程应当读到并删除这个 token
            let channel = CommandFile::new(&hotkeys.command_file);
            if let Err(e) = channel.write(PING_TOKEN) {
                warn!("Command file self-test failed: {}", e);
            }
        }

        let companion = self.config.companion.clone();
        if companion.enabled {
            let worker = thread::Builder::new()
                .name("companion".to_string())
                .spawn(move || {
                    if let Err(e) = companion::ensure_running(&companion) {
                        error!("Companion check failed: {}", e);
                    }
                })?;
            self.workers.push(worker);
        }

        Ok(())
    }

    /// Stop every worker and remove temp files. Safe to call twice.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        info!("Stopping taskbar context");

        self.running.store(false, Ordering::Relaxed);
        for source in &mut self.sources {
            source.stop();
        }
        self.sources.clear();

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                warn!("Worker thread panicked");
            }
        }

        for path in self.temp_files.drain(..) {
            CommandFile::new(path).remove();
        }

        self.sink.send(ControlMessage::Shutdown);
    }
}

impl Drop for TaskbarContext {
    fn drop(&mut self) {
        self.stop();
    }
}
