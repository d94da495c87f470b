//! Integration tests for taskbar_core

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use taskbar_core::{
    config::{AppConfig, CompanionConfig},
    hotkey::{CommandFileSource, ShortcutSource},
    monitor::{ResourceProbe, SysinfoProbe},
    AnimationDriver, CommandFile, CommandOrigin, CommandQueue, ContentLayout, ControlMessage,
    Controller, Corner, HotkeyCommand, Rect, ScreenSize, Surface, TaskbarContext,
    ThreadedAnimator,
};
use tempfile::tempdir;

#[derive(Default)]
struct NullSurface {
    last: Option<Rect>,
    content: ContentLayout,
}

impl Surface for NullSurface {
    fn set_geometry(&mut self, rect: Rect) {
        self.last = Some(rect);
    }
    fn set_content(&mut self, content: ContentLayout) {
        self.content = content;
    }
    fn set_visible(&mut self, _visible: bool) {}
    fn raise(&mut self) {}
}

/// Drain the queue into the controller until `done` or the deadline passes
fn pump<A: AnimationDriver>(
    queue: &CommandQueue,
    controller: &mut Controller<NullSurface, A>,
    timeout: Duration,
    done: impl Fn(&Controller<NullSurface, A>) -> bool,
) -> Vec<HotkeyCommand> {
    let deadline = Instant::now() + timeout;
    let mut commands = Vec::new();
    while Instant::now() < deadline && !done(controller) {
        if let Ok(message) = queue.receiver().recv_timeout(Duration::from_millis(20)) {
            match message {
                ControlMessage::Hotkey { command, .. } => {
                    commands.push(command);
                    controller.execute(command);
                }
                ControlMessage::Animation(event) => controller.on_animation_event(event),
                _ => {}
            }
        }
    }
    commands
}

#[test]
fn test_command_file_triggers_single_corner_cycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cores_taskbar_cmd");
    let queue = CommandQueue::new();
    let running = Arc::new(AtomicBool::new(true));

    let source = Box::new(CommandFileSource::new(&path, 100));
    let mut handle = source.spawn(queue.sink(), Arc::clone(&running)).unwrap();

    let mut controller = Controller::new(
        Default::default(),
        Default::default(),
        NullSurface::default(),
        ThreadedAnimator::new(queue.sink()),
    );
    controller.set_screen(ScreenSize::new(1920, 1080));

    CommandFile::new(&path).write("2").unwrap();
    let commands = pump(&queue, &mut controller, Duration::from_secs(3), |c| {
        c.state().corner != Corner::BottomLeft
    });
    // 再多等几个轮询周期，确认不会重复投递
    let extra = pump(&queue, &mut controller, Duration::from_millis(400), |_| false);

    running.store(false, Ordering::Relaxed);
    handle.stop();

    assert_eq!(commands, vec![HotkeyCommand::CornerCycle]);
    assert!(extra.is_empty());
    assert_eq!(controller.state().corner, Corner::TopLeft);
    assert!(!path.exists());
}

#[test]
fn test_expand_and_collapse_through_threaded_animator() {
    let queue = CommandQueue::new();
    let mut config = AppConfig::default();
    config.animation.step_delay_ms = 1;

    let mut controller = Controller::new(
        config.geometry,
        config.animation,
        NullSurface::default(),
        ThreadedAnimator::new(queue.sink()),
    );
    controller.set_screen(ScreenSize::new(1920, 1080));

    controller.toggle_expansion();
    pump(&queue, &mut controller, Duration::from_secs(3), |c| {
        !c.state().animating
    });
    assert!(controller.state().expanded);
    assert_eq!(controller.surface().content, ContentLayout::Expanded);
    assert_eq!(controller.surface().last, Some(Rect::new(20, 990, 400, 70)));

    controller.move_to_next_corner();
    pump(&queue, &mut controller, Duration::from_secs(3), |c| {
        !c.state().animating
    });
    assert!(!controller.state().expanded);
    assert_eq!(controller.state().corner, Corner::TopLeft);
    assert_eq!(controller.surface().last, Some(Rect::new(20, 20, 70, 70)));
}

#[test]
fn test_context_lifecycle_cleans_up() {
    let dir = tempdir().unwrap();
    let mut config = AppConfig::default();
    config.hotkeys.command_file = dir.path().join("cmd");
    config.hotkeys.use_xbindkeys = false;
    config.hotkeys.poll_interval_ms = 100;
    config.companion = CompanionConfig {
        enabled: false,
        ..CompanionConfig::default()
    };

    let queue = CommandQueue::new();
    let mut context = TaskbarContext::new(config, queue.sink());
    context.start().unwrap();
    assert!(context.is_running());
    assert_eq!(context.active_sources(), vec!["command-file"]);

    // 启动自检 token 会被轮询线程读走
    let deadline = Instant::now() + Duration::from_secs(3);
    let mut pinged = false;
    while Instant::now() < deadline && !pinged {
        if let Ok(ControlMessage::Ping { origin }) =
            queue.receiver().recv_timeout(Duration::from_millis(50))
        {
            assert_eq!(origin, CommandOrigin::CommandFile);
            pinged = true;
        }
    }
    assert!(pinged);

    CommandFile::new(dir.path().join("cmd")).write("1").unwrap();
    context.stop();
    assert!(!context.is_running());
    assert!(!dir.path().join("cmd").exists());

    // stop 两次无害
    context.stop();
}

#[test]
fn test_sysinfo_probe_reports_percentages() {
    let mut probe = SysinfoProbe::new();
    std::thread::sleep(Duration::from_millis(200));
    let usage = probe.sample().unwrap();
    assert!((0.0..=100.0).contains(&usage.cpu_percent));
    assert!(usage.ram_percent > 0.0 && usage.ram_percent <= 100.0);
}

#[test]
fn test_config_save_load() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("cores_taskbar").join("config.toml");

    let mut saved = AppConfig::default();
    saved.geometry.square_size = 60;
    saved.monitor.resource_every_ticks = 1;
    saved.apps.truncate(2);
    saved.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.geometry.square_size, 60);
    assert_eq!(loaded.monitor.resource_every_ticks, 1);
    assert_eq!(loaded.apps, saved.apps);
}

#[test]
fn test_load_creates_default_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let config = AppConfig::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.apps.len(), 5);
}
