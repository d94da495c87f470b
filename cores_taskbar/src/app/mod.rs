//! Application core module

pub mod surface;

use crate::ui::components::{BarPanel, DebugPanel, SquareAction, SquareWidget};
use crate::ui::Theme;
use eframe::egui;
use egui::{Frame, Key};
use log::{debug, info, warn};
use std::sync::Arc;
use taskbar_core::hotkey::{focus_command, FocusKey};
use taskbar_core::{
    AppConfig, CommandOrigin, CommandQueue, CommandSink, ContentLayout, ControlMessage,
    Controller, MonitorCache, Result, ScreenSize, TaskbarContext, ThreadedAnimator,
};

pub use surface::EguiSurface;

/// Keys read while the window has focus
const FOCUS_KEYS: [(Key, FocusKey); 6] = [
    (Key::Num1, FocusKey::Digit(1)),
    (Key::Num2, FocusKey::Digit(2)),
    (Key::Num3, FocusKey::Digit(3)),
    (Key::F1, FocusKey::Function(1)),
    (Key::F2, FocusKey::Function(2)),
    (Key::F3, FocusKey::Function(3)),
];

/// Main egui application
pub struct CoresTaskbarApp {
    controller: Controller<EguiSurface, ThreadedAnimator>,
    queue: CommandQueue,
    sink: CommandSink,
    context: TaskbarContext,
    monitor: MonitorCache,
    theme: Theme,

    /// UI components
    square: SquareWidget,
    bar: BarPanel,
    debug_panel: DebugPanel,

    use_focus_keys: bool,
}

impl CoresTaskbarApp {
    /// Create the app and start every background worker
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self> {
        let ctx = cc.egui_ctx.clone();
        let theme = Theme::from_config(&config.theme)?;
        theme.apply_to_context(&ctx);

        let waker_ctx = ctx.clone();
        let queue = CommandQueue::with_waker(Arc::new(move || waker_ctx.request_repaint()));
        let sink = queue.sink();

        let controller = Controller::new(
            config.geometry,
            config.animation,
            EguiSurface::new(ctx),
            ThreadedAnimator::new(queue.sink()),
        );

        let show_debug_panel = config.hotkeys.show_debug_panel;
        let use_focus_keys = config.hotkeys.use_focus_keys;
        let monitor = MonitorCache::new(config.monitor.hysteresis_percent);
        let bar = BarPanel::new(config.apps.clone());

        let mut context = TaskbarContext::new(config, queue.sink());
        context.start()?;
        info!("Active shortcut sources: {:?}", context.active_sources());

        Ok(Self {
            controller,
            queue,
            debug_panel: DebugPanel::new(show_debug_panel, sink.clone()),
            sink,
            context,
            monitor,
            theme,
            square: SquareWidget::new(),
            bar,
            use_focus_keys,
        })
    }

    /// Follow the monitor the window is on
    fn sync_screen(&mut self, ctx: &egui::Context) {
        let monitor_size = ctx.input(|i| i.viewport().monitor_size);
        if let Some(size) = monitor_size {
            if size.x > 0.0 && size.y > 0.0 {
                self.controller
                    .set_screen(ScreenSize::new(size.x as i32, size.y as i32));
            }
        }
    }

    fn read_focus_keys(&self, ctx: &egui::Context) {
        let commands: Vec<_> = ctx.input(|i| {
            let alt = i.modifiers.alt;
            FOCUS_KEYS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .filter_map(|(_, focus_key)| focus_command(alt, *focus_key))
                .collect()
        });

        for command in commands {
            self.sink.hotkey(command, CommandOrigin::FocusKeys);
        }
    }

    /// Apply everything the workers and shortcut sources queued up
    fn process_messages(&mut self) {
        let controller = &mut self.controller;
        let monitor = &mut self.monitor;

        let processed = self.queue.drain(|message| match message {
            ControlMessage::Hotkey { command, origin } => {
                info!("{} via {:?}", command, origin);
                controller.execute(command);
            }
            ControlMessage::Animation(event) => controller.on_animation_event(event),
            ControlMessage::Monitor(sample) => {
                monitor.apply(&sample, controller.state().expanded);
            }
            ControlMessage::Ping { origin } => {
                info!("Command channel self-test received via {:?}", origin);
            }
            ControlMessage::Shutdown => debug!("Shutdown acknowledged"),
        });

        if processed > 0 {
            debug!("Processed {} queued messages", processed);
        }
    }

    fn draw(&mut self, ctx: &egui::Context) {
        let size = self.controller.layout().config().square_size as f32;
        let corner = self.controller.state().corner;
        let content = self.controller.surface().content();
        let bar_rect = self.controller.layout().bar_in_window();

        let mut action = SquareAction::None;
        egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| {
                action = self.square.draw(ui, &self.theme, size, corner);

                if content == ContentLayout::Expanded {
                    let origin = ui.max_rect().min;
                    let rect = egui::Rect::from_min_size(
                        origin + egui::vec2(bar_rect.x as f32, bar_rect.y as f32),
                        egui::vec2(bar_rect.w as f32, bar_rect.h as f32),
                    );
                    self.bar.draw(ui, &self.theme, rect, &self.monitor);
                }
            });

        match action {
            SquareAction::Focus => ctx.send_viewport_cmd(egui::ViewportCommand::Focus),
            SquareAction::Quit => {
                info!("Quit requested from the square");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            SquareAction::None => {}
        }
    }
}

impl eframe::App for CoresTaskbarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_screen(ctx);

        if self.use_focus_keys {
            self.read_focus_keys(ctx);
        }
        self.process_messages();

        self.draw(ctx);
        self.debug_panel.show(ctx);
        // 调试窗口按钮产生的命令留到下一帧处理
        if !self.queue.is_empty() {
            ctx.request_repaint();
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            info!("Close requested, stopping background workers");
            self.context.stop();
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.context.is_running() {
            warn!("Exiting with workers still running, stopping them");
        }
        self.context.stop();
        info!("Core S taskbar exited");
    }
}
