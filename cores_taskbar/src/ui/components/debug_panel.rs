//! Debug window with one button per hotkey command

use chrono::{DateTime, Local};
use egui::{ViewportBuilder, ViewportId};
use log::debug;
use taskbar_core::{CommandOrigin, CommandSink, HotkeyCommand};

pub struct DebugPanel {
    open: bool,
    sink: CommandSink,
    last_sent: Option<(HotkeyCommand, DateTime<Local>)>,
}

impl DebugPanel {
    pub fn new(open: bool, sink: CommandSink) -> Self {
        Self {
            open,
            sink,
            last_sent: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Same path as every other shortcut source
    pub fn send(&mut self, command: HotkeyCommand) {
        debug!("Debug panel: {}", command);
        if self.sink.hotkey(command, CommandOrigin::DebugPanel) {
            self.last_sent = Some((command, Local::now()));
        }
    }

    pub fn last_sent(&self) -> Option<HotkeyCommand> {
        self.last_sent.map(|(command, _)| command)
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let builder = ViewportBuilder::default()
            .with_title("Core S Debug")
            .with_inner_size([260.0, 90.0])
            .with_resizable(false)
            .with_always_on_top();

        let mut clicked = None;
        let last_sent = self.last_sent;
        let close_requested = ctx.show_viewport_immediate(
            ViewportId::from_hash_of("cores_debug_panel"),
            builder,
            |ctx, _class| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        for command in HotkeyCommand::ALL {
                            let label = format!("{} {}", command.digit(), command.label());
                            if ui.button(label).on_hover_text(command.token()).clicked() {
                                clicked = Some(command);
                            }
                        }
                    });
                    ui.separator();
                    match last_sent {
                        Some((command, at)) => {
                            ui.small(format!("{} at {}", command, at.format("%H:%M:%S")));
                        }
                        None => {
                            ui.small("No command sent");
                        }
                    }
                });
                ctx.input(|i| i.viewport().close_requested())
            },
        );

        if let Some(command) = clicked {
            self.send(command);
        }
        if close_requested {
            self.open = false;
        }
    }
}
