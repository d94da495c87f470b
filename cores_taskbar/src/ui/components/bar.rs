//! Expanded bar: resources, clock and application buttons

use crate::ui::Theme;
use egui::{Align, Button, FontId, Layout, Rect, RichText, UiBuilder, Ui};
use log::info;
use taskbar_core::{launcher, AppEntry, MonitorCache};

#[derive(Debug)]
pub struct BarPanel {
    apps: Vec<AppEntry>,
}

impl BarPanel {
    pub fn new(apps: Vec<AppEntry>) -> Self {
        Self { apps }
    }

    pub fn apps(&self) -> &[AppEntry] {
        &self.apps
    }

    /// Draw into `rect`, given in window coordinates
    pub fn draw(&self, ui: &mut Ui, theme: &Theme, rect: Rect, monitor: &MonitorCache) {
        ui.painter().rect_filled(rect, 0.0, theme.secondary);

        let inner = rect.shrink2(egui::vec2(8.0, 3.0));
        ui.scope_builder(UiBuilder::new().max_rect(inner), |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(4.0, 2.0);

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(monitor.resource_text())
                        .font(FontId::monospace(9.0))
                        .color(theme.accent),
                );
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(
                        RichText::new(monitor.clock_text())
                            .font(FontId::monospace(11.0))
                            .strong()
                            .color(theme.accent),
                    );
                });
            });

            ui.horizontal(|ui| {
                for app in &self.apps {
                    self.draw_app_button(ui, theme, app);
                }
            });
        });
    }

    fn draw_app_button(&self, ui: &mut Ui, theme: &Theme, app: &AppEntry) {
        let button = Button::new(RichText::new(&app.icon).size(12.0).color(theme.text))
            .fill(theme.background)
            .min_size(egui::vec2(26.0, 18.0));

        let response = ui.add(button).on_hover_text(app.name.as_str());
        if response.clicked() {
            info!("Launching {}: {}", app.name, app.command);
            launcher::launch(&app.command);
        }
    }
}
