//! The "S" square shown in every state

use crate::ui::Theme;
use egui::{vec2, Align2, FontId, Rect, Sense, Ui};
use taskbar_core::Corner;

/// What the user did to the square this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareAction {
    None,
    Focus,
    Quit,
}

#[derive(Debug, Default)]
pub struct SquareWidget;

impl SquareWidget {
    pub fn new() -> Self {
        Self
    }

    /// Draw the square at the top-left of the window
    pub fn draw(&self, ui: &mut Ui, theme: &Theme, size: f32, corner: Corner) -> SquareAction {
        let rect = Rect::from_min_size(ui.max_rect().min, vec2(size, size));
        let response = ui.interact(rect, ui.id().with("core_square"), Sense::click());
        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, theme.background);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "S",
            FontId::proportional(size * 0.34),
            theme.accent,
        );
        // 右下角的小三角，指向当前所在角落
        painter.text(
            rect.min + vec2(size * 0.72, size * 0.72),
            Align2::CENTER_CENTER,
            corner.indicator(),
            FontId::proportional(size * 0.12),
            theme.accent,
        );

        if response.secondary_clicked() {
            SquareAction::Quit
        } else if response.clicked() {
            SquareAction::Focus
        } else {
            SquareAction::None
        }
    }
}
