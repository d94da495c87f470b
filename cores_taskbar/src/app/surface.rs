//! Controller output turned into viewport commands

use egui::{pos2, vec2, ViewportCommand, WindowLevel};
use log::debug;
use taskbar_core::{ContentLayout, Rect, Surface};

/// The root viewport as seen by the controller
pub struct EguiSurface {
    ctx: egui::Context,
    content: ContentLayout,
    geometry: Option<Rect>,
    visible: bool,
}

impl EguiSurface {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            content: ContentLayout::Collapsed,
            geometry: None,
            visible: true,
        }
    }

    pub fn content(&self) -> ContentLayout {
        self.content
    }

    /// Last rectangle pushed to the window
    pub fn geometry(&self) -> Option<Rect> {
        self.geometry
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Surface for EguiSurface {
    fn set_geometry(&mut self, rect: Rect) {
        // 无边框窗口，外框位置即内容位置
        self.ctx
            .send_viewport_cmd(ViewportCommand::OuterPosition(pos2(rect.x as f32, rect.y as f32)));
        self.ctx
            .send_viewport_cmd(ViewportCommand::InnerSize(vec2(rect.w as f32, rect.h as f32)));
        self.geometry = Some(rect);
        self.ctx.request_repaint();
    }

    fn set_content(&mut self, content: ContentLayout) {
        debug!("Content layout: {:?}", content);
        self.content = content;
        self.ctx.request_repaint();
    }

    fn set_visible(&mut self, visible: bool) {
        self.ctx.send_viewport_cmd(ViewportCommand::Visible(visible));
        self.visible = visible;
    }

    fn raise(&mut self) {
        self.ctx
            .send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
        self.ctx.send_viewport_cmd(ViewportCommand::Focus);
    }
}
