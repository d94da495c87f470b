//! Colours and visuals

use egui::{Color32, Visuals};
use taskbar_core::config::{parse_hex_color, ThemeConfig};
use taskbar_core::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color32,
    pub accent: Color32,
    pub secondary: Color32,
    pub text: Color32,
    pub opacity: f32,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        let opacity = config.opacity.clamp(0.0, 1.0);
        Ok(Self {
            background: Self::fill(&config.background, opacity)?,
            accent: Self::solid(&config.accent)?,
            secondary: Self::fill(&config.secondary, opacity)?,
            text: Self::solid(&config.text)?,
            opacity,
        })
    }

    fn solid(hex: &str) -> Result<Color32> {
        let [r, g, b] = parse_hex_color(hex)?;
        Ok(Color32::from_rgb(r, g, b))
    }

    /// Background colours carry the window opacity
    fn fill(hex: &str, opacity: f32) -> Result<Color32> {
        let [r, g, b] = parse_hex_color(hex)?;
        Ok(Color32::from_rgba_unmultiplied(
            r,
            g,
            b,
            (opacity * 255.0).round() as u8,
        ))
    }

    /// Hover fill for app buttons
    pub fn hover(&self) -> Color32 {
        self.accent.gamma_multiply(0.35)
    }

    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();
        // 窗口本身透明，只有方块和横条有底色
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.window_fill = self.secondary;
        visuals.override_text_color = Some(self.text);
        visuals.widgets.inactive.weak_bg_fill = self.background;
        visuals.widgets.hovered.weak_bg_fill = self.hover();
        visuals.widgets.active.weak_bg_fill = self.accent;
        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_applies_to_fills_only() {
        let config = ThemeConfig {
            opacity: 0.5,
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config).unwrap();

        assert_eq!(theme.secondary.a(), 128);
        assert_eq!(theme.accent.a(), 255);
    }

    #[test]
    fn test_opacity_clamped() {
        let config = ThemeConfig {
            opacity: 3.0,
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config).unwrap();
        assert_eq!(theme.opacity, 1.0);
        assert_eq!(theme.background.a(), 255);
    }
}
