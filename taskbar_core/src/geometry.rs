//! Corner positioning and expanded-bar geometry

use crate::config::GeometryConfig;
use crate::corner::Corner;

/// Screen size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }
}

/// Top-left origin of a `size`×`size` widget placed `margin` pixels from the
/// edges that meet at `corner`.
pub fn corner_origin(screen: ScreenSize, size: u32, margin: u32, corner: Corner) -> (i32, i32) {
    let size = size as i32;
    let margin = margin as i32;
    let left = margin;
    let right = screen.width - size - margin;
    let top = margin;
    let bottom = screen.height - size - margin;

    match corner {
        Corner::BottomLeft => (left, bottom),
        Corner::TopLeft => (left, top),
        Corner::TopRight => (right, top),
        Corner::BottomRight => (right, bottom),
    }
}

/// Window and component rectangles for a given state
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    geometry: GeometryConfig,
}

impl Layout {
    pub fn new(geometry: GeometryConfig) -> Self {
        Self { geometry }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.geometry
    }

    /// The square itself, in screen coordinates
    pub fn square(&self, screen: ScreenSize, corner: Corner) -> Rect {
        let size = self.geometry.square_size;
        let (x, y) = corner_origin(screen, size, self.geometry.margin, corner);
        Rect::new(x, y, size, size)
    }

    /// Whole-window geometry. The window only grows when expanded at a left
    /// corner; everywhere else it is the bare square.
    pub fn window(&self, screen: ScreenSize, corner: Corner, expanded: bool) -> Rect {
        let square = self.square(screen, corner);
        if expanded && corner.allows_expansion() {
            Rect::new(square.x, square.y, self.geometry.expanded_width, square.h)
        } else {
            square
        }
    }

    /// Window geometry for an intermediate animation width
    pub fn window_with_width(&self, screen: ScreenSize, corner: Corner, width: u32) -> Rect {
        let square = self.square(screen, corner);
        Rect::new(square.x, square.y, width, square.h)
    }

    /// Bar rectangle relative to the window origin: right of the square after
    /// the seam, bottom edge flush with the square's bottom edge.
    pub fn bar_in_window(&self) -> Rect {
        let g = &self.geometry;
        let x = (g.square_size + g.seam) as i32;
        let w = g.expanded_width.saturating_sub(g.square_size + g.seam);
        let h = g.bar_height.min(g.square_size);
        let y = (g.square_size - h) as i32;
        Rect::new(x, y, w, h)
    }

    /// Bar rectangle in screen coordinates
    pub fn bar(&self, screen: ScreenSize, corner: Corner) -> Rect {
        let square = self.square(screen, corner);
        let local = self.bar_in_window();
        Rect::new(square.x + local.x, square.y + local.y, local.w, local.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };

    fn layout() -> Layout {
        Layout::new(GeometryConfig::default())
    }

    #[test]
    fn test_corner_formulas() {
        assert_eq!(corner_origin(SCREEN, 70, 20, Corner::BottomLeft), (20, 990));
        assert_eq!(corner_origin(SCREEN, 70, 20, Corner::TopLeft), (20, 20));
        assert_eq!(corner_origin(SCREEN, 70, 20, Corner::TopRight), (1830, 20));
        assert_eq!(corner_origin(SCREEN, 70, 20, Corner::BottomRight), (1830, 990));
    }

    #[test]
    fn test_window_stays_square_on_right_corners() {
        let layout = layout();
        let rect = layout.window(SCREEN, Corner::TopRight, true);
        assert_eq!((rect.w, rect.h), (70, 70));
    }

    #[test]
    fn test_expanded_window_extends_right() {
        let layout = layout();
        let rect = layout.window(SCREEN, Corner::BottomLeft, true);
        assert_eq!(rect, Rect::new(20, 990, 400, 70));
    }

    #[test]
    fn test_bar_has_seam_and_bottom_alignment() {
        let layout = layout();
        let square = layout.square(SCREEN, Corner::TopLeft);
        let bar = layout.bar(SCREEN, Corner::TopLeft);
        assert_eq!(bar.x, square.right() + 2);
        assert_eq!(bar.bottom(), square.bottom());
        assert_eq!(bar.h, 45);
        assert_eq!(bar.right(), square.x + 400);
    }
}
