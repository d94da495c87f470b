//! Widget state machine

use crate::animator::{Animation, AnimationDriver, AnimationEvent, Direction};
use crate::command::HotkeyCommand;
use crate::config::{AnimationConfig, GeometryConfig};
use crate::corner::Corner;
use crate::geometry::{Layout, Rect, ScreenSize};
use log::{debug, info};

/// What the window is currently drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentLayout {
    #[default]
    Collapsed,
    Expanded,
}

/// Widget state, mutated only by [`Controller`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetState {
    pub expanded: bool,
    pub visible: bool,
    pub corner: Corner,
    pub animating: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            expanded: false,
            visible: true,
            corner: Corner::BottomLeft,
            animating: false,
        }
    }
}

/// Window operations the controller issues
pub trait Surface {
    fn set_geometry(&mut self, rect: Rect);
    fn set_content(&mut self, content: ContentLayout);
    fn set_visible(&mut self, visible: bool);
    /// Re-apply always-on-top; some window managers drop it across hide/show
    fn raise(&mut self);
}

pub struct Controller<S: Surface, A: AnimationDriver> {
    state: WidgetState,
    layout: Layout,
    animation: AnimationConfig,
    screen: Option<ScreenSize>,
    /// Corner advance waiting for the collapse to finish
    pending_corner_move: bool,
    surface: S,
    animator: A,
}

impl<S: Surface, A: AnimationDriver> Controller<S, A> {
    pub fn new(
        geometry: GeometryConfig,
        animation: AnimationConfig,
        surface: S,
        animator: A,
    ) -> Self {
        Self {
            state: WidgetState::default(),
            layout: Layout::new(geometry),
            animation,
            screen: None,
            pending_corner_move: false,
            surface,
            animator,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn screen(&self) -> Option<ScreenSize> {
        self.screen
    }

    /// Record the screen size; repositions when it changed
    pub fn set_screen(&mut self, screen: ScreenSize) {
        if self.screen == Some(screen) {
            return;
        }
        info!("Screen size {}x{}", screen.width, screen.height);
        self.screen = Some(screen);
        if !self.state.animating {
            self.reposition();
        }
    }

    pub fn execute(&mut self, command: HotkeyCommand) {
        match command {
            HotkeyCommand::ExpandToggle => self.toggle_expansion(),
            HotkeyCommand::CornerCycle => self.move_to_next_corner(),
            HotkeyCommand::VisibilityToggle => self.toggle_visibility(),
        }
    }

    pub fn toggle_expansion(&mut self) {
        if self.state.animating {
            debug!("Animation in progress, ignoring expansion toggle");
            return;
        }
        if !self.state.corner.allows_expansion() {
            debug!("Expansion not allowed at {}", self.state.corner);
            return;
        }

        let direction = if self.state.expanded {
            Direction::Collapse
        } else {
            Direction::Expand
        };
        self.start_animation(direction);
    }

    pub fn move_to_next_corner(&mut self) {
        if self.state.animating {
            debug!("Animation in progress, ignoring corner move");
            return;
        }

        if self.state.expanded {
            // 先收起，收起动画结束后再换角
            self.pending_corner_move = true;
            self.start_animation(Direction::Collapse);
        } else {
            self.complete_corner_move();
        }
    }

    pub fn toggle_visibility(&mut self) {
        if self.state.visible {
            info!("Hiding taskbar");
            self.surface.set_visible(false);
            self.state.visible = false;
        } else {
            info!("Showing taskbar");
            self.surface.set_visible(true);
            self.surface.raise();
            self.state.visible = true;
            self.reposition();
        }
    }

    /// Apply progress reported by the animator
    pub fn on_animation_event(&mut self, event: AnimationEvent) {
        if !self.state.animating {
            debug!("Stray animation event {:?}", event);
            return;
        }

        match event {
            AnimationEvent::Step { width, .. } => {
                if let Some(screen) = self.screen {
                    let rect = self
                        .layout
                        .window_with_width(screen, self.state.corner, width);
                    self.surface.set_geometry(rect);
                }
            }
            AnimationEvent::Finished(Direction::Expand) => {
                self.surface.set_content(ContentLayout::Expanded);
                self.state.expanded = true;
                self.state.animating = false;
                self.reposition();
            }
            AnimationEvent::Finished(Direction::Collapse) => {
                // 收起后才重建方块布局，避免闪烁
                self.surface.set_content(ContentLayout::Collapsed);
                self.state.expanded = false;
                self.state.animating = false;
                if self.pending_corner_move {
                    self.pending_corner_move = false;
                    self.complete_corner_move();
                } else {
                    self.reposition();
                }
            }
        }
    }

    /// Place the window for the current corner and expansion state
    pub fn reposition(&mut self) {
        if let Some(rect) = self.current_geometry() {
            self.surface.set_geometry(rect);
        }
    }

    pub fn current_geometry(&self) -> Option<Rect> {
        self.screen.map(|screen| {
            self.layout
                .window(screen, self.state.corner, self.state.expanded)
        })
    }

    fn start_animation(&mut self, direction: Direction) {
        self.state.animating = true;
        let animation = Animation::new(direction, self.layout.config(), &self.animation);
        self.animator.start(animation);
    }

    fn complete_corner_move(&mut self) {
        self.state.corner = self.state.corner.next();
        info!("Moving to {}", self.state.corner);
        self.reposition();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        geometry: Vec<Rect>,
        content: Vec<ContentLayout>,
        visible: Vec<bool>,
        raised: usize,
    }

    impl Surface for RecordingSurface {
        fn set_geometry(&mut self, rect: Rect) {
            self.geometry.push(rect);
        }
        fn set_content(&mut self, content: ContentLayout) {
            self.content.push(content);
        }
        fn set_visible(&mut self, visible: bool) {
            self.visible.push(visible);
        }
        fn raise(&mut self) {
            self.raised += 1;
        }
    }

    #[derive(Default)]
    struct ManualAnimator {
        started: Vec<Animation>,
    }

    impl AnimationDriver for ManualAnimator {
        fn start(&mut self, animation: Animation) {
            self.started.push(animation);
        }
    }

    type TestController = Controller<RecordingSurface, ManualAnimator>;

    fn controller() -> TestController {
        let mut c = Controller::new(
            GeometryConfig::default(),
            AnimationConfig::default(),
            RecordingSurface::default(),
            ManualAnimator::default(),
        );
        c.set_screen(ScreenSize::new(1920, 1080));
        c
    }

    fn finish(c: &mut TestController) {
        let animation = *c.animator.started.last().unwrap();
        for width in animation.frames() {
            c.on_animation_event(AnimationEvent::Step {
                direction: animation.direction,
                width,
            });
        }
        c.on_animation_event(AnimationEvent::Finished(animation.direction));
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        assert_eq!(*c.state(), WidgetState::default());
        assert_eq!(c.surface().geometry.last(), Some(&Rect::new(20, 990, 70, 70)));
    }

    #[test]
    fn test_expanded_flips_only_after_animation() {
        let mut c = controller();
        c.toggle_expansion();
        assert!(c.state().animating);
        assert!(!c.state().expanded);
        assert_eq!(c.animator.started.len(), 1);

        finish(&mut c);
        assert!(c.state().expanded);
        assert!(!c.state().animating);
        assert_eq!(c.surface().content.last(), Some(&ContentLayout::Expanded));
        assert_eq!(c.surface().geometry.last(), Some(&Rect::new(20, 990, 400, 70)));
    }

    #[test]
    fn test_collapse_rebuilds_layout_after_shrink() {
        let mut c = controller();
        c.toggle_expansion();
        finish(&mut c);
        c.toggle_expansion();
        assert_eq!(c.surface().content.last(), Some(&ContentLayout::Expanded));

        let anim = *c.animator.started.last().unwrap();
        assert_eq!(anim.direction, Direction::Collapse);
        c.on_animation_event(AnimationEvent::Step {
            direction: Direction::Collapse,
            width: 200,
        });
        assert_eq!(c.surface().content.last(), Some(&ContentLayout::Expanded));

        c.on_animation_event(AnimationEvent::Finished(Direction::Collapse));
        assert_eq!(c.surface().content.last(), Some(&ContentLayout::Collapsed));
        assert!(!c.state().expanded);
    }

    #[test]
    fn test_expansion_gated_on_right_corners() {
        let mut c = controller();
        c.move_to_next_corner();
        c.move_to_next_corner();
        for _ in 0..2 {
            assert!(!c.state().corner.allows_expansion());
            let before = *c.state();
            c.toggle_expansion();
            assert_eq!(*c.state(), before);
            assert!(c.animator.started.is_empty());
            c.move_to_next_corner();
        }
    }

    #[test]
    fn test_corner_cycle_returns_after_four_moves() {
        let mut c = controller();
        let start = c.state().corner;
        let mut seen = Vec::new();
        for _ in 0..4 {
            c.move_to_next_corner();
            seen.push(c.state().corner);
        }
        assert_eq!(
            seen,
            vec![
                Corner::TopLeft,
                Corner::TopRight,
                Corner::BottomRight,
                Corner::BottomLeft
            ]
        );
        assert_eq!(c.state().corner, start);
    }

    #[test]
    fn test_reentrancy_guard_while_animating() {
        let mut c = controller();
        c.toggle_expansion();
        let before = *c.state();

        c.toggle_expansion();
        c.move_to_next_corner();
        assert_eq!(*c.state(), before);
        assert_eq!(c.animator.started.len(), 1);
    }

    #[test]
    fn test_corner_move_when_expanded_collapses_first() {
        let mut c = controller();
        c.toggle_expansion();
        finish(&mut c);

        c.move_to_next_corner();
        assert_eq!(c.state().corner, Corner::BottomLeft);
        assert!(c.state().animating);

        finish(&mut c);
        assert_eq!(c.state().corner, Corner::TopLeft);
        assert!(!c.state().expanded);
        assert_eq!(c.surface().geometry.last(), Some(&Rect::new(20, 20, 70, 70)));
    }

    #[test]
    fn test_visibility_round_trip() {
        let mut c = controller();
        c.move_to_next_corner();
        let before = c.surface().geometry.last().copied();

        c.toggle_visibility();
        assert!(!c.state().visible);
        c.toggle_visibility();
        assert!(c.state().visible);

        assert_eq!(c.surface().visible, vec![false, true]);
        assert_eq!(c.surface().raised, 1);
        assert_eq!(c.surface().geometry.last().copied(), before);
    }

    #[test]
    fn test_execute_dispatches() {
        let mut c = controller();
        c.execute(HotkeyCommand::CornerCycle);
        assert_eq!(c.state().corner, Corner::TopLeft);
        c.execute(HotkeyCommand::VisibilityToggle);
        assert!(!c.state().visible);
        c.execute(HotkeyCommand::ExpandToggle);
        assert!(c.state().animating);
    }

    #[test]
    fn test_screen_change_repositions() {
        let mut c = controller();
        c.set_screen(ScreenSize::new(1280, 720));
        assert_eq!(c.surface().geometry.last(), Some(&Rect::new(20, 630, 70, 70)));
        let count = c.surface().geometry.len();
        c.set_screen(ScreenSize::new(1280, 720));
        assert_eq!(c.surface().geometry.len(), count);
    }
}
