//! Width slide animation between the square and the expanded bar

use crate::config::{AnimationConfig, GeometryConfig};
use crate::queue::{CommandSink, ControlMessage};
use log::{debug, warn};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Expand,
    Collapse,
}

/// Progress reported back to the UI loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    Step { direction: Direction, width: u32 },
    Finished(Direction),
}

/// A linear width interpolation over a fixed number of steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub direction: Direction,
    pub from: u32,
    pub to: u32,
    pub steps: u32,
    pub step_delay: Duration,
}

impl Animation {
    pub fn new(direction: Direction, geometry: &GeometryConfig, config: &AnimationConfig) -> Self {
        let (from, to) = match direction {
            Direction::Expand => (geometry.square_size, geometry.expanded_width),
            Direction::Collapse => (geometry.expanded_width, geometry.square_size),
        };
        Self {
            direction,
            from,
            to,
            steps: config.steps.max(1),
            step_delay: Duration::from_millis(config.step_delay_ms),
        }
    }

    /// Widths for every frame, both endpoints included (`steps + 1` frames)
    pub fn frames(&self) -> Vec<u32> {
        let from = self.from as f64;
        let delta = self.to as f64 - from;
        let steps = self.steps.max(1);
        (0..=steps)
            .map(|i| (from + delta * i as f64 / steps as f64) as u32)
            .collect()
    }

    pub fn duration(&self) -> Duration {
        self.step_delay * (self.steps + 1)
    }
}

/// Starts animations. The controller never sleeps itself.
pub trait AnimationDriver {
    fn start(&mut self, animation: Animation);
}

/// Runs each animation on its own worker thread and reports through the queue
#[derive(Debug, Clone)]
pub struct ThreadedAnimator {
    sink: CommandSink,
}

impl ThreadedAnimator {
    pub fn new(sink: CommandSink) -> Self {
        Self { sink }
    }
}

impl AnimationDriver for ThreadedAnimator {
    fn start(&mut self, animation: Animation) {
        let sink = self.sink.clone();
        let spawned = thread::Builder::new()
            .name("animator".to_string())
            .spawn(move || run_animation(animation, &sink));

        if let Err(e) = spawned {
            // 线程起不来就直接跳到终点，避免忙标志永远不清
            warn!("Failed to spawn animation thread: {}", e);
            self.sink
                .send(ControlMessage::Animation(AnimationEvent::Finished(
                    animation.direction,
                )));
        }
    }
}

fn run_animation(animation: Animation, sink: &CommandSink) {
    debug!(
        "Animating {:?} {} -> {} in {} steps",
        animation.direction, animation.from, animation.to, animation.steps
    );
    for width in animation.frames() {
        let step = AnimationEvent::Step {
            direction: animation.direction,
            width,
        };
        if !sink.send(ControlMessage::Animation(step)) {
            return;
        }
        thread::sleep(animation.step_delay);
    }
    sink.send(ControlMessage::Animation(AnimationEvent::Finished(
        animation.direction,
    )));
}
