//! Timed UI state machines. Each animator owns its own state and is driven
//! one step at a time by the [`Scheduler`](crate::core::scheduler::Scheduler).

pub mod fps;
pub mod tween;
pub mod typewriter;

use tracing::debug;

use super::scheduler::{Millis, Task, Tick};
use super::view::Surface;

pub use fps::{FpsClass, FpsSampler};
pub use tween::{Tween, TweenKind};
pub use typewriter::{Phase, Typewriter, TypewriterTiming};

pub trait Animator {
    fn name(&self) -> &str;

    /// Advance one step. The returned delay is measured from `now`.
    fn step(&mut self, now: Millis) -> Tick;

    /// Current display text.
    fn render(&self) -> String;
}

/// An animator bound to one widget. When the widget is gone at tick time the
/// task finishes instead of writing into nothing.
pub struct Bound<A> {
    animator: A,
    target: String,
}

impl<A: Animator> Bound<A> {
    pub fn new(animator: A, target: impl Into<String>) -> Self {
        Self {
            animator,
            target: target.into(),
        }
    }
}

impl<A: Animator> Task<Surface> for Bound<A> {
    fn name(&self) -> &str {
        self.animator.name()
    }

    fn tick(&mut self, now: Millis, surface: &mut Surface) -> Tick {
        let Some(widget) = surface.widget_mut(&self.target) else {
            debug!(animator = self.animator.name(), target = %self.target, "widget removed, stopping");
            return Tick::Done;
        };
        let tick = self.animator.step(now);
        widget.text = self.animator.render();
        tick
    }
}
