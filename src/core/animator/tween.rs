use super::Animator;
use crate::config::types::TweenConfig;
use crate::core::scheduler::{Millis, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenKind {
    /// Integer counter, rendered as the bare number.
    Counter,
    /// Bar fill, rendered as a percentage and capped at 100.
    SkillBar,
}

/// Linear 0 → target animation over a fixed duration. The increment is
/// `target / (duration / tick)`, and the last step lands exactly on the
/// target. Once done, further steps change nothing.
#[derive(Debug, Clone)]
pub struct Tween {
    kind: TweenKind,
    target: u32,
    increment: f64,
    current: f64,
    shown: u32,
    tick_ms: Millis,
    done: bool,
}

impl Tween {
    pub fn new(kind: TweenKind, target: u32, duration_ms: Millis, tick_ms: Millis) -> Self {
        let target = match kind {
            TweenKind::Counter => target,
            TweenKind::SkillBar => target.min(100),
        };
        let tick_ms = tick_ms.max(1);
        let ticks = (duration_ms as f64 / tick_ms as f64).max(1.0);
        Self {
            kind,
            target,
            increment: target as f64 / ticks,
            current: 0.0,
            shown: 0,
            tick_ms,
            done: false,
        }
    }

    pub fn counter(target: u32, cfg: &TweenConfig) -> Self {
        Self::new(TweenKind::Counter, target, cfg.duration_ms, cfg.tick_ms)
    }

    /// A skill bar filling to `level` percent; out-of-range levels are clamped.
    pub fn skill_bar(level: f64, cfg: &TweenConfig) -> Self {
        let percent = if level.is_finite() {
            level.round().clamp(0.0, 100.0) as u32
        } else {
            0
        };
        Self::new(TweenKind::SkillBar, percent, cfg.duration_ms, cfg.tick_ms)
    }

    pub fn kind(&self) -> TweenKind {
        self.kind
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// The displayed value.
    pub fn value(&self) -> u32 {
        self.shown
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn advance(&mut self) -> Tick {
        if self.done {
            return Tick::Done;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.shown = self.target;
            self.done = true;
            Tick::Done
        } else {
            self.shown = (self.current.floor() as u32).min(self.target);
            Tick::After(self.tick_ms)
        }
    }
}

impl Animator for Tween {
    fn name(&self) -> &str {
        match self.kind {
            TweenKind::Counter => "counter",
            TweenKind::SkillBar => "skill-bar",
        }
    }

    fn step(&mut self, _now: Millis) -> Tick {
        self.advance()
    }

    fn render(&self) -> String {
        match self.kind {
            TweenKind::Counter => self.shown.to_string(),
            TweenKind::SkillBar => format!("{}%", self.shown),
        }
    }
}
