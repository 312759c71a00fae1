use super::Animator;
use crate::core::scheduler::{Millis, Tick};

const WINDOW_MS: Millis = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpsClass {
    Good,
    Fair,
    Poor,
}

impl FpsClass {
    pub fn from_fps(fps: u32) -> Self {
        match fps {
            55.. => FpsClass::Good,
            30..=54 => FpsClass::Fair,
            _ => FpsClass::Poor,
        }
    }
}

/// Rolling one-second frame counter.
#[derive(Debug, Clone)]
pub struct FpsSampler {
    frame_ms: Millis,
    frames: u32,
    window_start: Option<Millis>,
    fps: Option<u32>,
}

impl FpsSampler {
    pub fn new(frame_ms: Millis) -> Self {
        Self {
            frame_ms: frame_ms.max(1),
            frames: 0,
            window_start: None,
            fps: None,
        }
    }

    /// Record a frame rendered at `now`. The first frame opens the window;
    /// once a second or more has passed, publishes and resets.
    pub fn frame(&mut self, now: Millis) -> Option<u32> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return None;
        };
        self.frames += 1;
        let elapsed = now.saturating_sub(start);
        if elapsed < WINDOW_MS {
            return None;
        }
        let fps = (self.frames as f64 * 1000.0 / elapsed as f64).round() as u32;
        self.fps = Some(fps);
        self.frames = 0;
        self.window_start = Some(now);
        Some(fps)
    }

    /// Last published value.
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }
}

impl Animator for FpsSampler {
    fn name(&self) -> &str {
        "fps"
    }

    fn step(&mut self, now: Millis) -> Tick {
        self.frame(now);
        Tick::After(self.frame_ms)
    }

    fn render(&self) -> String {
        match self.fps {
            Some(fps) => fps.to_string(),
            None => "--".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_once_per_window() {
        let mut sampler = FpsSampler::new(20);
        let mut published = Vec::new();
        for t in (0..=2000).step_by(20) {
            if let Some(fps) = sampler.frame(t) {
                published.push((t, fps));
            }
        }
        assert_eq!(published, vec![(1000, 50), (2000, 50)]);
    }

    #[test]
    fn rounds_uneven_windows() {
        let mut sampler = FpsSampler::new(16);
        let mut last = None;
        for t in (0..=1008).step_by(16) {
            last = sampler.frame(t).or(last);
        }
        // 63 frames over 1008ms
        assert_eq!(last, Some(63));
        assert_eq!(sampler.render(), "63");
    }

    #[test]
    fn nothing_published_before_a_second() {
        let mut sampler = FpsSampler::new(16);
        for t in (0..999).step_by(16) {
            assert_eq!(sampler.frame(t), None);
        }
        assert_eq!(sampler.render(), "--");
    }

    #[test]
    fn classes() {
        assert_eq!(FpsClass::from_fps(60), FpsClass::Good);
        assert_eq!(FpsClass::from_fps(55), FpsClass::Good);
        assert_eq!(FpsClass::from_fps(54), FpsClass::Fair);
        assert_eq!(FpsClass::from_fps(30), FpsClass::Fair);
        assert_eq!(FpsClass::from_fps(12), FpsClass::Poor);
    }
}
