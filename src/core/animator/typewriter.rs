use super::Animator;
use crate::config::types::HeroConfig;
use crate::core::scheduler::{Millis, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    PausingFull,
    Deleting,
    PausingEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_ms: Millis,
    pub delete_ms: Millis,
    pub pause_full_ms: Millis,
    pub pause_empty_ms: Millis,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self::from(&HeroConfig::default())
    }
}

impl From<&HeroConfig> for TypewriterTiming {
    fn from(cfg: &HeroConfig) -> Self {
        Self {
            type_ms: cfg.type_ms,
            delete_ms: cfg.delete_ms,
            pause_full_ms: cfg.pause_full_ms,
            pause_empty_ms: cfg.pause_empty_ms,
        }
    }
}

/// Types a phrase one character per tick, holds it, deletes it faster than
/// it was typed, holds the empty line, then moves on to the next phrase.
/// The phrase list wraps forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    index: usize,
    shown: usize,
    phase: Phase,
    timing: TypewriterTiming,
    completed: usize,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>, timing: TypewriterTiming) -> Self {
        Self {
            phrases,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
            timing,
            completed: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// Number of phrases fully typed and deleted so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn current_phrase(&self) -> &str {
        self.phrases.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// The visible prefix of the current phrase.
    pub fn text(&self) -> &str {
        let phrase = self.current_phrase();
        let end = phrase
            .char_indices()
            .nth(self.shown)
            .map(|(i, _)| i)
            .unwrap_or(phrase.len());
        &phrase[..end]
    }

    /// One state-machine step. Leaving a pause performs the first edit of the
    /// next phase immediately, so the text never sits still for an extra tick.
    pub fn advance(&mut self) -> Tick {
        if self.phrases.is_empty() {
            return Tick::Done;
        }
        match self.phase {
            Phase::Typing => self.type_char(),
            Phase::PausingFull => {
                self.phase = Phase::Deleting;
                self.delete_char()
            }
            Phase::Deleting => self.delete_char(),
            Phase::PausingEmpty => {
                self.phase = Phase::Typing;
                self.type_char()
            }
        }
    }

    fn type_char(&mut self) -> Tick {
        let len = self.current_phrase().chars().count();
        if self.shown < len {
            self.shown += 1;
        }
        if self.shown >= len {
            self.phase = Phase::PausingFull;
            Tick::After(self.timing.pause_full_ms)
        } else {
            Tick::After(self.timing.type_ms)
        }
    }

    fn delete_char(&mut self) -> Tick {
        self.shown = self.shown.saturating_sub(1);
        if self.shown == 0 {
            self.phase = Phase::PausingEmpty;
            self.index = (self.index + 1) % self.phrases.len();
            self.completed += 1;
            Tick::After(self.timing.pause_empty_ms)
        } else {
            Tick::After(self.timing.delete_ms)
        }
    }
}

impl Animator for Typewriter {
    fn name(&self) -> &str {
        "typewriter"
    }

    fn step(&mut self, _now: Millis) -> Tick {
        self.advance()
    }

    fn render(&self) -> String {
        self.text().to_string()
    }
}
