use tracing::info;

use super::animator::Animator;
use super::scheduler::{Millis, Tick};
use crate::config::types::ContactConfig;
use crate::error::{FolioError, Result};

pub const LABEL_IDLE: &str = "Send Message";
pub const LABEL_SENDING: &str = "Sending...";
pub const LABEL_SENT: &str = "Message Sent!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FolioError::InvalidMessage("name is required".into()));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((user, host)) if !user.is_empty() && !host.is_empty() => {}
            _ => {
                return Err(FolioError::InvalidMessage(format!(
                    "'{}' is not an email address",
                    email
                )));
            }
        }
        if self.message.trim().is_empty() {
            return Err(FolioError::InvalidMessage("message is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Sending,
    Sent,
}

impl FormPhase {
    pub fn label(&self) -> &'static str {
        match self {
            FormPhase::Idle => LABEL_IDLE,
            FormPhase::Sending => LABEL_SENDING,
            FormPhase::Sent => LABEL_SENT,
        }
    }
}

/// One simulated submission: `Sending` for `sending_ms`, `Sent` for
/// `reset_ms`, then back to `Idle`. Nothing leaves the process.
#[derive(Debug, Clone)]
pub struct Submission {
    message: ContactMessage,
    phase: FormPhase,
    sending_ms: Millis,
    reset_ms: Millis,
}

impl Submission {
    pub fn new(message: ContactMessage, cfg: &ContactConfig) -> Result<Self> {
        message.validate()?;
        Ok(Self {
            message,
            phase: FormPhase::Idle,
            sending_ms: cfg.sending_ms,
            reset_ms: cfg.reset_ms,
        })
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn advance(&mut self) -> Tick {
        match self.phase {
            FormPhase::Idle => {
                self.phase = FormPhase::Sending;
                Tick::After(self.sending_ms)
            }
            FormPhase::Sending => {
                info!(from = %self.message.email, "contact message sent (simulated)");
                self.phase = FormPhase::Sent;
                Tick::After(self.reset_ms)
            }
            FormPhase::Sent => {
                self.phase = FormPhase::Idle;
                Tick::Done
            }
        }
    }
}

impl Animator for Submission {
    fn name(&self) -> &str {
        "contact-form"
    }

    fn step(&mut self, _now: Millis) -> Tick {
        self.advance()
    }

    fn render(&self) -> String {
        self.phase.label().to_string()
    }
}
