//! Mocked assistant chat for the wizard side panel.
//!
//! Messages are appended to the log immediately; the assistant's canned
//! reply is parked in a [`DeferredQueue`] and appended when the owner polls
//! past its deadline.

use super::models::WizardStep;
use super::timer::{DeferredQueue, TimerHandle};
use std::time::{Duration, Instant};

pub const USER_PREFIX: &str = "You: ";
pub const ASSISTANT_PREFIX: &str = "AI Assistant: ";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

const GREETING: &str = "Hi! I'm here to help you apply for Australian government grants. \
Let's start by gathering some basic information about your business.";

/// Canned assistant reply for a wizard step. Steps without a reply map to
/// the empty string.
pub fn canned_reply(step: WizardStep) -> &'static str {
    match step {
        WizardStep::BusinessDetails => {
            "Great! Based on your information, I can help you find relevant grants. \
Let me search for grants that match your criteria."
        }
        WizardStep::GrantDiscovery => "",
        WizardStep::ApplicationGuidance => {
            "Perfect! I'll guide you through the application process step by step. \
Here's what you'll need to prepare..."
        }
        WizardStep::ComplianceCheck => {
            "Let me check your documentation for compliance with Australian grant requirements..."
        }
        WizardStep::SubmitApplication => {
            "Excellent! Your application looks ready. \
I'll help you submit it to the relevant government portal."
        }
    }
}

#[derive(Debug)]
pub struct ChatResponder {
    log: Vec<String>,
    replies: DeferredQueue<String>,
    reply_delay: Duration,
}

impl Default for ChatResponder {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl ChatResponder {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            log: vec![format!("{ASSISTANT_PREFIX}{GREETING}")],
            replies: DeferredQueue::default(),
            reply_delay,
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Appends the user's message and schedules the reply for `step`.
    /// Blank input and a disposed responder are no-ops.
    pub fn send(&mut self, text: &str, step: WizardStep, now: Instant) -> Option<TimerHandle> {
        if text.trim().is_empty() || self.replies.is_disposed() {
            return None;
        }
        self.log.push(format!("{USER_PREFIX}{text}"));
        let reply = format!("{ASSISTANT_PREFIX}{}", canned_reply(step));
        self.replies.schedule(now + self.reply_delay, reply)
    }

    /// Appends every reply whose deadline has passed. Returns how many were
    /// appended.
    pub fn poll(&mut self, now: Instant) -> usize {
        let due = self.replies.drain_due(now);
        let count = due.len();
        self.log.extend(due);
        count
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.replies.cancel(handle)
    }

    pub fn awaiting_reply(&self) -> bool {
        !self.replies.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.replies.next_deadline()
    }

    /// Teardown: scheduled replies are dropped and nothing is appended from
    /// here on.
    pub fn dispose(&mut self) {
        self.replies.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.replies.is_disposed()
    }
}

pub fn is_user_entry(entry: &str) -> bool {
    entry.starts_with(USER_PREFIX)
}
