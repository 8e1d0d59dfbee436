//! User-facing notices
//!
//! The core reports every outcome as a `(level, message)` pair. Front-ends
//! decide how to show it; a notice stops being current after [`NOTICE_TTL`].

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::common::Error;

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: Instant,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTICE_TTL
    }
}

impl From<&Error> for Notice {
    fn from(e: &Error) -> Self {
        Self::error(e.to_string())
    }
}

/// Holds the most recent notice until it expires
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    /// Replace the current notice
    pub fn post(&mut self, notice: Notice) {
        self.current = Some(notice);
    }

    /// The current notice, if it has not yet expired
    pub fn current(&mut self, now: Instant) -> Option<&Notice> {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
        }
        self.current.as_ref()
    }
}
