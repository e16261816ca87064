// ── Notifications ──

use std::fmt;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A transient user-facing message (rendered as a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn new(level: NotificationLevel, msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level,
        }
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, msg)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, msg)
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, msg)
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, msg)
    }

    /// `"API Error: <message>"`, the wording used for every failed request.
    pub fn api_error(message: &str) -> Self {
        Self::error(format!("API Error: {message}"))
    }
}
