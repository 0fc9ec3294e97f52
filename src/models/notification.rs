//! Transient, user-visible messages produced by controller operations.

use serde::Serialize;
use strum::Display;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Error,
}

/// A message for the operator, analogous to a toast in a web UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    /// Follow-up the operator can take, e.g. retrying a failed fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: Level::Info, message: message.into(), hint: None }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: Level::Success, message: message.into(), hint: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: Level::Error, message: message.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}
