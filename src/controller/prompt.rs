//! Capabilities the controller needs from its host: asking the operator
//! to confirm a mutation, and showing transient notifications.

use std::sync::Mutex;

use crate::models::Notification;

/// A confirmation request shown before a mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    /// Label of the accepting choice, e.g. "Block" or "Delete".
    pub confirm_label: String,
    /// Irreversible operations are rendered with a stronger warning.
    pub destructive: bool,
}

impl Prompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>, confirm_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: confirm_label.into(),
            destructive: false,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

/// Asks the operator to accept or decline a prompt.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &Prompt) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&Prompt) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &Prompt) -> bool {
        self(prompt)
    }
}

/// Accepts every prompt (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &Prompt) -> bool {
        true
    }
}

/// Receives notifications produced by controller operations.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that keeps every notification in memory.
///
/// Lets tests and embedders inspect what an operation reported.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far, oldest first.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries().pop()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notification);
    }
}
