//! Transient toast notifications raised by actions.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Queue of toasts waiting to be shown.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    queue: Mutex<VecDeque<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, notification: Notification) {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.push_back(notification);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Notification::success(message));
    }

    /// Error toasts are not queued twice while an identical one is still pending.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let duplicate = queue
            .iter()
            .any(|n| n.level == NotificationLevel::Error && n.message == message);
        if !duplicate {
            queue.push_back(Notification::error(message));
        }
    }

    pub fn drain(&self) -> Vec<Notification> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        let queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.is_empty()
    }
}
