//! Short-lived success/error notifications.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

/// Oldest toasts are dropped past this many
const MAX_TOASTS: usize = 5;

/// How long a toast stays visible
const TOAST_LIFETIME_SECS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(TOAST_LIFETIME_SECS)
    }
}

#[derive(Debug, Default)]
pub struct Toasts {
    queue: VecDeque<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.push_at(kind, message, Utc::now());
    }

    pub fn push_success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: DateTime<Utc>) {
        let message = message.into();
        if message.trim().is_empty() {
            return;
        }
        self.queue.push_back(Toast {
            kind,
            message,
            created_at: now,
        });
        while self.queue.len() > MAX_TOASTS {
            self.queue.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.queue.back()
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.queue.retain(|t| !t.is_expired(now));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
