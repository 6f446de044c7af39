//! Notification delivery seam.
//!
//! Reminders are handed to an external notification service through the
//! [`Notifier`] trait. Delivery is fire-and-forget: nothing is returned,
//! nothing is retried, and the same message may be scheduled twice if the
//! caller asks twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// External notification service.
pub trait Notifier: Send + Sync {
    /// Deliver `message` at `at`.
    fn schedule_at(&self, at: DateTime<Utc>, message: &str);

    /// Deliver `message` immediately.
    fn fire_now(&self, message: &str);
}

/// When a recorded notification was meant to be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delivery {
    Scheduled { at: DateTime<Utc> },
    Immediate,
}

/// A notification handed to a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub delivery: Delivery,
    pub message: String,
}

/// Notifier that writes every notification to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn schedule_at(&self, at: DateTime<Utc>, message: &str) {
        tracing::info!(at = %at.to_rfc3339(), "scheduled notification: {message}");
    }

    fn fire_now(&self, message: &str) {
        tracing::info!("notification: {message}");
    }
}

/// Notifier that keeps everything it was given, in order.
///
/// Used by tests and by the CLI to print what would be delivered.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notifications recorded so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

impl Notifier for RecordingNotifier {
    fn schedule_at(&self, at: DateTime<Utc>, message: &str) {
        self.push(Notification {
            delivery: Delivery::Scheduled { at },
            message: message.to_string(),
        });
    }

    fn fire_now(&self, message: &str) {
        self.push(Notification {
            delivery: Delivery::Immediate,
            message: message.to_string(),
        });
    }
}

/// Notifier that drops everything. Used when notifications are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedNotifier;

impl Notifier for MutedNotifier {
    fn schedule_at(&self, _at: DateTime<Utc>, _message: &str) {}

    fn fire_now(&self, _message: &str) {}
}
