//! Due-state classification and due-date notifications.
//!
//! Notifications are not de-duplicated: every call to
//! [`DueStateClassifier::notify`] fires again for every matching task.
//! Callers that re-evaluate on each refresh will re-notify on each refresh.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Task;
use crate::notify::Notifier;
use crate::storage::NotificationsConfig;

/// Display bucket of a task relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    /// Completed; no longer tracked against its due date.
    Done,
    /// Due date has passed.
    Overdue,
    /// Due within the due-soon window.
    DueSoon,
    /// Due later than the window.
    Upcoming,
}

/// Classifies tasks and raises due-date notifications.
#[derive(Debug, Clone)]
pub struct DueStateClassifier {
    window: Duration,
    reminder_delay: Duration,
}

impl Default for DueStateClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DueStateClassifier {
    /// 24-hour window; due-soon reminders delivered 5 seconds out.
    pub fn new() -> Self {
        Self {
            window: Duration::hours(24),
            reminder_delay: Duration::seconds(5),
        }
    }

    /// Values chrono cannot represent fall back to the defaults.
    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self {
            window: Duration::try_hours(config.due_soon_hours)
                .unwrap_or_else(|| Duration::hours(24)),
            reminder_delay: Duration::try_seconds(config.due_soon_delay_secs)
                .unwrap_or_else(|| Duration::seconds(5)),
        }
    }

    /// Open task whose deadline is at most `window` away. Overdue tasks
    /// satisfy this too.
    pub fn is_due_soon(&self, task: &Task, now: DateTime<Utc>) -> bool {
        !task.completed && task.due_at() - now <= self.window
    }

    /// Open task whose deadline has passed.
    pub fn is_overdue(&self, task: &Task, now: DateTime<Utc>) -> bool {
        !task.completed && task.due_at() < now
    }

    /// Exclusive bucket for display. Overdue wins over due-soon.
    pub fn classify(&self, task: &Task, now: DateTime<Utc>) -> DueState {
        if task.completed {
            DueState::Done
        } else if self.is_overdue(task, now) {
            DueState::Overdue
        } else if self.is_due_soon(task, now) {
            DueState::DueSoon
        } else {
            DueState::Upcoming
        }
    }

    /// Evaluate both predicates independently for every unarchived task
    /// and notify. An overdue task gets both notifications. Returns the
    /// number of notifications sent.
    pub fn notify(&self, tasks: &[Task], now: DateTime<Utc>, notifier: &dyn Notifier) -> usize {
        let mut sent = 0;
        for task in tasks.iter().filter(|t| !t.archived) {
            if self.is_due_soon(task, now) {
                notifier.schedule_at(
                    now.checked_add_signed(self.reminder_delay).unwrap_or(now),
                    &format!("Reminder: The task \"{}\" is due tomorrow!", task.title),
                );
                sent += 1;
            }
            if self.is_overdue(task, now) {
                notifier.fire_now(&format!(
                    "The task \"{}\" is overdue! Please complete it as soon as possible.",
                    task.title
                ));
                sent += 1;
            }
        }
        if sent > 0 {
            tracing::info!(sent, "due-date notifications raised");
        }
        sent
    }
}

/// Classify with the default 24-hour window.
pub fn classify(task: &Task, now: DateTime<Utc>) -> DueState {
    DueStateClassifier::new().classify(task, now)
}

/// Notify with the default 24-hour window.
pub fn notify_due_tasks(tasks: &[Task], now: DateTime<Utc>, notifier: &dyn Notifier) -> usize {
    DueStateClassifier::new().notify(tasks, now, notifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Delivery, RecordingNotifier};
    use crate::task::test_task;
    use chrono::TimeZone;

    fn noon_aug_29() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 29, 12, 0, 0).unwrap()
    }

    #[test]
    fn buckets_by_due_date() {
        let now = noon_aug_29();
        assert_eq!(classify(&test_task("a", "2024-08-28", false), now), DueState::Overdue);
        assert_eq!(classify(&test_task("b", "2024-08-30", false), now), DueState::DueSoon);
        assert_eq!(classify(&test_task("c", "2024-09-02", false), now), DueState::Upcoming);
        assert_eq!(classify(&test_task("d", "2024-08-01", true), now), DueState::Done);
    }

    #[test]
    fn window_edge_is_inclusive() {
        let task = test_task("a", "2024-08-30", false);
        let exactly_24h_before = Utc.with_ymd_and_hms(2024, 8, 29, 0, 0, 0).unwrap();
        let just_outside = exactly_24h_before - Duration::seconds(1);
        assert_eq!(classify(&task, exactly_24h_before), DueState::DueSoon);
        assert_eq!(classify(&task, just_outside), DueState::Upcoming);
    }

    #[test]
    fn completed_and_archived_tasks_stay_quiet() {
        let mut archived = test_task("a", "2024-08-28", false);
        archived.archived = true;
        let tasks = vec![archived, test_task("b", "2024-08-28", true)];
        let notifier = RecordingNotifier::new();
        assert_eq!(notify_due_tasks(&tasks, noon_aug_29(), &notifier), 0);
        assert!(notifier.is_empty());
    }

    #[test]
    fn overdue_task_gets_both_notifications() {
        let now = noon_aug_29();
        let notifier = RecordingNotifier::new();
        let tasks = vec![test_task("a", "2024-08-28", false)];

        assert_eq!(notify_due_tasks(&tasks, now, &notifier), 2);
        let sent = notifier.sent();
        assert_eq!(
            sent[0].delivery,
            Delivery::Scheduled {
                at: now + Duration::seconds(5)
            }
        );
        assert_eq!(sent[0].message, "Reminder: The task \"Task a\" is due tomorrow!");
        assert_eq!(sent[1].delivery, Delivery::Immediate);
        assert!(sent[1].message.contains("is overdue"));
    }

    #[test]
    fn repeated_evaluation_fires_again() {
        let now = noon_aug_29();
        let notifier = RecordingNotifier::new();
        let tasks = vec![test_task("b", "2024-08-30", false)];

        notify_due_tasks(&tasks, now, &notifier);
        notify_due_tasks(&tasks, now, &notifier);
        assert_eq!(notifier.len(), 2);
    }

    #[test]
    fn window_follows_config() {
        let mut config = NotificationsConfig::default();
        config.due_soon_hours = 96;
        let classifier = DueStateClassifier::from_config(&config);
        let task = test_task("c", "2024-09-02", false);
        assert_eq!(classifier.classify(&task, noon_aug_29()), DueState::DueSoon);
    }

    #[test]
    fn unrepresentable_config_falls_back_to_defaults() {
        let mut config = NotificationsConfig::default();
        config.due_soon_hours = i64::MAX;
        config.due_soon_delay_secs = i64::MIN;
        let classifier = DueStateClassifier::from_config(&config);
        let notifier = RecordingNotifier::new();
        let task = test_task("d", "2024-08-30", false);
        assert_eq!(classifier.classify(&task, noon_aug_29()), DueState::DueSoon);
        assert_eq!(classifier.notify(&[task], noon_aug_29(), &notifier), 1);
        assert_eq!(
            notifier.sent()[0].delivery,
            Delivery::Scheduled {
                at: noon_aug_29() + Duration::seconds(5)
            }
        );
    }
}
