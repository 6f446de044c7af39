//! Lead-time reminders before a class starts.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notify::Notifier;
use crate::storage::NotificationsConfig;
use crate::validation::non_blank;

/// Why a reminder exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReminderKind {
    /// "Class starts in N minutes".
    LeadTime { minutes: i64 },
    /// Packing note, delivered with the earliest lead-time reminder.
    Packing,
}

/// A reminder ready to hand to the notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassReminder {
    pub at: DateTime<Utc>,
    pub kind: ReminderKind,
    pub message: String,
}

/// Derives reminder timestamps from a class start.
#[derive(Debug, Clone)]
pub struct ClassReminderScheduler {
    offsets_min: Vec<i64>,
}

impl Default for ClassReminderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassReminderScheduler {
    /// 60, 30 and 20 minutes before the start.
    pub fn new() -> Self {
        Self {
            offsets_min: vec![60, 30, 20],
        }
    }

    pub fn with_offsets(offsets_min: Vec<i64>) -> Self {
        Self { offsets_min }
    }

    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self::with_offsets(config.class_reminder_offsets_min.clone())
    }

    pub fn offsets(&self) -> &[i64] {
        &self.offsets_min
    }

    /// One reminder per offset, each subtracted from `start` on its own,
    /// plus a packing reminder at the largest offset when a note is given.
    pub fn plan(
        &self,
        start: DateTime<Utc>,
        class_name: &str,
        packing_note: Option<&str>,
    ) -> Vec<ClassReminder> {
        let mut reminders: Vec<ClassReminder> = self
            .offsets_min
            .iter()
            .filter_map(|&minutes| {
                Some(ClassReminder {
                    at: before(start, minutes)?,
                    kind: ReminderKind::LeadTime { minutes },
                    message: format!(
                        "Class Reminder: {class_name} starts in {}",
                        lead_time_label(minutes)
                    ),
                })
            })
            .collect();

        let earliest = reminders.iter().map(|r| r.at).min();
        if let (Some(note), Some(at)) = (non_blank(packing_note), earliest) {
            reminders.push(ClassReminder {
                at,
                kind: ReminderKind::Packing,
                message: format!("Reminder: {note}"),
            });
        }

        reminders
    }

    /// Plan and hand every reminder to `notifier`. Returns what was sent.
    pub fn schedule(
        &self,
        notifier: &dyn Notifier,
        start: DateTime<Utc>,
        class_name: &str,
        packing_note: Option<&str>,
    ) -> Vec<ClassReminder> {
        let reminders = self.plan(start, class_name, packing_note);
        for reminder in &reminders {
            notifier.schedule_at(reminder.at, &reminder.message);
        }
        tracing::debug!(class_name, count = reminders.len(), "class reminders scheduled");
        reminders
    }
}

/// `start` minus `minutes`, or `None` when the offset is out of range.
fn before(start: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    let at = Duration::try_minutes(minutes).and_then(|d| start.checked_sub_signed(d));
    if at.is_none() {
        tracing::warn!(minutes, "class reminder offset out of range, skipped");
    }
    at
}

fn lead_time_label(minutes: i64) -> String {
    match minutes {
        60 => "1 hour".to_string(),
        m if m % 60 == 0 => format!("{} hours", m / 60),
        1 => "1 minute".to_string(),
        m => format!("{m} minutes"),
    }
}

/// The start instant of a class meeting at `time` on `date`.
pub fn class_start_on(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Delivery, RecordingNotifier};
    use chrono::TimeZone;

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn three_reminders_without_packing_note() {
        let reminders = ClassReminderScheduler::new().plan(nine_am(), "Chemistry", None);
        let times: Vec<_> = reminders.iter().map(|r| r.at).collect();
        assert_eq!(
            times,
            vec![
                nine_am() - Duration::minutes(60),
                nine_am() - Duration::minutes(30),
                nine_am() - Duration::minutes(20),
            ]
        );
        assert_eq!(reminders[0].message, "Class Reminder: Chemistry starts in 1 hour");
        assert_eq!(
            reminders[2].message,
            "Class Reminder: Chemistry starts in 20 minutes"
        );
    }

    #[test]
    fn packing_note_adds_fourth_reminder_at_one_hour() {
        let reminders =
            ClassReminderScheduler::new().plan(nine_am(), "Chemistry", Some("Bring lab coat"));
        assert_eq!(reminders.len(), 4);
        let packing = &reminders[3];
        assert_eq!(packing.kind, ReminderKind::Packing);
        assert_eq!(packing.at, nine_am() - Duration::hours(1));
        assert_eq!(packing.message, "Reminder: Bring lab coat");
    }

    #[test]
    fn blank_packing_note_is_ignored() {
        let reminders = ClassReminderScheduler::new().plan(nine_am(), "Chemistry", Some("   "));
        assert_eq!(reminders.len(), 3);
    }

    #[test]
    fn schedule_hands_everything_to_notifier() {
        let notifier = RecordingNotifier::new();
        let sent = ClassReminderScheduler::new().schedule(
            &notifier,
            nine_am(),
            "Art",
            Some("Sketchbook"),
        );
        let recorded = notifier.sent();
        assert_eq!(recorded.len(), sent.len());
        assert_eq!(
            recorded[1].delivery,
            Delivery::Scheduled {
                at: nine_am() - Duration::minutes(30)
            }
        );
    }

    #[test]
    fn custom_offsets_from_config() {
        let mut config = NotificationsConfig::default();
        config.class_reminder_offsets_min = vec![120, 5];
        let reminders =
            ClassReminderScheduler::from_config(&config).plan(nine_am(), "Math", Some("Ruler"));
        assert_eq!(reminders[0].message, "Class Reminder: Math starts in 2 hours");
        assert_eq!(reminders[1].message, "Class Reminder: Math starts in 5 minutes");
        assert_eq!(reminders[2].at, nine_am() - Duration::hours(2));
    }

    #[test]
    fn out_of_range_offsets_are_skipped() {
        let scheduler = ClassReminderScheduler::with_offsets(vec![i64::MAX, 30, i64::MIN]);
        let reminders = scheduler.plan(nine_am(), "Math", Some("Ruler"));
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].at, nine_am() - Duration::minutes(30));
        assert_eq!(reminders[1].kind, ReminderKind::Packing);
        assert_eq!(reminders[1].at, nine_am() - Duration::minutes(30));
    }

    #[test]
    fn start_is_anchored_on_given_day() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(class_start_on(date, time), nine_am());
    }
}
