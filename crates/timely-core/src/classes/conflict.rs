//! Schedule conflict detection.
//!
//! Two classes conflict when they meet on a common day and their
//! `[start, end)` intervals intersect. Back-to-back classes (one ends at
//! 10:00, the next starts at 10:00) do not conflict.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::ClassSchedule;

fn intervals_overlap(a: (NaiveTime, NaiveTime), b: (NaiveTime, NaiveTime)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Existing classes that clash with `candidate`.
///
/// A class with the same id as the candidate is skipped so that editing a
/// class never reports a conflict with its own previous version.
pub fn find_conflicts<'a>(
    candidate: &ClassSchedule,
    existing: &'a [ClassSchedule],
) -> Vec<&'a ClassSchedule> {
    existing
        .iter()
        .filter(|other| candidate.id.is_empty() || other.id != candidate.id)
        .filter(|other| candidate.shares_day_with(other))
        .filter(|other| {
            intervals_overlap(
                (candidate.time, candidate.end_time),
                (other.time, other.end_time),
            )
        })
        .collect()
}

/// Whether `candidate` clashes with any existing class.
pub fn has_conflict(candidate: &ClassSchedule, existing: &[ClassSchedule]) -> bool {
    !find_conflicts(candidate, existing).is_empty()
}

/// Choices offered to the user when a new class conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    /// Add the class anyway.
    Ignore,
    /// Look for a free slot instead.
    AdjustSchedule,
    /// Show suggestions based on attendance history.
    GetSuggestions,
}

/// What the caller should do after a resolution is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionAction {
    /// Save the class as entered.
    AddClass,
    /// Show the message and leave the class unsaved.
    ShowAdvice { title: &'static str, message: &'static str },
}

impl ConflictResolution {
    /// The three choices, in the order they are presented.
    pub const ALL: [ConflictResolution; 3] = [
        ConflictResolution::Ignore,
        ConflictResolution::AdjustSchedule,
        ConflictResolution::GetSuggestions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConflictResolution::Ignore => "Ignore",
            ConflictResolution::AdjustSchedule => "Adjust Schedule",
            ConflictResolution::GetSuggestions => "Get Suggestions",
        }
    }

    /// Neither alternative slots nor suggestions are computed; both return
    /// fixed advice.
    pub fn action(&self) -> ResolutionAction {
        match self {
            ConflictResolution::Ignore => ResolutionAction::AddClass,
            ConflictResolution::AdjustSchedule => ResolutionAction::ShowAdvice {
                title: "Suggested Times",
                message: "Here are some alternative times that don't conflict...",
            },
            ConflictResolution::GetSuggestions => ResolutionAction::ShowAdvice {
                title: "Smart Suggestions",
                message: "You frequently miss this class. Consider setting earlier reminders.",
            },
        }
    }
}

impl std::str::FromStr for ConflictResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "ignore" | "proceed" => Ok(ConflictResolution::Ignore),
            "adjust" | "adjust_schedule" => Ok(ConflictResolution::AdjustSchedule),
            "suggest" | "suggestions" | "get_suggestions" => {
                Ok(ConflictResolution::GetSuggestions)
            }
            other => Err(format!("unknown conflict resolution '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{test_class, Day};
    use proptest::prelude::*;

    fn existing() -> Vec<ClassSchedule> {
        vec![test_class("Physics", &[Day::Monday, Day::Wednesday], "09:00", "10:00")]
    }

    #[test]
    fn overlapping_start_conflicts() {
        let candidate = test_class("Math", &[Day::Monday], "09:30", "10:30");
        assert!(has_conflict(&candidate, &existing()));
    }

    #[test]
    fn back_to_back_does_not_conflict() {
        let candidate = test_class("Math", &[Day::Monday], "10:00", "11:00");
        assert!(!has_conflict(&candidate, &existing()));
    }

    #[test]
    fn disjoint_times_do_not_conflict() {
        let candidate = test_class("Math", &[Day::Monday], "13:00", "14:00");
        assert!(!has_conflict(&candidate, &existing()));
    }

    #[test]
    fn overlapping_end_conflicts() {
        let candidate = test_class("Math", &[Day::Wednesday], "08:00", "09:15");
        assert!(has_conflict(&candidate, &existing()));
    }

    #[test]
    fn enclosing_and_identical_intervals_conflict() {
        let enclosing = test_class("Math", &[Day::Monday], "08:00", "11:00");
        let identical = test_class("Math", &[Day::Monday], "09:00", "10:00");
        assert!(has_conflict(&enclosing, &existing()));
        assert!(has_conflict(&identical, &existing()));
    }

    #[test]
    fn different_days_never_conflict() {
        let candidate = test_class("Math", &[Day::Tuesday], "09:30", "10:30");
        assert!(!has_conflict(&candidate, &existing()));
    }

    #[test]
    fn editing_a_class_ignores_its_old_version() {
        let mut edited = existing()[0].clone();
        edited.end_time = crate::classes::parse_time("10:15").unwrap();
        assert!(!has_conflict(&edited, &existing()));
    }

    #[test]
    fn find_conflicts_returns_every_clash() {
        let mut classes = existing();
        classes.push(test_class("Biology", &[Day::Monday], "10:00", "12:00"));
        classes.push(test_class("History", &[Day::Friday], "09:00", "12:00"));
        let candidate = test_class("Math", &[Day::Monday], "09:45", "10:30");

        let names: Vec<_> = find_conflicts(&candidate, &classes)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Physics", "Biology"]);
    }

    #[test]
    fn exactly_three_resolutions() {
        assert_eq!(ConflictResolution::ALL.len(), 3);
        assert_eq!(
            ConflictResolution::Ignore.action(),
            ResolutionAction::AddClass
        );
        assert!(matches!(
            ConflictResolution::AdjustSchedule.action(),
            ResolutionAction::ShowAdvice { .. }
        ));
        assert!(matches!(
            ConflictResolution::GetSuggestions.action(),
            ResolutionAction::ShowAdvice { .. }
        ));
        assert_eq!(
            "get-suggestions".parse::<ConflictResolution>(),
            Ok(ConflictResolution::GetSuggestions)
        );
        assert!("later".parse::<ConflictResolution>().is_err());
    }

    fn hhmm(minutes: u32) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    proptest! {
        #[test]
        fn conflict_iff_intervals_intersect(
            a_start in 0u32..1380,
            a_len in 1u32..60,
            b_start in 0u32..1380,
            b_len in 1u32..60,
        ) {
            let a_end = a_start + a_len;
            let b_end = b_start + b_len;
            let existing = vec![test_class("A", &[Day::Thursday], &hhmm(a_start), &hhmm(a_end))];
            let candidate = test_class("B", &[Day::Thursday], &hhmm(b_start), &hhmm(b_end));

            let intersects = b_start < a_end && a_start < b_end;
            prop_assert_eq!(has_conflict(&candidate, &existing), intersects);
        }

        #[test]
        fn conflict_is_symmetric(
            a_start in 0u32..1380,
            a_len in 1u32..60,
            b_start in 0u32..1380,
            b_len in 1u32..60,
        ) {
            let a = test_class("A", &[Day::Sunday], &hhmm(a_start), &hhmm(a_start + a_len));
            let b = test_class("B", &[Day::Sunday], &hhmm(b_start), &hhmm(b_start + b_len));
            prop_assert_eq!(
                has_conflict(&a, std::slice::from_ref(&b)),
                has_conflict(&b, std::slice::from_ref(&a))
            );
        }
    }
}
