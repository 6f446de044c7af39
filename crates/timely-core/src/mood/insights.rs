use serde::Serialize;

use super::{Mood, MoodEntry};

/// Summary of a mood history. Recomputed from scratch on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodInsights<'a> {
    pub most_common_mood: Mood,
    /// Mean mood index, rounded to two decimal places.
    pub average_mood_index: f64,
    /// First entry with the highest index.
    pub best_day: &'a MoodEntry,
    /// First entry with the lowest index.
    pub worst_day: &'a MoodEntry,
}

/// `None` for an empty history. Frequency ties go to the lower-index mood.
pub fn insights(entries: &[MoodEntry]) -> Option<MoodInsights<'_>> {
    let first = entries.first()?;

    let mut counts = [0usize; 5];
    let mut total = 0u32;
    let mut best = first;
    let mut worst = first;
    for entry in entries {
        let index = entry.index();
        counts[usize::from(index - 1)] += 1;
        total += u32::from(index);
        if index > best.index() {
            best = entry;
        }
        if index < worst.index() {
            worst = entry;
        }
    }

    // Scanning from index 1 upward with a strict comparison keeps the lowest
    // index on ties.
    let mut most_common = Mood::Sad;
    let mut most_count = 0;
    for index in 1..=5u8 {
        let count = counts[usize::from(index - 1)];
        if count > most_count {
            most_count = count;
            most_common = Mood::from_index(index)?;
        }
    }

    let mean = f64::from(total) / entries.len() as f64;
    Some(MoodInsights {
        most_common_mood: most_common,
        average_mood_index: (mean * 100.0).round() / 100.0,
        best_day: best,
        worst_day: worst,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::test_entry;

    #[test]
    fn empty_history_has_no_insights() {
        assert!(insights(&[]).is_none());
    }

    #[test]
    fn best_worst_and_mean() {
        let entries = vec![
            test_entry(1, Mood::Neutral),
            test_entry(2, Mood::Excited),
            test_entry(3, Mood::Sad),
            test_entry(4, Mood::Happy),
        ];
        let summary = insights(&entries).unwrap();
        assert_eq!(summary.best_day.index(), 5);
        assert_eq!(summary.worst_day.index(), 1);
        assert_eq!(summary.average_mood_index, 3.25);
    }

    #[test]
    fn first_occurrence_wins_for_best_and_worst() {
        let entries = vec![
            test_entry(1, Mood::Happy),
            test_entry(2, Mood::Happy),
            test_entry(3, Mood::Anxious),
            test_entry(4, Mood::Anxious),
        ];
        let summary = insights(&entries).unwrap();
        assert_eq!(summary.best_day.id, "mood-1");
        assert_eq!(summary.worst_day.id, "mood-3");
    }

    #[test]
    fn frequency_tie_goes_to_lowest_index() {
        let entries = vec![
            test_entry(1, Mood::Excited),
            test_entry(2, Mood::Anxious),
            test_entry(3, Mood::Excited),
            test_entry(4, Mood::Anxious),
        ];
        assert_eq!(insights(&entries).unwrap().most_common_mood, Mood::Anxious);
    }

    #[test]
    fn mean_rounds_to_two_places() {
        let entries = vec![
            test_entry(1, Mood::Happy),
            test_entry(2, Mood::Happy),
            test_entry(3, Mood::Sad),
        ];
        let summary = insights(&entries).unwrap();
        assert_eq!(summary.average_mood_index, 3.0);
        assert_eq!(summary.most_common_mood, Mood::Happy);

        let entries = vec![
            test_entry(1, Mood::Happy),
            test_entry(2, Mood::Sad),
            test_entry(3, Mood::Sad),
        ];
        assert_eq!(insights(&entries).unwrap().average_mood_index, 2.0);

        let entries = vec![
            test_entry(1, Mood::Excited),
            test_entry(2, Mood::Happy),
            test_entry(3, Mood::Happy),
        ];
        assert_eq!(insights(&entries).unwrap().average_mood_index, 4.33);
    }
}
