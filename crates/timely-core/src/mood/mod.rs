//! Mood journal.

mod insights;

pub use insights::{insights, MoodInsights};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::Resource;
use crate::error::ValidationError;
use crate::validation::non_blank;

/// The five moods a user can log, stored on the wire as their emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "😁")]
    Excited,
    #[serde(rename = "😊")]
    Happy,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "😟")]
    Anxious,
    #[serde(rename = "😔")]
    Sad,
}

impl Mood {
    /// Best first.
    pub const ALL: [Mood; 5] = [
        Mood::Excited,
        Mood::Happy,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Sad,
    ];

    /// 5 for Excited down to 1 for Sad.
    pub fn index(self) -> u8 {
        match self {
            Mood::Excited => 5,
            Mood::Happy => 4,
            Mood::Neutral => 3,
            Mood::Anxious => 2,
            Mood::Sad => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.index() == index)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Mood::Excited => "😁",
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Anxious => "😟",
            Mood::Sad => "😔",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Excited => "Excited",
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Anxious => "Anxious",
            Mood::Sad => "Sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol(), self.label())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    /// Accepts the emoji, the label (any case) or the index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.symbol() == s
                    || m.label().eq_ignore_ascii_case(s)
                    || s.parse::<u8>().is_ok_and(|i| i == m.index())
            })
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "mood",
                message: format!("unknown mood '{s}'"),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    #[serde(default)]
    pub id: String,
    pub mood: Mood,
    /// Always `mood.index()`; kept on the wire for the backend's sake.
    pub mood_index: u8,
    #[serde(default)]
    pub note: String,
    pub date: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(mood: Mood, note: Option<&str>, date: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mood,
            mood_index: mood.index(),
            note: non_blank(note).unwrap_or_default(),
            date,
        }
    }

    /// Index derived from the symbol, ignoring whatever the server sent.
    pub fn index(&self) -> u8 {
        self.mood.index()
    }
}

impl Resource for MoodEntry {
    const PATH: &'static str = "/moods";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
pub(crate) fn test_entry(day: u32, mood: Mood) -> MoodEntry {
    use chrono::TimeZone;

    MoodEntry {
        id: format!("mood-{day}"),
        mood,
        mood_index: mood.index(),
        note: String::new(),
        date: Utc.with_ymd_and_hms(2024, 8, day, 20, 0, 0).unwrap(),
    }
}
