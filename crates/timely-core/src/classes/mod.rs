//! Class schedule: weekly recurring classes with reminders.
//!
//! - [`conflict`]: overlap detection against existing classes
//! - [`reminders`]: lead-time notifications before a class starts
//! - [`timetable`]: classes grouped by weekday

pub mod conflict;
pub mod reminders;
pub mod timetable;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::api::Resource;
use crate::error::ValidationError;
use crate::validation::{non_blank, require};

pub use conflict::{find_conflicts, has_conflict, ConflictResolution, ResolutionAction};
pub use reminders::{class_start_on, ClassReminder, ClassReminderScheduler, ReminderKind};
pub use timetable::timetable;

/// Day of the week a class meets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    pub fn from_weekday(weekday: chrono::Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ValidationError;

    /// Accepts full or three-letter names in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .iter()
            .copied()
            .find(|d| {
                let name = d.as_str().to_ascii_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "days",
                message: format!("unknown day '{}'", s.trim()),
            })
    }
}

/// Parse a comma-separated day list such as `"Monday, Wednesday"`.
pub fn parse_days(input: &str) -> Result<BTreeSet<Day>, ValidationError> {
    let days = input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse::<Day>)
        .collect::<Result<BTreeSet<Day>, _>>()?;
    if days.is_empty() {
        return Err(ValidationError::MissingField("days"));
    }
    Ok(days)
}

/// Parse a class time. Accepts `09:30 AM` style and 24-hour `09:30`.
pub fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, clock::FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| ValidationError::InvalidValue {
            field: "time",
            message: format!("cannot parse '{input}' as a time"),
        })
}

/// `hh:mm AM` serde representation used by the API.
pub(crate) mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%I:%M %p";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// A weekly class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub days: BTreeSet<Day>,
    /// Start time.
    #[serde(with = "clock")]
    pub time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packing_reminder: Option<String>,
}

impl ClassSchedule {
    /// Validate form input and build a class with a fresh id.
    pub fn new(
        name: &str,
        location: &str,
        days: BTreeSet<Day>,
        time: NaiveTime,
        end_time: NaiveTime,
        packing_reminder: Option<&str>,
    ) -> Result<Self, ValidationError> {
        require("name", name)?;
        require("location", location)?;
        if days.is_empty() {
            return Err(ValidationError::MissingField("days"));
        }
        if end_time <= time {
            return Err(ValidationError::InvalidTimeRange {
                start: time,
                end: end_time,
            });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            location: location.trim().to_string(),
            days,
            time,
            end_time,
            packing_reminder: non_blank(packing_reminder),
        })
    }

    /// Whether the two classes meet on at least one common day.
    pub fn shares_day_with(&self, other: &ClassSchedule) -> bool {
        !self.days.is_disjoint(&other.days)
    }

    /// One-line summary, e.g. `Chemistry at Lab 2 on Monday, Wednesday at 09:00 AM`.
    pub fn summary(&self) -> String {
        let days = self
            .days
            .iter()
            .map(Day::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} at {} on {} at {}",
            self.name,
            self.location,
            days,
            self.time.format(clock::FORMAT)
        )
    }
}

impl Resource for ClassSchedule {
    const PATH: &'static str = "/classes";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
pub(crate) fn test_class(name: &str, days: &[Day], start: &str, end: &str) -> ClassSchedule {
    ClassSchedule {
        id: name.to_lowercase(),
        name: name.to_string(),
        location: "Room 1".to_string(),
        days: days.iter().copied().collect(),
        time: parse_time(start).unwrap(),
        end_time: parse_time(end).unwrap(),
        packing_reminder: None,
    }
}
