//! Diary entries and the list filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::api::Resource;
use crate::error::ValidationError;
use crate::validation::require;

/// Tags offered by the entry form. Entries may carry others too.
pub const DEFAULT_TAGS: [&str; 3] = ["Work", "Travel", "Daily Life"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub is_favorite: bool,
    pub date: DateTime<Utc>,
}

impl DiaryEntry {
    pub fn new(title: &str, content: &str, date: DateTime<Utc>) -> Result<Self, ValidationError> {
        require("title", title)?;
        require("content", content)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            tags: BTreeSet::new(),
            is_favorite: false,
            date,
        })
    }

    /// Add `tag` if missing, remove it otherwise. Returns whether it is now set.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }
}

impl Resource for DiaryEntry {
    const PATH: &'static str = "/entries";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Which entries the diary list shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiaryFilter {
    #[default]
    All,
    Favorites,
    Tag(String),
}

impl DiaryFilter {
    /// "all", "favorites", or anything else as a tag.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            v if v.eq_ignore_ascii_case("all") => DiaryFilter::All,
            v if v.eq_ignore_ascii_case("favorites") => DiaryFilter::Favorites,
            v => DiaryFilter::Tag(v.to_string()),
        }
    }

    pub fn matches(&self, entry: &DiaryEntry) -> bool {
        match self {
            DiaryFilter::All => true,
            DiaryFilter::Favorites => entry.is_favorite,
            DiaryFilter::Tag(tag) => entry.tags.contains(tag),
        }
    }

    pub fn apply<'a>(&self, entries: &'a [DiaryEntry]) -> Vec<&'a DiaryEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(title: &str, tags: &[&str], favorite: bool) -> DiaryEntry {
        DiaryEntry {
            id: title.to_lowercase(),
            title: title.into(),
            content: "...".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_favorite: favorite,
            date: Utc.with_ymd_and_hms(2024, 8, 20, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn filters_by_favorite_and_tag() {
        let entries = vec![
            entry("Paris", &["Travel"], true),
            entry("Standup", &["Work"], false),
            entry("Sunday", &["Daily Life", "Travel"], false),
        ];
        assert_eq!(DiaryFilter::All.apply(&entries).len(), 3);
        assert_eq!(DiaryFilter::Favorites.apply(&entries).len(), 1);
        let travel: Vec<_> = DiaryFilter::parse("Travel")
            .apply(&entries)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(travel, vec!["Paris", "Sunday"]);
    }

    #[test]
    fn parse_recognises_keywords() {
        assert_eq!(DiaryFilter::parse("ALL"), DiaryFilter::All);
        assert_eq!(DiaryFilter::parse("favorites"), DiaryFilter::Favorites);
        assert_eq!(
            DiaryFilter::parse("Daily Life"),
            DiaryFilter::Tag("Daily Life".into())
        );
    }

    #[test]
    fn toggle_tag_flips_membership() {
        let mut e = entry("Note", &[], false);
        assert!(e.toggle_tag("Work"));
        assert!(e.tags.contains("Work"));
        assert!(!e.toggle_tag("Work"));
        assert!(e.tags.is_empty());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(entry("Paris", &["Travel"], true)).unwrap();
        assert_eq!(json["isFavorite"], true);
        assert_eq!(json["tags"][0], "Travel");
    }

    #[test]
    fn new_requires_title_and_content() {
        let date = Utc.with_ymd_and_hms(2024, 8, 20, 9, 0, 0).unwrap();
        assert_eq!(
            DiaryEntry::new("", "body", date),
            Err(ValidationError::MissingField("title"))
        );
        assert_eq!(
            DiaryEntry::new("Title", " ", date),
            Err(ValidationError::MissingField("content"))
        );
    }
}
