//! Gratitude journal. Newest entries come first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::error::ValidationError;
use crate::validation::require;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GratitudeEntry {
    #[serde(default)]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: DateTime<Utc>,
}

impl GratitudeEntry {
    pub fn new(
        content: &str,
        tags: Vec<String>,
        date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        require("content", content)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.trim().to_string(),
            tags,
            date,
        })
    }
}

impl Resource for GratitudeEntry {
    const PATH: &'static str = "/gratitude";

    fn id(&self) -> &str {
        &self.id
    }
}
