//! Goals broken down into milestones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::error::ValidationError;
use crate::validation::{non_blank, require};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Goal {
    pub fn new(
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        require("title", title)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            description: non_blank(description),
            milestones: Vec::new(),
            due_date,
        })
    }

    /// Percentage of completed milestones. A goal without milestones is at 0.
    pub fn progress(&self) -> f64 {
        if self.milestones.is_empty() {
            return 0.0;
        }
        let done = self.milestones.iter().filter(|m| m.completed).count();
        done as f64 / self.milestones.len() as f64 * 100.0
    }

    /// Append an open milestone and return it.
    pub fn add_milestone(&mut self, name: &str) -> Result<&Milestone, ValidationError> {
        require("milestone", name)?;
        self.milestones.push(Milestone {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            completed: false,
        });
        Ok(&self.milestones[self.milestones.len() - 1])
    }

    /// Flip a milestone's completed flag. Returns the new progress, or
    /// `None` when no milestone has that id.
    pub fn toggle_milestone(&mut self, milestone_id: &str) -> Option<f64> {
        let milestone = self.milestones.iter_mut().find(|m| m.id == milestone_id)?;
        milestone.completed = !milestone.completed;
        Some(self.progress())
    }
}

impl Resource for Goal {
    const PATH: &'static str = "/goals";

    fn id(&self) -> &str {
        &self.id
    }
}
