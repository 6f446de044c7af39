//! Task tracker.
//!
//! Tasks carry a calendar due date, a category label and a priority. The
//! active list and the archive are separate: archiving moves a task out of
//! the active list rather than hiding it in place.

mod due_state;

pub use due_state::{classify, notify_due_tasks, DueState, DueStateClassifier};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::Resource;
use crate::error::ValidationError;
use crate::validation::require;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        })
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidValue {
                field: "priority",
                message: format!("expected high, medium or low, got '{other}'"),
            }),
        }
    }
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Free-form label such as "Work" or "Personal".
    pub category: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Task {
    /// Validate form input and build an open task with a fresh id.
    pub fn new(
        title: &str,
        category: &str,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Result<Self, ValidationError> {
        require("title", title)?;
        require("category", category)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            category: category.trim().to_string(),
            due_date,
            priority,
            completed: false,
            archived: false,
        })
    }

    /// Due dates are calendar days; the deadline is midnight UTC of that day.
    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_date.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Flip the completed flag.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

impl Resource for Task {
    const PATH: &'static str = "/tasks";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Active tasks plus the archive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskBoard {
    pub active: Vec<Task>,
    pub archived: Vec<Task>,
}

impl TaskBoard {
    /// Split a fetched list by the `archived` flag.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let (archived, active) = tasks.into_iter().partition(|t| t.archived);
        Self { active, archived }
    }

    /// Move a task from the active list to the archive. Returns the archived
    /// copy, or `None` if no active task has that id.
    pub fn archive(&mut self, id: &str) -> Option<&Task> {
        let index = self.active.iter().position(|t| t.id == id)?;
        let mut task = self.active.remove(index);
        task.archived = true;
        self.archived.push(task);
        self.archived.last()
    }

    /// Toggle completion of an active task.
    pub fn toggle_completed(&mut self, id: &str) -> Option<&Task> {
        let task = self.active.iter_mut().find(|t| t.id == id)?;
        task.toggle_completed();
        Some(&*task)
    }

    /// Active tasks matching the optional category and priority filters.
    pub fn filtered(&self, category: Option<&str>, priority: Option<Priority>) -> Vec<&Task> {
        self.active
            .iter()
            .filter(|t| category.map_or(true, |c| t.category.eq_ignore_ascii_case(c)))
            .filter(|t| priority.map_or(true, |p| t.priority == p))
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn test_task(id: &str, due: &str, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        category: "Work".to_string(),
        due_date: due.parse().unwrap(),
        priority: Priority::Medium,
        completed,
        archived: false,
    }
}
