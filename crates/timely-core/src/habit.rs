//! Habit tracker with goal-completion streaks.
//!
//! Progress counts up towards a goal and saturates there. The streak
//! counts goal completions: it grows by one on the step that reaches the
//! goal and is never decremented.

use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::error::ValidationError;
use crate::validation::require;

/// How often the habit's goal cycle repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub progress: u32,
    pub goal: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub frequency: HabitFrequency,
}

/// Result of marking progress on a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub progress: u32,
    pub streak: u32,
    /// Set only on the step that reached the goal.
    pub reward: bool,
    /// False when the habit was already at its goal.
    pub changed: bool,
}

impl Habit {
    /// Validate form input and build a habit at zero progress.
    pub fn new(name: &str, goal: u32) -> Result<Self, ValidationError> {
        require("name", name)?;
        if goal == 0 {
            return Err(ValidationError::InvalidValue {
                field: "goal",
                message: "goal must be at least 1".into(),
            });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            progress: 0,
            goal,
            streak: 0,
            frequency: HabitFrequency::Daily,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.goal
    }

    /// Fraction of the goal reached, in `0.0..=1.0`.
    pub fn completion_ratio(&self) -> f64 {
        if self.goal == 0 {
            return 0.0;
        }
        (f64::from(self.progress) / f64::from(self.goal)).min(1.0)
    }

    /// Add one unit of progress.
    pub fn increment(&mut self) -> ProgressUpdate {
        if self.progress >= self.goal {
            return ProgressUpdate {
                progress: self.progress,
                streak: self.streak,
                reward: false,
                changed: false,
            };
        }

        self.progress += 1;
        let reached = self.progress == self.goal;
        if reached {
            self.streak += 1;
        }
        ProgressUpdate {
            progress: self.progress,
            streak: self.streak,
            reward: reached,
            changed: true,
        }
    }
}

/// Increment the habit with `id`. `None` when no habit matches.
pub fn increment_by_id(habits: &mut [Habit], id: &str) -> Option<ProgressUpdate> {
    habits.iter_mut().find(|h| h.id == id).map(Habit::increment)
}

impl Resource for Habit {
    const PATH: &'static str = "/habits";

    fn id(&self) -> &str {
        &self.id
    }
}
