//! # Timely Tales Core Library
//!
//! Core logic for the Timely Tales personal organizer: diary, tasks, goals,
//! habits, moods, class schedule, gratitude journal and time capsule. All
//! entities live on a remote REST store; this crate holds the client, the
//! transient local copies and the computations run over them. The
//! `timely-cli` binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **API**: generic CRUD client with bearer-token auth
//! - **Storage**: TOML configuration plus a small key-value store for the
//!   token and the first-launch flag
//! - **Computations**: pure functions over caller-supplied state (conflict
//!   checks, reminder times, due states, habit streaks, mood insights,
//!   capsule reveal)
//! - **Notifications**: handed to an external service through [`Notifier`]
//!
//! ## Key Components
//!
//! - [`ApiClient`]: REST client for every [`Resource`] family
//! - [`Collection`]: local copy with explicit [`MutationOutcome`]s
//! - [`AppContext`]: configuration, client, storage and notifier together
//! - [`Config`]: application configuration management

pub mod api;
pub mod classes;
pub mod collection;
pub mod context;
pub mod diary;
pub mod error;
pub mod goal;
pub mod gratitude;
pub mod habit;
pub mod mood;
pub mod notify;
pub mod onboarding;
pub mod storage;
pub mod task;
pub mod time_capsule;
pub mod validation;

pub use api::{ApiClient, Resource};
pub use classes::{
    find_conflicts, has_conflict, timetable, ClassReminderScheduler, ClassSchedule,
    ConflictResolution, Day,
};
pub use collection::{Collection, MutationOutcome};
pub use context::AppContext;
pub use diary::{DiaryEntry, DiaryFilter};
pub use error::{ApiError, ConfigError, CoreError, StoreError, ValidationError};
pub use goal::{Goal, Milestone};
pub use gratitude::GratitudeEntry;
pub use habit::{Habit, HabitFrequency, ProgressUpdate};
pub use mood::{insights, Mood, MoodEntry, MoodInsights};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use onboarding::is_first_launch;
pub use storage::{Config, KvStore};
pub use task::{DueState, DueStateClassifier, Priority, Task, TaskBoard};
pub use time_capsule::{CapsuleState, TimeCapsule};
