//! Class schedule commands for CLI.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};
use clap::Subcommand;
use std::collections::BTreeSet;
use timely_core::classes::{class_start_on, parse_days, parse_time, ReminderKind, ResolutionAction};
use timely_core::{find_conflicts, timetable, AppContext, ClassSchedule, ConflictResolution, Day};

use super::{fetch, finish, not_found, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ClassAction {
    /// Add a weekly class, checking for clashes first
    Add {
        /// Class name
        name: String,
        /// Room or building
        #[arg(long)]
        location: String,
        /// Comma-separated days, e.g. "Monday, Wednesday" or "Mon,Wed"
        #[arg(long, value_parser = parse_days)]
        days: BTreeSet<Day>,
        /// Start time, "09:00 AM" or "09:00"
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// End time
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
        /// Packing note delivered with the first reminder
        #[arg(long)]
        packing: Option<String>,
        /// What to do on a clash: ignore, adjust or suggest
        #[arg(long)]
        on_conflict: Option<ConflictResolution>,
    },
    /// List classes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the week day by day
    Timetable,
    /// Schedule the reminders for a class's next meeting
    Reminders {
        /// Class ID
        id: String,
        /// Meeting date (YYYY-MM-DD); defaults to the next meeting day
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a class
    Delete {
        /// Class ID
        id: String,
    },
}

/// First date on or after `from` on which the class meets.
fn next_meeting(class: &ClassSchedule, from: NaiveDate) -> Option<NaiveDate> {
    (0..7)
        .map(|offset| from + Duration::days(offset))
        .find(|date| class.days.contains(&Day::from_weekday(date.weekday())))
}

pub async fn run(action: ClassAction, ctx: &AppContext) -> CmdResult {
    match action {
        ClassAction::Add {
            name,
            location,
            days,
            start,
            end,
            packing,
            on_conflict,
        } => {
            let class = ClassSchedule::new(&name, &location, days, start, end, packing.as_deref())?;
            let mut classes = fetch::<ClassSchedule>(ctx).await?;

            let conflicts = find_conflicts(&class, classes.items());
            if !conflicts.is_empty() {
                for other in &conflicts {
                    eprintln!("conflicts with: {}", other.summary());
                }
                let Some(resolution) = on_conflict else {
                    return Err(
                        "schedule conflict; pass --on-conflict ignore, adjust or suggest".into(),
                    );
                };
                tracing::debug!(resolution = resolution.label(), "conflict resolution chosen");
                if let ResolutionAction::ShowAdvice { title, message } = resolution.action() {
                    println!("{title}: {message}");
                    println!("Class not added.");
                    return Ok(());
                }
            }

            finish(classes.add(&ctx.client, class).await, "Class added")?;
        }
        ClassAction::List { json } => {
            let classes = fetch::<ClassSchedule>(ctx).await?;
            if json {
                return print_json(classes.items());
            }
            for class in classes.items() {
                println!("{}  {}", class.id, class.summary());
            }
        }
        ClassAction::Timetable => {
            let classes = fetch::<ClassSchedule>(ctx).await?;
            for (day, day_classes) in timetable(classes.items()) {
                println!("{day}");
                if day_classes.is_empty() {
                    println!("    -");
                }
                for class in day_classes {
                    println!(
                        "    {}-{}  {} ({})",
                        class.time.format("%I:%M %p"),
                        class.end_time.format("%I:%M %p"),
                        class.name,
                        class.location
                    );
                }
            }
        }
        ClassAction::Reminders { id, date } => {
            let classes = fetch::<ClassSchedule>(ctx).await?;
            let class = classes.find(&id).ok_or_else(|| not_found("class", &id))?;
            let date = match date {
                Some(date) => date,
                None => next_meeting(class, Utc::now().date_naive())
                    .ok_or_else(|| not_found("meeting day for class", &id))?,
            };
            let start = class_start_on(date, class.time);
            let reminders = ctx.class_reminders().schedule(
                ctx.notifier.as_ref(),
                start,
                &class.name,
                class.packing_reminder.as_deref(),
            );
            for reminder in reminders {
                let kind = match reminder.kind {
                    ReminderKind::LeadTime { minutes } => format!("{minutes} min before"),
                    ReminderKind::Packing => "packing".to_string(),
                };
                println!(
                    "{}  {:<14}  {}",
                    reminder.at.format("%Y-%m-%d %H:%M"),
                    kind,
                    reminder.message
                );
            }
        }
        ClassAction::Delete { id } => {
            let mut classes = fetch::<ClassSchedule>(ctx).await?;
            finish(classes.delete(&ctx.client, &id).await, "Class deleted")?;
        }
    }
    Ok(())
}
