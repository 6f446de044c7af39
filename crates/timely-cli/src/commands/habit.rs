use clap::Subcommand;
use timely_core::habit::increment_by_id;
use timely_core::{AppContext, Habit};

use super::{fetch, finish, not_found, print_json, CmdResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Start tracking a habit
    Add {
        /// Habit name
        name: String,
        /// Completions needed to reach the goal
        #[arg(long, default_value = "7")]
        goal: u32,
    },
    /// List habits with progress and streak
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark one unit of progress
    Progress {
        /// Habit ID
        id: String,
    },
    /// Stop tracking a habit
    Delete {
        /// Habit ID
        id: String,
    },
}

pub async fn run(action: HabitAction, ctx: &AppContext) -> CmdResult {
    match action {
        HabitAction::Add { name, goal } => {
            let habit = Habit::new(&name, goal)?;
            let mut habits = fetch::<Habit>(ctx).await?;
            finish(habits.add(&ctx.client, habit).await, "Habit added")?;
        }
        HabitAction::List { json } => {
            let habits = fetch::<Habit>(ctx).await?;
            if json {
                return print_json(habits.items());
            }
            for h in habits.items() {
                println!(
                    "{}  {}  {}/{} ({:.0}%)  streak {}",
                    h.id,
                    h.name,
                    h.progress,
                    h.goal,
                    h.completion_ratio() * 100.0,
                    h.streak
                );
            }
        }
        HabitAction::Progress { id } => {
            let mut habits = fetch::<Habit>(ctx).await?;
            let update =
                increment_by_id(habits.items_mut(), &id).ok_or_else(|| not_found("habit", &id))?;
            if !update.changed {
                println!("Goal already reached, nothing to do");
                return Ok(());
            }
            let habit = habits
                .find(&id)
                .cloned()
                .ok_or_else(|| not_found("habit", &id))?;
            let done = if update.reward {
                format!("Goal reached! Streak is now {}", update.streak)
            } else {
                format!("Progress {}/{}", update.progress, habit.goal)
            };
            finish(habits.save(&ctx.client, habit).await, &done)?;
        }
        HabitAction::Delete { id } => {
            let mut habits = fetch::<Habit>(ctx).await?;
            finish(habits.delete(&ctx.client, &id).await, "Habit deleted")?;
        }
    }
    Ok(())
}
