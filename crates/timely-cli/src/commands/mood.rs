use chrono::Utc;
use clap::Subcommand;
use timely_core::{insights, AppContext, Mood, MoodEntry};

use super::{fetch, finish, print_json, CmdResult};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Log today's mood
    Log {
        /// Emoji, name (happy, sad, ...) or index 1-5
        mood: Mood,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// List logged moods
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Most common mood, average and best/worst days
    Insights {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a mood entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub async fn run(action: MoodAction, ctx: &AppContext) -> CmdResult {
    match action {
        MoodAction::Log { mood, note } => {
            let entry = MoodEntry::new(mood, note.as_deref(), Utc::now());
            let mut moods = fetch::<MoodEntry>(ctx).await?;
            finish(moods.add(&ctx.client, entry).await, &format!("Logged {mood}"))?;
        }
        MoodAction::List { json } => {
            let moods = fetch::<MoodEntry>(ctx).await?;
            if json {
                return print_json(moods.items());
            }
            for entry in moods.items() {
                println!(
                    "{}  {}  {}  {}",
                    entry.date.format("%Y-%m-%d"),
                    entry.id,
                    entry.mood,
                    entry.note
                );
            }
        }
        MoodAction::Insights { json } => {
            let moods = fetch::<MoodEntry>(ctx).await?;
            let Some(summary) = insights(moods.items()) else {
                println!("No moods logged yet.");
                return Ok(());
            };
            if json {
                return print_json(&summary);
            }
            println!("Most common mood: {}", summary.most_common_mood);
            println!("Average mood: {:.2}", summary.average_mood_index);
            println!(
                "Best day: {} ({})",
                summary.best_day.date.format("%Y-%m-%d"),
                summary.best_day.mood
            );
            println!(
                "Worst day: {} ({})",
                summary.worst_day.date.format("%Y-%m-%d"),
                summary.worst_day.mood
            );
        }
        MoodAction::Delete { id } => {
            let mut moods = fetch::<MoodEntry>(ctx).await?;
            finish(moods.delete(&ctx.client, &id).await, "Mood entry deleted")?;
        }
    }
    Ok(())
}
