use chrono::Utc;
use clap::Subcommand;
use timely_core::{AppContext, GratitudeEntry};

use super::{fetch, finish, print_json, CmdResult};

#[derive(Subcommand)]
pub enum GratitudeAction {
    /// Note something you are grateful for
    Add {
        content: String,
        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List entries, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub async fn run(action: GratitudeAction, ctx: &AppContext) -> CmdResult {
    match action {
        GratitudeAction::Add { content, tags } => {
            let entry = GratitudeEntry::new(&content, tags, Utc::now())?;
            let mut entries = fetch::<GratitudeEntry>(ctx).await?;
            finish(entries.add_front(&ctx.client, entry).await, "Entry saved")?;
        }
        GratitudeAction::List { json } => {
            let mut entries = fetch::<GratitudeEntry>(ctx).await?.into_items();
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            if json {
                return print_json(&entries);
            }
            for entry in &entries {
                println!(
                    "{}  {}  {}",
                    entry.date.format("%Y-%m-%d"),
                    entry.id,
                    entry.content
                );
            }
        }
        GratitudeAction::Delete { id } => {
            let mut entries = fetch::<GratitudeEntry>(ctx).await?;
            finish(entries.delete(&ctx.client, &id).await, "Entry deleted")?;
        }
    }
    Ok(())
}
