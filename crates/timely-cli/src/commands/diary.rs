use chrono::Utc;
use clap::Subcommand;
use timely_core::{AppContext, DiaryEntry, DiaryFilter};

use super::{fetch, finish, not_found, print_json, CmdResult};

#[derive(Subcommand)]
pub enum DiaryAction {
    /// Write a new entry
    Add {
        /// Entry title
        title: String,
        /// Entry text
        content: String,
        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Mark as favorite
        #[arg(long)]
        favorite: bool,
    },
    /// List entries
    List {
        /// "all", "favorites", or a tag such as "Travel"
        #[arg(long, default_value = "all")]
        filter: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add or remove a tag
    Tag {
        /// Entry ID
        id: String,
        /// Tag to toggle
        tag: String,
    },
    /// Toggle the favorite flag
    Favorite {
        /// Entry ID
        id: String,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub async fn run(action: DiaryAction, ctx: &AppContext) -> CmdResult {
    match action {
        DiaryAction::Add {
            title,
            content,
            tags,
            favorite,
        } => {
            let mut entry = DiaryEntry::new(&title, &content, Utc::now())?;
            for tag in &tags {
                entry.toggle_tag(tag);
            }
            entry.is_favorite = favorite;
            let mut entries = fetch::<DiaryEntry>(ctx).await?;
            finish(entries.add(&ctx.client, entry).await, "Entry saved")?;
        }
        DiaryAction::List { filter, json } => {
            let entries = fetch::<DiaryEntry>(ctx).await?;
            let shown = DiaryFilter::parse(&filter).apply(entries.items());
            if json {
                return print_json(&shown);
            }
            for entry in shown {
                let tags: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
                println!(
                    "{} {}  {}  {}  [{}]",
                    if entry.is_favorite { "*" } else { " " },
                    entry.date.format("%Y-%m-%d"),
                    entry.id,
                    entry.title,
                    tags.join(", ")
                );
            }
        }
        DiaryAction::Tag { id, tag } => {
            let mut entries = fetch::<DiaryEntry>(ctx).await?;
            let entry = entries.find_mut(&id).ok_or_else(|| not_found("entry", &id))?;
            let set = entry.toggle_tag(&tag);
            let updated = entry.clone();
            let done = if set { "Tag added" } else { "Tag removed" };
            finish(entries.save(&ctx.client, updated).await, done)?;
        }
        DiaryAction::Favorite { id } => {
            let mut entries = fetch::<DiaryEntry>(ctx).await?;
            let entry = entries.find_mut(&id).ok_or_else(|| not_found("entry", &id))?;
            let favorite = entry.toggle_favorite();
            let updated = entry.clone();
            let done = if favorite { "Marked as favorite" } else { "Removed from favorites" };
            finish(entries.save(&ctx.client, updated).await, done)?;
        }
        DiaryAction::Delete { id } => {
            let mut entries = fetch::<DiaryEntry>(ctx).await?;
            finish(entries.delete(&ctx.client, &id).await, "Entry deleted")?;
        }
    }
    Ok(())
}
