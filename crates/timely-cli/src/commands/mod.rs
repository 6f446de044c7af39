pub mod auth;
pub mod capsule;
pub mod class;
pub mod config;
pub mod diary;
pub mod goal;
pub mod gratitude;
pub mod habit;
pub mod mood;
pub mod task;

use serde::Serialize;
use timely_core::error::ApiError;
use timely_core::{AppContext, Collection, MutationOutcome, Resource};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Context from the user's config, optionally pointed at another server.
pub fn open_context(api_url: Option<&str>) -> Result<AppContext, Box<dyn std::error::Error>> {
    let mut ctx = AppContext::open_default()?;
    if let Some(url) = api_url {
        ctx.set_base_url(url)?;
    }
    Ok(ctx)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fresh copy of a resource family.
pub async fn fetch<T: Resource>(ctx: &AppContext) -> Result<Collection<T>, ApiError> {
    let mut items = Collection::new();
    items.refetch(&ctx.client).await?;
    Ok(items)
}

/// Print `done` when the server confirmed, otherwise fail the command.
pub fn finish(outcome: MutationOutcome, done: &str) -> CmdResult {
    match outcome {
        MutationOutcome::Confirmed(_) => {
            println!("{done}");
            Ok(())
        }
        MutationOutcome::Failed { error, local_stale } => {
            if local_stale {
                eprintln!("warning: change was not saved on the server");
            }
            Err(error.into())
        }
    }
}

pub fn not_found(kind: &str, id: &str) -> Box<dyn std::error::Error> {
    format!("{kind} not found: {id}").into()
}
