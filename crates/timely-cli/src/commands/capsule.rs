use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Subcommand;
use timely_core::{AppContext, CapsuleState, TimeCapsule};

use super::{fetch, finish, not_found, CmdResult};

#[derive(Subcommand)]
pub enum CapsuleAction {
    /// Seal a message until a date
    Lock {
        /// Message to your future self
        message: String,
        /// Reveal date (YYYY-MM-DD), today or later
        #[arg(long)]
        reveal: NaiveDate,
    },
    /// List capsules and whether they can be opened
    List,
    /// Read a capsule if its reveal date has come
    Open {
        /// Capsule ID
        id: String,
    },
    /// Delete a capsule
    Delete {
        /// Capsule ID
        id: String,
    },
}

pub async fn run(action: CapsuleAction, ctx: &AppContext) -> CmdResult {
    let now = Utc::now();
    match action {
        CapsuleAction::Lock { message, reveal } => {
            let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
            let reveal_at = reveal.and_time(NaiveTime::MIN).and_utc();
            let capsule = TimeCapsule::lock(&message, reveal_at, today)?;
            let mut capsules = fetch::<TimeCapsule>(ctx).await?;
            finish(
                capsules.add(&ctx.client, capsule).await,
                &format!("Capsule locked until {reveal}"),
            )?;
        }
        CapsuleAction::List => {
            let capsules = fetch::<TimeCapsule>(ctx).await?;
            for capsule in capsules.items() {
                let state = match capsule.state(now) {
                    CapsuleState::Locked { days_remaining } => {
                        format!("locked, {days_remaining} day(s) left")
                    }
                    CapsuleState::Revealed { .. } => "ready to open".to_string(),
                };
                println!(
                    "{}  {}  {}",
                    capsule.id,
                    capsule.reveal_date.format("%Y-%m-%d"),
                    state
                );
            }
        }
        CapsuleAction::Open { id } => {
            let capsules = fetch::<TimeCapsule>(ctx).await?;
            let capsule = capsules.find(&id).ok_or_else(|| not_found("capsule", &id))?;
            match capsule.state(now) {
                CapsuleState::Revealed { message } => println!("{message}"),
                CapsuleState::Locked { days_remaining } => {
                    println!("Still locked: {days_remaining} day(s) remaining")
                }
            }
        }
        CapsuleAction::Delete { id } => {
            let mut capsules = fetch::<TimeCapsule>(ctx).await?;
            finish(capsules.delete(&ctx.client, &id).await, "Capsule deleted")?;
        }
    }
    Ok(())
}
