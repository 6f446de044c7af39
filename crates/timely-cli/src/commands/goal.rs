use chrono::NaiveDate;
use clap::Subcommand;
use timely_core::{AppContext, Goal};

use super::{fetch, finish, not_found, print_json, CmdResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal
    Add {
        /// Goal title
        title: String,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// List goals with progress
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a milestone to a goal
    Milestone {
        /// Goal ID
        goal_id: String,
        /// Milestone name
        name: String,
    },
    /// Toggle a milestone's completed flag
    Toggle {
        /// Goal ID
        goal_id: String,
        /// Milestone ID
        milestone_id: String,
    },
    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
}

pub async fn run(action: GoalAction, ctx: &AppContext) -> CmdResult {
    match action {
        GoalAction::Add {
            title,
            description,
            due,
        } => {
            let goal = Goal::new(&title, description.as_deref(), due)?;
            let mut goals = fetch::<Goal>(ctx).await?;
            finish(goals.add(&ctx.client, goal).await, "Goal created")?;
        }
        GoalAction::List { json } => {
            let goals = fetch::<Goal>(ctx).await?;
            if json {
                return print_json(goals.items());
            }
            for goal in goals.items() {
                println!("{}  {}  {:.2}%", goal.id, goal.title, goal.progress());
                for m in &goal.milestones {
                    println!("    [{}] {}  {}", if m.completed { "x" } else { " " }, m.id, m.name);
                }
            }
        }
        GoalAction::Milestone { goal_id, name } => {
            let mut goals = fetch::<Goal>(ctx).await?;
            let goal = goals
                .find_mut(&goal_id)
                .ok_or_else(|| not_found("goal", &goal_id))?;
            goal.add_milestone(&name)?;
            let updated = goal.clone();
            finish(goals.save(&ctx.client, updated).await, "Milestone added")?;
        }
        GoalAction::Toggle {
            goal_id,
            milestone_id,
        } => {
            let mut goals = fetch::<Goal>(ctx).await?;
            let goal = goals
                .find_mut(&goal_id)
                .ok_or_else(|| not_found("goal", &goal_id))?;
            let progress = goal
                .toggle_milestone(&milestone_id)
                .ok_or_else(|| not_found("milestone", &milestone_id))?;
            let updated = goal.clone();
            finish(
                goals.save(&ctx.client, updated).await,
                &format!("Progress {progress:.2}%"),
            )?;
        }
        GoalAction::Delete { id } => {
            let mut goals = fetch::<Goal>(ctx).await?;
            finish(goals.delete(&ctx.client, &id).await, "Goal deleted")?;
        }
    }
    Ok(())
}
