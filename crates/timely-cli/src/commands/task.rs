//! Task management commands for CLI.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use timely_core::task::DueState;
use timely_core::{AppContext, Priority, Task, TaskBoard};

use super::{fetch, finish, not_found, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Category label such as Work or Personal
        #[arg(long)]
        category: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// List active tasks with their due state
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Filter by priority
        #[arg(long)]
        priority: Option<Priority>,
        /// Show the archive instead
        #[arg(long)]
        archived: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a task's completed flag
    Toggle {
        /// Task ID
        id: String,
    },
    /// Move a task to the archive
    Archive {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Raise due-soon and overdue notifications
    Due,
}

fn state_label(state: DueState) -> &'static str {
    match state {
        DueState::Done => "done",
        DueState::Overdue => "OVERDUE",
        DueState::DueSoon => "due soon",
        DueState::Upcoming => "",
    }
}

pub async fn run(action: TaskAction, ctx: &AppContext) -> CmdResult {
    match action {
        TaskAction::Add {
            title,
            category,
            due,
            priority,
        } => {
            let task = Task::new(&title, &category, due, priority)?;
            let mut tasks = fetch::<Task>(ctx).await?;
            let outcome = tasks.add(&ctx.client, task).await;
            finish(outcome, "Task created")?;
        }
        TaskAction::List {
            category,
            priority,
            archived,
            json,
        } => {
            let board = TaskBoard::from_tasks(fetch::<Task>(ctx).await?.into_items());
            let shown: Vec<&Task> = if archived {
                board.archived.iter().collect()
            } else {
                board.filtered(category.as_deref(), priority)
            };

            if json {
                print_json(&shown)?;
                return Ok(());
            }
            if shown.is_empty() {
                println!("No tasks.");
                return Ok(());
            }
            let classifier = ctx.due_classifier();
            let now = Utc::now();
            for task in shown {
                println!(
                    "{}  {}  [{}] {} due {} {}",
                    if task.completed { "x" } else { " " },
                    task.id,
                    task.category,
                    task.title,
                    task.due_date,
                    state_label(classifier.classify(task, now)),
                );
            }
        }
        TaskAction::Toggle { id } => {
            let mut tasks = fetch::<Task>(ctx).await?;
            let task = tasks.find_mut(&id).ok_or_else(|| not_found("task", &id))?;
            task.toggle_completed();
            let updated = task.clone();
            let done = if updated.completed { "Task completed" } else { "Task reopened" };
            finish(tasks.save(&ctx.client, updated).await, done)?;
        }
        TaskAction::Archive { id } => {
            let mut tasks = fetch::<Task>(ctx).await?;
            let task = tasks
                .find_mut(&id)
                .filter(|t| !t.archived)
                .ok_or_else(|| not_found("active task", &id))?;
            task.archived = true;
            let updated = task.clone();
            finish(tasks.save(&ctx.client, updated).await, "Task archived")?;
        }
        TaskAction::Delete { id } => {
            let mut tasks = fetch::<Task>(ctx).await?;
            finish(tasks.delete(&ctx.client, &id).await, "Task deleted")?;
        }
        TaskAction::Due => {
            let tasks = fetch::<Task>(ctx).await?;
            let sent = ctx
                .due_classifier()
                .notify(tasks.items(), Utc::now(), ctx.notifier.as_ref());
            println!("{sent} notification(s) raised");
        }
    }
    Ok(())
}
