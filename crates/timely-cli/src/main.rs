use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "timely-cli", version, about = "Timely Tales CLI")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    /// API base URL for this run, overriding `api.base_url`
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login, registration and the stored token
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Diary entries
    Diary {
        #[command(subcommand)]
        action: commands::diary::DiaryAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Goals and milestones
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Mood journal
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Class schedule
    Class {
        #[command(subcommand)]
        action: commands::class::ClassAction,
    },
    /// Gratitude journal
    Gratitude {
        #[command(subcommand)]
        action: commands::gratitude::GratitudeAction,
    },
    /// Time capsules
    Capsule {
        #[command(subcommand)]
        action: commands::capsule::CapsuleAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("timely=debug")
    } else {
        EnvFilter::try_from_env("TIMELY_LOG").unwrap_or_else(|_| EnvFilter::new("timely=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn dispatch(cli: Cli) -> commands::CmdResult {
    let api_url = cli.api_url.as_deref();
    let ctx = || commands::open_context(api_url);
    match cli.command {
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action, &mut ctx()?).await,
        Commands::Diary { action } => commands::diary::run(action, &ctx()?).await,
        Commands::Task { action } => commands::task::run(action, &ctx()?).await,
        Commands::Goal { action } => commands::goal::run(action, &ctx()?).await,
        Commands::Habit { action } => commands::habit::run(action, &ctx()?).await,
        Commands::Mood { action } => commands::mood::run(action, &ctx()?).await,
        Commands::Class { action } => commands::class::run(action, &ctx()?).await,
        Commands::Gratitude { action } => commands::gratitude::run(action, &ctx()?).await,
        Commands::Capsule { action } => commands::capsule::run(action, &ctx()?).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = dispatch(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
