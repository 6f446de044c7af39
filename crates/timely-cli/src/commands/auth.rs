use clap::Subcommand;
use timely_core::AppContext;

use super::CmdResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in and store the access token
    Login {
        username: String,
        /// Password
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        username: String,
        /// Password
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Show whether a token is stored
    Status,
}

pub async fn run(action: AuthAction, ctx: &mut AppContext) -> CmdResult {
    match action {
        AuthAction::Login { username, password } => {
            ctx.login(&username, &password).await?;
            println!("logged in as {username}");
        }
        AuthAction::Register { username, password } => {
            timely_core::api::auth::register(&ctx.client, &username, &password).await?;
            println!("registered {username}; run `auth login` to sign in");
        }
        AuthAction::Logout => {
            ctx.logout()?;
            println!("logged out");
        }
        AuthAction::Status => {
            if ctx.is_authenticated() {
                println!("authenticated against {}", ctx.client.base_url());
            } else {
                println!("not logged in");
            }
        }
    }
    Ok(())
}
