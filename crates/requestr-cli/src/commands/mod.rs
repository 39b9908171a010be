//! Command implementations.

mod delete;
mod get;
mod post;

use clap::Args;

pub use delete::DeleteCommand;
pub use get::GetCommand;
pub use post::PostCommand;

/// Basic authentication flags shared by every request command
#[derive(Debug, Clone, Default, Args)]
pub struct AuthArgs {
    /// Basic auth username
    #[arg(short, long)]
    pub user: Option<String>,

    /// Basic auth password
    #[arg(short, long, requires = "user")]
    pub password: Option<String>,
}

impl AuthArgs {
    /// `(username, password)` when a username was given
    pub fn credentials(&self) -> Option<(String, String)> {
        self.user
            .clone()
            .map(|user| (user, self.password.clone().unwrap_or_default()))
    }
}
