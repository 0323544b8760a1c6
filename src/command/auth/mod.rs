mod login;
mod logout;
mod status;
mod token;
mod whoami;

use clap::{Parser, Subcommand};

use crate::{context::ShopctlContext, ShopctlOutput, ShopctlResult};

#[derive(Debug, Parser)]
pub struct Auth {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in through your browser
    Login(login::Login),

    /// Revoke and forget the stored session
    Logout(logout::Logout),

    /// Show who you are logged in as
    #[clap(name = "whoami")]
    WhoAmI(whoami::WhoAmI),

    /// Show the state of the stored session without contacting any server
    Status(status::Status),

    /// Print a valid access token, refreshing it first if needed
    Token(token::Token),
}

impl Auth {
    pub async fn run(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        match &self.command {
            Command::Login(command) => command.run(context).await,
            Command::Logout(command) => command.run(context).await,
            Command::WhoAmI(command) => command.run(context).await,
            Command::Status(command) => command.run(context),
            Command::Token(command) => command.run(context).await,
        }
    }
}
