use clap::{Parser, Subcommand};

use crate::{context::ShopctlContext, ShopctlOutput, ShopctlResult};

#[derive(Debug, Parser)]
pub struct Config {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the location of the credential file
    Path,
}

impl Config {
    pub fn run(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        match &self.command {
            Command::Path => Ok(ShopctlOutput::ConfigPath(context.config.credentials_path())),
        }
    }
}
