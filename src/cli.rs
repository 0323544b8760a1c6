use clap::{Parser, Subcommand};

use crate::command::{self, output::JsonOutput, FormatType, ShopctlOutput};
use crate::context::ShopctlContext;
use crate::utils::{
    env::{ShopctlEnv, ShopctlEnvKey},
    logger::{self, Level},
};
use crate::{ShopctlError, ShopctlResult};

#[derive(Debug, Parser)]
#[command(
    name = "shopctl",
    author,
    version,
    about = "
shopctl - manage your store from the command line

To get started, log in with your browser:

    $ shopctl auth login

Check who you are logged in as:

    $ shopctl auth whoami

Then call the commerce API directly:

    $ shopctl api GET /api/v1/products
"
)]
pub struct Shopctl {
    #[clap(subcommand)]
    pub command: Command,

    /// Specify shopctl's log level
    #[arg(long = "log", short = 'l', global = true)]
    pub log_level: Option<Level>,

    /// Specify the output format (human or json). Defaults to $SHOPCTL_OUTPUT, then human.
    #[arg(long = "format", global = true, value_enum)]
    pub format: Option<FormatType>,

    #[clap(skip)]
    pub env_store: ShopctlEnv,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in, log out, and inspect the stored session
    Auth(command::Auth),

    /// Inspect shopctl's configuration
    Config(command::Config),

    /// Make an authenticated request to the commerce API
    Api(command::Api),
}

impl Shopctl {
    /// Runs the command, prints its output and returns the process exit status
    pub async fn run_from_args(&self) -> i32 {
        logger::init(self.log_level);
        tracing::trace!(command_structure = ?self);

        let format = self.format();
        match self.run().await {
            Ok(output) => match output.print(format) {
                Ok(()) => 0,
                Err(_) => 1,
            },
            Err(error) => {
                tracing::debug!(?error);
                let _ = match format {
                    FormatType::Json => JsonOutput::failure(&error).print(),
                    FormatType::Human => error.print(),
                };
                error.exit_code()
            }
        }
    }

    pub async fn run(&self) -> ShopctlResult<ShopctlOutput> {
        let context = ShopctlContext::new(&self.env_store)?;
        self.run_with(&context).await
    }

    pub async fn run_with(&self, context: &ShopctlContext) -> ShopctlResult<ShopctlOutput> {
        match &self.command {
            Command::Auth(command) => command.run(context).await,
            Command::Config(command) => command.run(context),
            Command::Api(command) => command.run(context).await,
        }
    }

    /// `--format`, then `$SHOPCTL_OUTPUT`, then human
    pub fn format(&self) -> FormatType {
        if let Some(format) = self.format {
            return format;
        }
        match self.env_store.get(ShopctlEnvKey::Output) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|error: anyhow::Error| {
                let _ = ShopctlError::new(error).print();
                FormatType::default()
            }),
            _ => FormatType::default(),
        }
    }
}
