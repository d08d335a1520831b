use crate::prelude::*;
use books_core::tenant::Region;
use clap::Parser;

mod cli;
mod config;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Expenses and sales orders of a Zoho Books organization"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Data center of the organization (default or eu); overrides BOOKS_REGION
    #[clap(long, global = true)]
    region: Option<Region>,

    /// API root to use instead of the regional one; overrides BOOKS_BASE_URL
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "BOOKS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    /// Environment configuration with the CLI flags applied on top
    pub fn config(&self) -> Result<config::BooksConfig> {
        Ok(config::BooksConfig::from_env()?
            .with_overrides(self.region, self.base_url.clone()))
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Expenses and their receipts
    #[clap(subcommand)]
    Expenses(cli::expenses::Commands),

    /// Sales orders, their emails, PDFs and attachments
    #[clap(subcommand, name = "salesorders")]
    SalesOrders(cli::salesorders::Commands),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Expenses(cmd) => cli::expenses::run(cmd, app.global).await,
        SubCommands::SalesOrders(cmd) => cli::salesorders::run(cmd, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
