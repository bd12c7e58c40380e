pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod session;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use config::Config;
pub use db::Store;
pub use session::Session;

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = cli::Cli::parse();
    cli::execute(cli, &config).await
}
