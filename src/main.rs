mod analysis;
mod auth;
mod cli;
mod config;
mod error;
mod output;
mod providers;
mod report;
mod telemetry;
mod workflow;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting actperf - GitHub Actions step performance");
    cli.execute().await?;

    Ok(())
}
