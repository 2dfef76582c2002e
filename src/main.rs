use anyhow::Result;
use clap::Parser;

mod cli;
mod config;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    model::init_tracing();
    // .env has to be loaded before clap reads DATABASE_URL
    config::load_env();

    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
