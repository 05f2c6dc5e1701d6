use anyhow::Result;
use clap::Parser;
use codepipeline_status_reporter::cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Starting CodePipeline status reporter");
    cli.execute().await?;

    Ok(())
}
