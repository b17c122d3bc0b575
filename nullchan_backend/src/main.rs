use anyhow::Result;
use clap::{Parser, Subcommand};
use nullchan_backend::api;
use nullchan_backend::bootstrap;
use nullchan_backend::cli;
use nullchan_backend::config::NullchanConfig;
use nullchan_backend::telemetry;
use nullchan_backend::utils;

#[derive(Parser)]
#[command(author, version, about = "Nullchan message board daemon and CLI")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (Axum) for REST/API access
    Serve,
    /// Start the interactive CLI for browsing and moderating boards
    Cli,
}

#[tokio::main]
async fn main() -> Result<()> {
    utils::print_banner();
    telemetry::init_tracing();

    let args = Args::parse();

    let config = NullchanConfig::from_env()?;
    let resources = bootstrap::initialize(&config)?;
    tracing::info!(
        directories_created = ?resources.directories_created,
        database_initialized = resources.database_initialized,
        "bootstrap complete"
    );

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => api::serve_http(config, resources.database).await,
        Command::Cli => cli::run_cli(resources.database).await,
    }
}
