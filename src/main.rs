mod boards;
mod cli;
mod config;
mod model;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use boards::{Boards, HttpTransport};
use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr so command output stays clean
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let session = config::load_config()?.session(cli.connection.into())?;
    let boards = Boards::new(session, Box::new(HttpTransport::new()));
    debug!(
        organization = boards.session().organization(),
        project = boards.session().project(),
        "session ready"
    );

    cli::run(&boards, cli.command).await;

    Ok(())
}
