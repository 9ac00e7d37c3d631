use anyhow::Context;
use clap::Parser;
use spycats_console::{session, UreqTransport};
use spycats_core::{SpyCatClient, SpyCatController};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spycats")]
#[command(about = "Manage the spy cat agency roster from a terminal")]
#[command(after_help = "Environment:\n  SPY_CATS_API_URL   Backend base URL\n  RUST_LOG           Log filter (logs go to stderr)")]
struct Cli {
    /// Base URL of the spy cat backend.
    #[arg(long, env = "SPY_CATS_API_URL", default_value = "http://localhost:8000")]
    api_url: String,
}

fn main() -> anyhow::Result<()> {
    // Allow missing `.env` files without failing.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = SpyCatClient::new(&cli.api_url);
    tracing::info!(api_url = client.base_url(), "spycats starting");

    let mut page = SpyCatController::new(client);
    let transport = UreqTransport::new();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    session::run(&mut page, &transport, stdin.lock(), stdout.lock())
        .with_context(|| "terminal session failed")?;
    Ok(())
}
