//! Process Agent binary
//!
//! Loads `.env` if present, sets up logging on stderr so the terminal
//! conversation on stdout stays clean, and hands off to the interactive
//! session loop.

use process_agent::{agent_options, run_interactive_session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = agent_options();
    run_interactive_session(&options).await?;
    Ok(())
}
