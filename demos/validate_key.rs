//! Validate the API key in `XAI_API_KEY` and print the result.
//!
//! Run with: cargo run --example validate_key

use tracing_subscriber::EnvFilter;
use xai_sdk::{Client, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize tracing for debug output (RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut out = std::io::stdout();
    xai_sdk::commands::validate_key(
        |key| std::env::var(key).ok(),
        |api_key| Client::new(Config::from_env().with_api_key(api_key)),
        &mut out,
    )
    .await?;

    Ok(())
}
