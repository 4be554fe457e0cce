//! List the available language models and show details for the first one.
//!
//! Run with: RUST_LOG=debug cargo run --example list_models

use tracing_subscriber::EnvFilter;
use xai_sdk::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut out = std::io::stdout();
    xai_sdk::commands::list_models(
        |key| std::env::var(key).ok(),
        |api_key| {
            let client = Client::with_api_key(api_key)?;
            tracing::debug!("Client config: {}", client.config());
            tracing::debug!("Client health: {:?}", client.health_status());
            Ok(client)
        },
        &mut out,
    )
    .await?;

    tracing::debug!("Program completed successfully");
    Ok(())
}
