//! xai - command-line access to the xAI API
//!
//! This is the CLI entry point for the xai-sdk crate.
//! Run with: cargo run --bin xai -- <command>

use std::env;
use std::io::{self, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use xai_sdk::commands::{self, API_KEY_ENV};
use xai_sdk::{Client, Config};

const USAGE: &str = "\
Usage: xai <command>

Commands:
  validate          Validate the API key in XAI_API_KEY
  models            List language models and show details for the first one
  models get <id>   Show details for one language model
  keys              List the API keys of the authenticated user
  config            Print the effective client configuration
  help              Show this message

Configuration is read from XAI_* environment variables and an optional .env file.
Set RUST_LOG=debug for request-level logging.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.as_slice() {
        ["validate"] => {
            commands::validate_key(env_lookup, |key| Client::with_api_key(key), &mut out).await?;
        }
        ["models"] => {
            commands::list_models(env_lookup, |key| Client::with_api_key(key), &mut out).await?;
        }
        ["models", "get", id] => {
            let client = connect()?;
            let model = client
                .models()
                .get(id)
                .await
                .with_context(|| format!("Failed to get model {}", id))?;
            commands::print_model_details(id, &model, &mut out)?;
        }
        ["keys"] => {
            let client = connect()?;
            let keys = client
                .auth()
                .list_keys()
                .await
                .context("Failed to list API keys")?;
            writeln!(out, "API Keys ({}):", keys.len())?;
            for key in &keys {
                writeln!(
                    out,
                    "  - {} [{}] {}{}",
                    key.name,
                    key.api_key_id,
                    key.redacted_api_key,
                    if key.disabled { " (disabled)" } else { "" }
                )?;
            }
        }
        ["config"] => {
            let config = Config::from_env();
            writeln!(out, "{}", config)?;
            if let Some(path) = xai_sdk::settings::settings_path() {
                writeln!(out, "Settings file: {}", path.display())?;
            }
        }
        [] | ["help"] | ["--help"] | ["-h"] => {
            writeln!(out, "{}", USAGE)?;
        }
        other => {
            eprintln!("{}", USAGE);
            anyhow::bail!("unknown command: {}", other.join(" "));
        }
    }

    Ok(())
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Build a client for the ad-hoc commands, requiring the API key first.
fn connect() -> anyhow::Result<Client> {
    let api_key = commands::require_api_key(env_lookup)?;
    Client::with_api_key(api_key).with_context(|| {
        format!("Failed to create client (check {} and XAI_* settings)", API_KEY_ENV)
    })
}
