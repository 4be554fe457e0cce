// Copyright 2025 xai-sdk contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # xai-sdk
//!
//! Client for the xAI REST API.
//!
//! A [`Client`] owns the connection pool and hands out narrow sub-clients:
//! [`Client::auth`] for API key validation and key metadata, and
//! [`Client::models`] for model listing and lookup. Dropping the client (or
//! calling [`Client::close`]) releases its connections.
//!
//! ## Validate a key
//!
//! ```rust,no_run
//! use xai_sdk::Client;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api_key = std::env::var("XAI_API_KEY")?;
//!     let client = Client::with_api_key(&api_key)?;
//!
//!     let result = client.auth().validate(&api_key).await?;
//!     println!("valid: {} ({})", result.is_valid(), result.message());
//!     Ok(())
//! }
//! ```
//!
//! ## List models
//!
//! ```rust,no_run
//! use xai_sdk::{Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env().with_max_retries(5);
//!     let client = Client::new(config)?;
//!
//!     for model in client.models().list().await? {
//!         println!("{}: {} (max tokens: {})", model.id(), model.name(), model.max_tokens());
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod settings;
pub mod transport;

pub use auth::{ApiKey, AuthApi, AuthClient, ValidationResult};
pub use client::{Client, HealthStatus, XaiApi};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{Model, ModelKind, ModelsApi, ModelsClient};
