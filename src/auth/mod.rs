//! API key validation and key metadata.

mod client;

pub use client::{ApiKey, AuthClient, ValidationResult};

use crate::error::Result;

/// Key validation as seen by callers; implemented by [`AuthClient`] and by test doubles.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn validate(&self, api_key: &str) -> Result<ValidationResult>;
}
