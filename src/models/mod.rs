//! Model metadata module.

mod client;

pub use client::{Model, ModelKind, ModelsClient};

use crate::error::Result;

/// Model listing as seen by callers; implemented by [`ModelsClient`] and by test doubles.
#[allow(async_fn_in_trait)]
pub trait ModelsApi {
    async fn list(&self) -> Result<Vec<Model>>;
    async fn get(&self, id: &str) -> Result<Model>;
}
