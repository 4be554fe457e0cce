//! Model metadata: listing and lookup by identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::ModelsApi;
use crate::client::Shared;
use crate::error::{Error, Result};
use crate::transport::encode_path_segment;

/// Family of models served by a listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    Language,
    Embedding,
    ImageGeneration,
}

impl ModelKind {
    fn path(self) -> &'static str {
        match self {
            ModelKind::Language => "/language-models",
            ModelKind::Embedding => "/embedding-models",
            ModelKind::ImageGeneration => "/image-generation-models",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModelKind::Language => "language",
            ModelKind::Embedding => "embedding",
            ModelKind::ImageGeneration => "image generation",
        })
    }
}

/// Metadata describing an available model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    id: String,
    #[serde(alias = "display_name")]
    name: String,
    description: String,
    max_tokens: Option<u32>,
    max_prompt_length: Option<u32>,
    version: String,
    aliases: Vec<String>,
    input_modalities: Vec<String>,
    output_modalities: Vec<String>,
    prompt_text_token_price: i64,
    completion_text_token_price: i64,
    /// Unix seconds.
    created: Option<i64>,
    #[serde(alias = "fingerprint")]
    system_fingerprint: String,
    owned_by: String,
    #[serde(skip)]
    kind: ModelKind,
}

impl Model {
    /// Minimal model record, mostly useful for test doubles.
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_tokens: Some(max_tokens),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Identifier accepted by [`ModelsClient::get`].
    pub fn id(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }

    /// Display name, or the identifier when the service sends none.
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Token limit: `max_tokens` when reported, else the maximum prompt length, else 0.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.or(self.max_prompt_length).unwrap_or(0)
    }

    pub fn max_prompt_length(&self) -> Option<u32> {
        self.max_prompt_length
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn input_modalities(&self) -> &[String] {
        &self.input_modalities
    }

    pub fn output_modalities(&self) -> &[String] {
        &self.output_modalities
    }

    pub fn prompt_text_token_price(&self) -> i64 {
        self.prompt_text_token_price
    }

    pub fn completion_text_token_price(&self) -> i64 {
        self.completion_text_token_price
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn system_fingerprint(&self) -> &str {
        &self.system_fingerprint
    }

    pub fn owned_by(&self) -> &str {
        &self.owned_by
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default, alias = "data")]
    models: Vec<Model>,
}

/// Access to the model metadata endpoints.
#[derive(Debug, Clone)]
pub struct ModelsClient {
    shared: Arc<Shared>,
}

impl ModelsClient {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// List all available language models.
    pub async fn list(&self) -> Result<Vec<Model>> {
        self.list_kind(ModelKind::Language).await
    }

    /// Retrieve a language model by identifier or alias.
    pub async fn get(&self, id: &str) -> Result<Model> {
        self.get_kind(ModelKind::Language, id).await
    }

    pub async fn list_embedding_models(&self) -> Result<Vec<Model>> {
        self.list_kind(ModelKind::Embedding).await
    }

    pub async fn get_embedding_model(&self, id: &str) -> Result<Model> {
        self.get_kind(ModelKind::Embedding, id).await
    }

    pub async fn list_image_generation_models(&self) -> Result<Vec<Model>> {
        self.list_kind(ModelKind::ImageGeneration).await
    }

    pub async fn get_image_generation_model(&self, id: &str) -> Result<Model> {
        self.get_kind(ModelKind::ImageGeneration, id).await
    }

    /// List every model of one kind.
    pub async fn list_kind(&self, kind: ModelKind) -> Result<Vec<Model>> {
        let rest = self.shared.rest()?;
        let response: ListModelsResponse = rest.get(kind.path()).await?;
        tracing::debug!(%kind, count = response.models.len(), "Listed models");

        Ok(response
            .models
            .into_iter()
            .map(|mut model| {
                model.kind = kind;
                model
            })
            .collect())
    }

    /// Retrieve one model of the given kind.
    pub async fn get_kind(&self, kind: ModelKind, id: &str) -> Result<Model> {
        if id.trim().is_empty() {
            return Err(Error::InvalidArgument("model name is required".to_string()));
        }
        let rest = self.shared.rest()?;
        let path = format!("{}/{}", kind.path(), encode_path_segment(id));
        let mut model: Model = rest.get(&path).await?;
        model.kind = kind;
        Ok(model)
    }
}

impl ModelsApi for ModelsClient {
    async fn list(&self) -> Result<Vec<Model>> {
        ModelsClient::list(self).await
    }

    async fn get(&self, id: &str) -> Result<Model> {
        ModelsClient::get(self, id).await
    }
}
