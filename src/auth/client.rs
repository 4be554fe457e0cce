//! Client for the xAI Auth API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::AuthApi;
use crate::client::Shared;
use crate::error::{Error, Result};
use crate::transport::encode_path_segment;

/// An API key with metadata, as returned by the Auth API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiKey {
    #[serde(alias = "redacted_api_key")]
    pub redacted_api_key: String,
    #[serde(alias = "user_id")]
    pub user_id: String,
    pub name: String,
    #[serde(alias = "create_time")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(alias = "team_id")]
    pub team_id: String,
    pub acls: Vec<String>,
    #[serde(alias = "api_key_id")]
    pub api_key_id: String,
    #[serde(alias = "modify_time")]
    pub modify_time: Option<DateTime<Utc>>,
    #[serde(alias = "api_key_blocked")]
    pub api_key_blocked: bool,
    #[serde(alias = "modified_by")]
    pub modified_by: String,
    pub disabled: bool,
    #[serde(alias = "team_blocked")]
    pub team_blocked: bool,
}

/// Outcome of checking an API key.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    valid: bool,
    message: String,
    organization: String,
    project: String,
    key: Option<ApiKey>,
}

impl ValidationResult {
    /// Build a result from key metadata returned by the service.
    pub fn from_key(key: ApiKey) -> Self {
        let (valid, message) = if key.disabled {
            (false, "API key is disabled")
        } else if key.api_key_blocked {
            (false, "API key is blocked")
        } else if key.team_blocked {
            (false, "Team is blocked")
        } else {
            (true, "API key is valid")
        };

        Self {
            valid,
            message: message.to_string(),
            organization: key.team_id.clone(),
            project: key.name.clone(),
            key: Some(key),
        }
    }

    /// A key the service refused outright.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            organization: String::new(),
            project: String::new(),
            key: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Owning team of the key.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Name the key was created under.
    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.key.as_ref()
    }
}

#[derive(Debug, Serialize)]
struct ValidateRequest<'a> {
    api_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct ListKeysResponse {
    #[serde(default)]
    keys: Vec<ApiKey>,
}

/// Access to the `/auth` endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    shared: Arc<Shared>,
}

impl AuthClient {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    #[cfg(test)]
    pub(crate) fn shared(&self) -> &Shared {
        &self.shared
    }

    /// Check `api_key` against the service.
    ///
    /// A key the service rejects (HTTP 401/403) yields an invalid result
    /// rather than an error; transport and server failures are errors.
    pub async fn validate(&self, api_key: &str) -> Result<ValidationResult> {
        match self.validate_key(api_key).await {
            Ok(key) => Ok(ValidationResult::from_key(key)),
            Err(Error::Http { status, body }) if status == 401 || status == 403 => {
                tracing::debug!(status, "API key rejected by the service");
                Ok(ValidationResult::rejected(rejection_message(status, &body)))
            }
            Err(e) => Err(e),
        }
    }

    /// Validate an API key and return its metadata.
    pub async fn validate_key(&self, api_key: &str) -> Result<ApiKey> {
        if api_key.trim().is_empty() {
            return Err(Error::InvalidArgument("API key is required".to_string()));
        }
        let rest = self.shared.rest()?;
        rest.post("/auth/validate", &ValidateRequest { api_key }).await
    }

    /// Retrieve API key metadata by ID.
    pub async fn get_key(&self, api_key_id: &str) -> Result<ApiKey> {
        if api_key_id.trim().is_empty() {
            return Err(Error::InvalidArgument("API key ID is required".to_string()));
        }
        let rest = self.shared.rest()?;
        rest.get(&format!("/auth/keys/{}", encode_path_segment(api_key_id)))
            .await
    }

    /// List API keys for the authenticated user.
    pub async fn list_keys(&self) -> Result<Vec<ApiKey>> {
        let rest = self.shared.rest()?;
        let response: ListKeysResponse = rest.get("/auth/keys").await?;
        Ok(response.keys)
    }
}

impl AuthApi for AuthClient {
    async fn validate(&self, api_key: &str) -> Result<ValidationResult> {
        AuthClient::validate(self, api_key).await
    }
}

/// Pull a human-readable message out of an error body, falling back to the status.
fn rejection_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        v.get("error")
            .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(Value::as_str)))
            .or_else(|| v.get("message").and_then(Value::as_str))
            .map(str::to_string)
    });

    from_json
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| format!("API key was rejected (HTTP {})", status))
}
