//! Root client that owns the connection pool and hands out sub-clients.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::auth::{AuthApi, AuthClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{ModelsApi, ModelsClient};
use crate::transport::RestClient;

/// State shared between the root client and its sub-clients.
#[derive(Debug)]
pub(crate) struct Shared {
    rest: RwLock<Option<RestClient>>,
}

impl Shared {
    /// Transport handle for one call, or [`Error::ClientClosed`] after `close()`.
    pub(crate) fn rest(&self) -> Result<RestClient> {
        self.rest
            .read()
            .map_err(|_| Error::ClientClosed)?
            .clone()
            .ok_or(Error::ClientClosed)
    }

    /// Drop the transport. Returns `true` only for the call that released it.
    fn release(&self) -> bool {
        match self.rest.write() {
            Ok(mut guard) => guard.take().is_some(),
            Err(poisoned) => poisoned.into_inner().take().is_some(),
        }
    }

    fn is_closed(&self) -> bool {
        self.rest.read().map(|guard| guard.is_none()).unwrap_or(true)
    }
}

/// Health snapshot reported by [`Client::health_status`].
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Client for the xAI API.
///
/// Dropping the client releases its connections; [`Client::close`] does the
/// same eagerly. Sub-clients obtained earlier fail with
/// [`Error::ClientClosed`] afterwards.
pub struct Client {
    config: Config,
    shared: Arc<Shared>,
    created_at: DateTime<Utc>,
}

impl Client {
    /// Create a new client with the given configuration.
    pub fn new(mut config: Config) -> Result<Self> {
        config.validate()?;
        let rest = RestClient::new(&config)?;
        tracing::debug!(base_url = rest.base_url(), "Created xAI client");

        Ok(Self {
            config,
            shared: Arc::new(Shared {
                rest: RwLock::new(Some(rest)),
            }),
            created_at: Utc::now(),
        })
    }

    /// Create a client from the environment configuration with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(Config::from_env().with_api_key(api_key))
    }

    /// Create a client entirely from `XAI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env())
    }

    /// Key validation and API key metadata.
    pub fn auth(&self) -> AuthClient {
        AuthClient::new(Arc::clone(&self.shared))
    }

    /// Model listing and lookup.
    pub fn models(&self) -> ModelsClient {
        ModelsClient::new(Arc::clone(&self.shared))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    /// Release the underlying connections. Calling it again is a no-op.
    pub fn close(&self) {
        if self.shared.release() {
            tracing::debug!("Closed xAI client");
        }
    }

    pub fn health_status(&self) -> HealthStatus {
        let (status, message) = if self.is_closed() {
            ("closed", "Client is closed")
        } else {
            ("ready", "Client is ready")
        };
        HealthStatus {
            status: status.to_string(),
            timestamp: Utc::now(),
            message: message.to_string(),
        }
    }
}

/// A root client that hands out narrower service handles.
pub trait XaiApi {
    type Auth: AuthApi;
    type Models: ModelsApi;

    fn auth(&self) -> Self::Auth;
    fn models(&self) -> Self::Models;
}

impl XaiApi for Client {
    type Auth = AuthClient;
    type Models = ModelsClient;

    fn auth(&self) -> AuthClient {
        Client::auth(self)
    }

    fn models(&self) -> ModelsClient {
        Client::models(self)
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Client{{Config:{}, CreatedAt:{}, Closed:{}}}",
            self.config,
            self.created_at.to_rfc3339(),
            self.is_closed()
        )
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("created_at", &self.created_at)
            .field("closed", &self.is_closed())
            .finish()
    }
}
