//! JSON-over-HTTPS transport shared by every sub-client.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::retry::{with_retry, RetryPolicy};
use crate::config::Config;
use crate::error::{Error, Result};

/// Maximum size of a response body (100 MiB).
pub const MAX_RESPONSE_SIZE: usize = 100 * 1024 * 1024;

pub const CLIENT_VERSION_HEADER: &str = "x-client-version";
pub const ENVIRONMENT_HEADER: &str = "x-environment";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Value of the `x-client-version` header.
pub const CLIENT_VERSION: &str = concat!("xai-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Authenticated REST client bound to one base URL.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl RestClient {
    /// Build the HTTP client. `config` must already be validated.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = header_value(&format!("Bearer {}", config.api_key), "api_key")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, header_value(&config.user_agent, "user_agent")?);
        headers.insert(CLIENT_VERSION_HEADER, HeaderValue::from_static(CLIENT_VERSION));
        headers.insert(ENVIRONMENT_HEADER, header_value(&config.environment, "environment")?);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::from_config(config),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a GET request and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.execute(Method::GET, path, None).await?;
        decode(&body)
    }

    /// Execute a POST request with a JSON body and decode the JSON response.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let payload = serde_json::to_value(body)
            .map_err(|e| Error::InvalidArgument(format!("failed to encode request body: {}", e)))?;
        let body = self.execute(Method::POST, path, Some(&payload)).await?;
        decode(&body)
    }

    async fn execute(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        with_retry(&self.retry, || self.send_once(method.clone(), &url, body)).await
    }

    /// Send a single request to the API.
    async fn send_once(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Vec<u8>> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%method, url, request_id = %request_id, "Sending request");

        let mut request = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = read_limited(response).await?;
        tracing::debug!(status = status.as_u16(), bytes = bytes.len(), request_id = %request_id, "Received response");

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes)
    }
}

fn header_value(value: &str, field: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::Config(format!("{} contains characters not allowed in a header", field)))
}

async fn read_limited(mut response: reqwest::Response) -> Result<Vec<u8>> {
    if let Some(len) = response.content_length() {
        if len as usize > MAX_RESPONSE_SIZE {
            return Err(Error::Parse(format!(
                "response body of {} bytes exceeds the {} byte limit",
                len, MAX_RESPONSE_SIZE
            )));
        }
    }

    let mut buf = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if buf.len() + chunk.len() > MAX_RESPONSE_SIZE {
            return Err(Error::Parse(format!(
                "response body exceeds the {} byte limit",
                MAX_RESPONSE_SIZE
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Parse(e.to_string()))
}
