//! Client configuration.

mod env;

pub use env::parse_duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of retry attempts for failed requests.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default initial delay between retry attempts.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Default upper bound for the retry delay.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Default deployment environment reported to the API.
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Default `User-Agent`, e.g. `xai-sdk-rust/0.1.0 (linux; x86_64)`.
pub static DEFAULT_USER_AGENT: Lazy<String> = Lazy::new(|| {
    format!(
        "xai-sdk-rust/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
});

/// Configuration for [`crate::Client`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    /// Maximum number of retry attempts for failed requests.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further attempt.
    #[serde(with = "duration_secs")]
    pub retry_backoff: Duration,
    #[serde(with = "duration_secs")]
    pub max_backoff: Duration,
    pub environment: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            user_agent: DEFAULT_USER_AGENT.clone(),
        }
    }
}

impl Config {
    /// Defaults, then the settings file (if any), then `XAI_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = crate::settings::load_file().unwrap_or_default();
        config.load_from_env();
        config
    }

    /// Create a new Config with custom API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Create a new Config with custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for failed requests.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial and maximum delay between retry attempts.
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.retry_backoff = initial;
        self.max_backoff = max;
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check the configuration and fill blank optional fields with defaults.
    pub fn validate(&mut self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config(
                "API key is required. Set XAI_API_KEY environment variable or call with_api_key()"
                    .to_string(),
            ));
        }

        let base_url = self.base_url.trim_end_matches('/');
        if base_url.is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        } else if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got {}",
                self.base_url
            )));
        } else {
            self.base_url = base_url.to_string();
        }

        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be positive".to_string()));
        }
        if self.connect_timeout.is_zero() {
            return Err(Error::Config("connect_timeout must be positive".to_string()));
        }
        if self.retry_backoff.is_zero() {
            return Err(Error::Config("retry_backoff must be positive".to_string()));
        }
        if self.max_backoff < self.retry_backoff {
            return Err(Error::Config(
                "max_backoff must be greater than or equal to retry_backoff".to_string(),
            ));
        }

        if self.environment.is_empty() {
            self.environment = DEFAULT_ENVIRONMENT.to_string();
        }
        if self.user_agent.is_empty() {
            self.user_agent = DEFAULT_USER_AGENT.clone();
        }

        Ok(())
    }
}

/// First 10 characters of the key followed by `*` for the rest.
pub fn mask_api_key(api_key: &str) -> String {
    let visible: String = api_key.chars().take(10).collect();
    let hidden = api_key.chars().count().saturating_sub(10);
    format!("{}{}", visible, "*".repeat(hidden))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config{{BaseURL:{}, Timeout:{:?}, MaxRetries:{}, Environment:{}, APIKey:{}}}",
            self.base_url,
            self.timeout,
            self.max_retries,
            self.environment,
            if self.api_key.is_empty() { "<unset>" } else { "[REDACTED]" }
        )
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("max_backoff", &self.max_backoff)
            .field("environment", &self.environment)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Durations are stored as (fractional) seconds in the settings file.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://api.x.ai/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.environment, "production");
        assert!(config.user_agent.starts_with("xai-sdk-rust/"));
    }

    #[test]
    fn test_validate_requires_api_key() {
        let mut config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("XAI_API_KEY")));
    }

    #[test]
    fn test_validate_normalizes_base_url() {
        let mut config = Config::default()
            .with_api_key("xai-test")
            .with_base_url("http://localhost:8080/v1/");
        config.validate().unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default()
            .with_api_key("xai-test")
            .with_base_url("ftp://example.com");
        assert!(config.validate().is_err());

        let mut config = Config::default()
            .with_api_key("xai-test")
            .with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());

        let mut config = Config::default()
            .with_api_key("xai-test")
            .with_backoff(Duration::from_secs(5), Duration::from_secs(1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_redacts_key() {
        let config = Config::default().with_api_key("xai-super-secret");
        assert!(!config.to_string().contains("super-secret"));
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("xai-1234567890ab"), "xai-123456******");
        assert_eq!(mask_api_key("short"), "short");
    }

    #[test]
    fn test_settings_json_roundtrip_uses_seconds() {
        let json = r#"{"base_url":"http://localhost:9000/v1","timeout":2.5}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }
}
