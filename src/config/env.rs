//! `XAI_*` environment variable overrides.

use std::time::Duration;

use super::Config;

impl Config {
    /// Apply overrides from the process environment.
    pub fn load_from_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty and unparsable values leave the current setting untouched.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(api_key) = get("XAI_API_KEY") {
            self.api_key = api_key;
        }

        if let Some(base_url) = get("XAI_BASE_URL") {
            self.base_url = base_url;
        } else if let Some(host) = get("XAI_HTTP_HOST") {
            let insecure = get("XAI_INSECURE")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false);
            let scheme = if insecure { "http" } else { "https" };
            self.base_url = format!("{}://{}/v1", scheme, host);
        }

        if let Some(v) = get("XAI_TIMEOUT") {
            set_duration("XAI_TIMEOUT", &v, &mut self.timeout);
        }
        if let Some(v) = get("XAI_CONNECT_TIMEOUT") {
            set_duration("XAI_CONNECT_TIMEOUT", &v, &mut self.connect_timeout);
        }
        if let Some(v) = get("XAI_RETRY_BACKOFF") {
            set_duration("XAI_RETRY_BACKOFF", &v, &mut self.retry_backoff);
        }
        if let Some(v) = get("XAI_MAX_BACKOFF") {
            set_duration("XAI_MAX_BACKOFF", &v, &mut self.max_backoff);
        }

        if let Some(v) = get("XAI_MAX_RETRIES") {
            match v.trim().parse::<u32>() {
                Ok(n) => self.max_retries = n,
                Err(_) => tracing::warn!("Ignoring invalid XAI_MAX_RETRIES value: {}", v),
            }
        }

        if let Some(environment) = get("XAI_ENVIRONMENT") {
            self.environment = environment;
        }
        if let Some(user_agent) = get("XAI_USER_AGENT") {
            self.user_agent = user_agent;
        }
    }
}

fn set_duration(key: &str, value: &str, target: &mut Duration) {
    match parse_duration(value) {
        Some(d) => *target = d,
        None => tracing::warn!("Ignoring invalid {} value: {}", key, value),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse `500ms`, `30s`, `2m`, `1h` or a bare number of seconds.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (number, unit) = match value.find(|c: char| c.is_ascii_alphabetic()) {
        Some(idx) => value.split_at(idx),
        None => (value, "s"),
    };
    let number: f64 = number.trim().parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    let secs = match unit {
        "ms" => number / 1000.0,
        "s" => number,
        "m" => number * 60.0,
        "h" => number * 3600.0,
        _ => return None,
    };
    Duration::try_from_secs_f64(secs).ok()
}
