//! Error types shared by every xAI sub-client.

use thiserror::Error;

/// Result alias used throughout the SDK.
pub type Result<T> = std::result::Result<T, Error>;

/// SDK errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("client is closed")]
    ClientClosed,
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-2xx response. `body` may echo request data; prefer
    /// [`Error::safe_message`] when logging.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    /// Retry budget spent. `last` is the error from the final attempt.
    #[error("max retries exceeded after {retries} retries: {}", .last.safe_message())]
    MaxRetriesExceeded {
        retries: u32,
        #[source]
        last: Box<Error>,
    },
}

impl Error {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Request(e) => e.status().map(|s| s.as_u16()),
            Error::MaxRetriesExceeded { last, .. } => last.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Whether the request that produced this error may succeed if sent again
    /// (timeouts, dropped connections, 408, 429 and 5xx responses).
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Http { status, .. } => matches!(status, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Error text without the response body.
    pub fn safe_message(&self) -> String {
        match self {
            Error::Http { status, .. } => format!("HTTP {} error", status),
            other => other.to_string(),
        }
    }
}
