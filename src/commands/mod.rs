//! Command implementations behind the `xai` binary and the demo programs.
//!
//! Each command follows the same sequence: read the API key, connect, make
//! one or two calls, print a report. Every failure ends the command with a
//! [`CommandError`]; the client is dropped (and released) on the way out.

mod list_models;
mod validate;

pub use list_models::{list_models, print_model_details, print_models};
pub use validate::{print_validation, validate_key};

use std::io;
use thiserror::Error;

use crate::client::XaiApi;
use crate::config::mask_api_key;

/// Name of the environment variable holding the API key.
pub const API_KEY_ENV: &str = "XAI_API_KEY";

/// Command errors. Each variant names the step that failed.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{} environment variable is required", API_KEY_ENV)]
    MissingApiKey,
    #[error("Failed to create client: {0}")]
    Connect(#[source] crate::Error),
    #[error("Failed to validate API key: {0}")]
    Validate(#[source] crate::Error),
    #[error("Failed to list models: {0}")]
    ListModels(#[source] crate::Error),
    #[error("Failed to get model {id}: {source}")]
    GetModel {
        id: String,
        #[source]
        source: crate::Error,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Read the API key through `lookup`; blank values count as missing.
pub fn require_api_key<F>(lookup: F) -> Result<String, CommandError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = lookup(API_KEY_ENV)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(CommandError::MissingApiKey)?;
    tracing::debug!("Using API key: {}", mask_api_key(&api_key));
    Ok(api_key)
}

/// Resolve the key, then build a client with `make_client`.
///
/// `make_client` is never called when the key is missing.
pub fn connect<C, L, F>(lookup: L, make_client: F) -> Result<(String, C), CommandError>
where
    C: XaiApi,
    L: Fn(&str) -> Option<String>,
    F: FnOnce(&str) -> crate::Result<C>,
{
    let api_key = require_api_key(lookup)?;
    let client = make_client(&api_key).map_err(CommandError::Connect)?;
    Ok((api_key, client))
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_require_api_key() {
        assert_eq!(require_api_key(env_with_key(" xai-abc ")).unwrap(), "xai-abc");
        assert!(matches!(require_api_key(empty_env), Err(CommandError::MissingApiKey)));
        assert!(matches!(require_api_key(env_with_key("   ")), Err(CommandError::MissingApiKey)));
    }

    #[test]
    fn test_missing_key_never_connects() {
        let connected = Cell::new(false);
        let result = connect(empty_env, |_| {
            connected.set(true);
            Ok(FakeClient::new(Rc::default(), true, vec![]))
        });
        assert!(matches!(result, Err(CommandError::MissingApiKey)));
        assert!(!connected.get());
    }

    #[test]
    fn test_connect_error_is_reported() {
        let result = connect::<FakeClient, _, _>(env_with_key("xai-abc"), |_| {
            Err(crate::Error::Config("bad base url".to_string()))
        });
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "Failed to create client: invalid configuration: bad base url");
    }

    #[test]
    fn test_missing_key_message() {
        assert_eq!(
            CommandError::MissingApiKey.to_string(),
            "XAI_API_KEY environment variable is required"
        );
    }
}
