//! `validate`: check an API key and print the outcome.

use std::io::Write;

use super::{connect, CommandError};
use crate::auth::{AuthApi, ValidationResult};
use crate::client::XaiApi;

/// Read the key, connect, validate the key, and print the report to `out`.
pub async fn validate_key<C, L, F, W>(lookup: L, make_client: F, out: &mut W) -> Result<(), CommandError>
where
    C: XaiApi,
    L: Fn(&str) -> Option<String>,
    F: FnOnce(&str) -> crate::Result<C>,
    W: Write,
{
    let (api_key, client) = connect(lookup, make_client)?;
    let auth = client.auth();

    tracing::debug!("Validating API key");
    let result = auth.validate(&api_key).await.map_err(CommandError::Validate)?;

    print_validation(&result, out)?;
    Ok(())
}

/// Write the labelled validation report. Organization and project are shown
/// only for a valid key.
pub fn print_validation<W: Write>(result: &ValidationResult, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "API Key Validation Result:")?;
    writeln!(out, "  Valid: {}", result.is_valid())?;
    writeln!(out, "  Message: {}", result.message())?;

    if result.is_valid() {
        writeln!(out, "  Organization: {}", result.organization())?;
        writeln!(out, "  Project: {}", result.project())?;
        writeln!(out, "✓ API key is valid!")?;
    } else {
        writeln!(out, "✗ API key is invalid!")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use std::rc::Rc;

    async fn run(valid: bool) -> (String, Rc<Calls>) {
        let calls = Rc::new(Calls::default());
        let mut out = Vec::new();
        let client_calls = Rc::clone(&calls);
        validate_key(
            env_with_key("xai-abc"),
            move |_| Ok(FakeClient::new(client_calls, valid, vec![])),
            &mut out,
        )
        .await
        .unwrap();
        (String::from_utf8(out).unwrap(), calls)
    }

    #[tokio::test]
    async fn test_valid_key_prints_organization_and_project() {
        let (out, calls) = run(true).await;
        assert_eq!(
            out,
            "API Key Validation Result:\n  Valid: true\n  Message: API key is valid\n  \
             Organization: team-42\n  Project: ci-key\n✓ API key is valid!\n"
        );
        assert_eq!(calls.validate.get(), 1);
        assert_eq!(calls.released.get(), 1);
    }

    #[tokio::test]
    async fn test_invalid_key_omits_organization_and_project() {
        let (out, calls) = run(false).await;
        assert!(out.contains("  Valid: false\n"));
        assert!(out.contains("  Message: Incorrect API key provided\n"));
        assert!(out.ends_with("✗ API key is invalid!\n"));
        assert!(!out.contains("Organization"));
        assert!(!out.contains("Project"));
        assert_eq!(calls.released.get(), 1);
    }

    #[tokio::test]
    async fn test_missing_key_prints_nothing() {
        let mut out = Vec::new();
        let err = validate_key(
            empty_env,
            |_| -> crate::Result<FakeClient> { panic!("client must not be constructed") },
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CommandError::MissingApiKey));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_connect_failure_skips_validation() {
        let mut out = Vec::new();
        let err = validate_key::<FakeClient, _, _, _>(
            env_with_key("xai-abc"),
            |_| Err(crate::Error::Config("no transport".to_string())),
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CommandError::Connect(_)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_validation_error_releases_client() {
        let calls = Rc::new(Calls::default());
        let client_calls = Rc::clone(&calls);
        let mut out = Vec::new();
        let err = validate_key(
            env_with_key("xai-abc"),
            move |_| {
                let mut client = FakeClient::new(client_calls, true, vec![]);
                client.auth.result = Rc::new(|| -> crate::Result<ValidationResult> {
                    Err(crate::Error::ClientClosed)
                });
                Ok(client)
            },
            &mut out,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Failed to validate API key: client is closed");
        assert!(out.is_empty());
        assert_eq!(calls.released.get(), 1);
    }
}
