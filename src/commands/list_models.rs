//! `models`: list available models and show details for the first one.

use std::io::Write;

use super::{connect, CommandError};
use crate::client::XaiApi;
use crate::models::{Model, ModelsApi};

/// Read the key, connect, list models, and look up the first one in detail.
///
/// Exactly one detail lookup is made, and only when the list is non-empty.
pub async fn list_models<C, L, F, W>(lookup: L, make_client: F, out: &mut W) -> Result<(), CommandError>
where
    C: XaiApi,
    L: Fn(&str) -> Option<String>,
    F: FnOnce(&str) -> crate::Result<C>,
    W: Write,
{
    let (_api_key, client) = connect(lookup, make_client)?;
    let models = client.models();

    let listed = models.list().await.map_err(CommandError::ListModels)?;
    tracing::debug!("Retrieved {} models", listed.len());
    print_models(&listed, out)?;

    if let Some(first) = listed.first() {
        let id = first.id();
        tracing::debug!("Fetching details for model: {}", id);
        let model = models.get(id).await.map_err(|source| CommandError::GetModel {
            id: id.to_string(),
            source,
        })?;
        writeln!(out)?;
        print_model_details(id, &model, out)?;
    }

    writeln!(out)?;
    writeln!(out, "Note: Use these model names when making chat completion requests.")?;
    Ok(())
}

/// Write the model count followed by one line per model.
pub fn print_models<W: Write>(models: &[Model], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Available Models ({}):", models.len())?;
    for model in models {
        writeln!(
            out,
            "  - {}: {} (max tokens: {})",
            model.id(),
            model.name(),
            model.max_tokens()
        )?;
    }
    Ok(())
}

/// Write the detail block for one model.
pub fn print_model_details<W: Write>(id: &str, model: &Model, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Detailed information for model '{}':", id)?;
    writeln!(out, "  Name: {}", model.name())?;
    writeln!(out, "  Description: {}", model.description())?;
    writeln!(out, "  Max Tokens: {}", model.max_tokens())?;
    if !model.version().is_empty() {
        writeln!(out, "  Version: {}", model.version())?;
    }
    if !model.aliases().is_empty() {
        writeln!(out, "  Aliases: {}", model.aliases().join(", "))?;
    }
    if !model.system_fingerprint().is_empty() {
        writeln!(out, "  System Fingerprint: {}", model.system_fingerprint())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use std::rc::Rc;

    fn catalog() -> Vec<Model> {
        vec![
            Model::new("grok-4", "Grok 4", 256000)
                .with_description("Flagship reasoning model")
                .with_version("1.0.0"),
            Model::new("grok-3-mini", "Grok 3 Mini", 131072),
        ]
    }

    async fn run(
        models: Vec<Model>,
        fail_list: bool,
        fail_get: bool,
    ) -> (Result<(), CommandError>, String, Rc<Calls>) {
        let calls = Rc::new(Calls::default());
        let client_calls = Rc::clone(&calls);
        let mut out = Vec::new();
        let result = list_models(
            env_with_key("xai-abc"),
            move |_| {
                let mut client = FakeClient::new(client_calls, true, models);
                client.models.fail_list = fail_list;
                client.models.fail_get = fail_get;
                Ok(client)
            },
            &mut out,
        )
        .await;
        (result, String::from_utf8(out).unwrap(), calls)
    }

    #[tokio::test]
    async fn test_lists_models_and_fetches_first() {
        let (result, out, calls) = run(catalog(), false, false).await;
        result.unwrap();

        assert!(out.starts_with(
            "Available Models (2):\n  - grok-4: Grok 4 (max tokens: 256000)\n  \
             - grok-3-mini: Grok 3 Mini (max tokens: 131072)\n"
        ));
        assert!(out.contains("Detailed information for model 'grok-4':\n  Name: Grok 4\n"));
        assert!(out.contains("  Description: Flagship reasoning model\n"));
        assert!(out.contains("  Version: 1.0.0\n"));
        assert_eq!(calls.list.get(), 1);
        assert_eq!(*calls.get.borrow(), vec!["grok-4".to_string()]);
        assert_eq!(calls.released.get(), 1);
    }

    #[tokio::test]
    async fn test_empty_list_skips_detail_lookup() {
        let (result, out, calls) = run(vec![], false, false).await;
        result.unwrap();

        assert!(out.starts_with("Available Models (0):\n"));
        assert!(!out.contains("Detailed information"));
        assert!(calls.get.borrow().is_empty());
        assert_eq!(calls.released.get(), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_skips_listing() {
        let calls = Rc::new(Calls::default());
        let client_calls = Rc::clone(&calls);
        let mut out = Vec::new();
        let err = list_models(
            env_with_key("xai-abc"),
            move |_| -> crate::Result<FakeClient> {
                // Client built but rejected before it is handed out.
                drop(FakeClient::new(client_calls, true, catalog()));
                Err(crate::Error::Config("no transport".to_string()))
            },
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CommandError::Connect(_)));
        assert!(out.is_empty());
        assert_eq!(calls.list.get(), 0);
        assert!(calls.get.borrow().is_empty());
        assert_eq!(calls.released.get(), 1);
    }

    #[tokio::test]
    async fn test_list_failure_is_fatal() {
        let (result, out, calls) = run(catalog(), true, false).await;
        let err = result.unwrap_err();

        assert!(matches!(err, CommandError::ListModels(_)));
        assert!(out.is_empty());
        assert!(calls.get.borrow().is_empty());
        assert_eq!(calls.released.get(), 1);
    }

    #[tokio::test]
    async fn test_detail_failure_is_fatal() {
        let (result, out, calls) = run(catalog(), false, true).await;
        let err = result.unwrap_err();

        assert_eq!(err.to_string(), "Failed to get model grok-4: HTTP 404: not found");
        assert!(out.starts_with("Available Models (2):"));
        assert!(!out.contains("Note:"));
        assert_eq!(calls.get.borrow().len(), 1);
        assert_eq!(calls.released.get(), 1);
    }

    #[test]
    fn test_print_models_uses_fallbacks() {
        let model: Model = serde_json::from_value(serde_json::json!({
            "id": "grok-2",
            "max_prompt_length": 32768
        }))
        .unwrap();
        let mut out = Vec::new();
        print_models(&[model], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Available Models (1):\n  - grok-2: grok-2 (max tokens: 32768)\n"
        );
    }
}
