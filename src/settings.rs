//! Optional client settings file.
//! Persisted in the platform-specific config directory via `directories::ProjectDirs`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("ai", "x", "xai-sdk").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the settings file path.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}

/// Load the settings file from the config directory, if one exists and parses.
pub fn load_file() -> Option<Config> {
    let path = settings_path()?;
    if !path.exists() {
        return None;
    }
    match load_from(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Ignoring settings file {}: {}", path.display(), e);
            None
        }
    }
}

/// Load settings from a specific file. Missing fields take their defaults.
pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
}

/// Save settings to a specific file. The API key is never written.
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| Error::Config(format!("failed to create config directory: {}", e)))?;
    }

    let mut stored = config.clone();
    stored.api_key.clear();
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|e| Error::Config(format!("failed to serialize settings: {}", e)))?;

    fs::write(path, content)
        .map_err(|e| Error::Config(format!("failed to write settings file: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("xai-sdk-settings-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_save_and_load_settings() {
        let path = temp_path("settings.json");
        let config = Config::default()
            .with_api_key("xai-not-persisted")
            .with_base_url("http://localhost:9999/v1")
            .with_timeout(Duration::from_secs(12));

        save_to(&config, &path).unwrap();
        let loaded = load_from(&path).unwrap();

        assert_eq!(loaded.base_url, "http://localhost:9999/v1");
        assert_eq!(loaded.timeout, Duration::from_secs(12));
        assert!(loaded.api_key.is_empty());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = load_from(&temp_path("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
