//! Wizard configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main wizard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Suggestion service connection settings
    pub suggestions: SuggestionConfig,
}

impl WizardConfig {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, then project-local `.tripwizard.yml`, then the user
    /// config dir, then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".tripwizard.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripwizard").join("tripwizard.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Suggestion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Service base URL, including the API prefix
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Timeout for the lightweight suggestion calls, in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Timeout for itinerary synthesis, the heaviest call
    #[serde(rename = "itinerary-timeout-ms")]
    pub itinerary_timeout_ms: u64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_ms: 20_000,
            itinerary_timeout_ms: 60_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WizardConfig::default();
        assert_eq!(config.suggestions.base_url, "http://localhost:8000/api");
        assert_eq!(config.suggestions.timeout_ms, 20_000);
        assert_eq!(config.suggestions.itinerary_timeout_ms, 60_000);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: WizardConfig = serde_yaml::from_str(
            "suggestions:\n  base-url: https://api.example.com/v1\n",
        )
        .unwrap();
        assert_eq!(config.suggestions.base_url, "https://api.example.com/v1");
        assert_eq!(config.suggestions.itinerary_timeout_ms, 60_000);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wizard.yml");
        fs::write(&path, "suggestions:\n  timeout-ms: 5000\n").unwrap();

        let config = WizardConfig::load(Some(&path)).unwrap();
        assert_eq!(config.suggestions.timeout_ms, 5_000);
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let path = PathBuf::from("/nonexistent/wizard.yml");
        assert!(WizardConfig::load(Some(&path)).is_err());
    }
}
