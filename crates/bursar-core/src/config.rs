//! Core configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override in the data dir (~/.local/share/bursar/bursar.toml)
//! 2. Fall back to embedded defaults (compiled into the library)

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;

/// Embedded default config (compiled into the library)
const DEFAULT_CONFIG: &str = include_str!("../../../config/bursar.toml");

/// Runtime configuration for the analytics core.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Currency symbol used in generated insight and feedback strings.
    pub currency: String,
    /// Path to the trained spending model artifact. None disables the
    /// model-prediction strategy.
    pub model_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            currency: "£".to_string(),
            model_path: None,
        }
    }
}

impl CoreConfig {
    /// Load config, preferring a user override in the data directory over
    /// the embedded defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::override_path() {
            if path.exists() {
                let raw = fs::read_to_string(&path)?;
                let config = toml::from_str(&raw)?;
                tracing::debug!(path = %path.display(), "loaded config override");
                return Ok(config);
            }
        }
        Ok(toml::from_str(DEFAULT_CONFIG)?)
    }

    /// Parse a config from raw TOML.
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Location of the user override file, when a platform data directory
    /// exists.
    pub fn override_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("bursar").join("bursar.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: CoreConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.currency, "£");
        assert!(config.model_path.is_none());
    }

    #[test]
    fn test_from_toml_overrides() {
        let config = CoreConfig::from_toml(
            "currency = \"$\"\nmodel_path = \"/tmp/spending_model.json\"\n",
        )
        .unwrap();
        assert_eq!(config.currency, "$");
        assert_eq!(
            config.model_path.unwrap(),
            PathBuf::from("/tmp/spending_model.json")
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = CoreConfig::from_toml("").unwrap();
        assert_eq!(config.currency, "£");
        assert!(config.model_path.is_none());
    }
}
