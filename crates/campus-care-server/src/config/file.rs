// crates/campus-care-server/src/config/file.rs
// File-based configuration from ~/.campus-care/config.toml

use crate::llm::Provider;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default)]
pub struct CareConfig {
    #[serde(default)]
    pub llm: LlmFileConfig,
    #[serde(default)]
    pub crisis: CrisisFileConfig,
}

/// LLM configuration section
#[derive(Debug, Deserialize, Default)]
pub struct LlmFileConfig {
    /// Preferred provider; takes precedence over CAMPUS_CARE_LLM_PROVIDER
    pub provider: Option<String>,
    /// Preferred model; takes precedence over CAMPUS_CARE_LLM_MODEL
    pub model: Option<String>,
}

/// Crisis gate section
#[derive(Debug, Deserialize, Default)]
pub struct CrisisFileConfig {
    /// Site-specific phrases added to the canonical list
    #[serde(default)]
    pub extra_phrases: Vec<String>,
}

impl CareConfig {
    /// Load config from ~/.campus-care/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a path; missing or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Directory holding config.toml and .env
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".campus-care")
    }

    /// Get the config file path
    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Provider named in the file, if valid
    pub fn provider(&self) -> Option<Provider> {
        self.llm.provider.as_deref().and_then(|p| {
            let parsed = Provider::from_str(p);
            if parsed.is_none() {
                warn!(provider = p, "Unknown provider in config file, ignoring");
            }
            parsed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[llm]
provider = "gemini"
model = "gemini-2.0-flash-lite"

[crisis]
extra_phrases = ["overdose", "jump off"]
"#;
        let config: CareConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.provider(), Some(Provider::Gemini));
        assert_eq!(config.llm.model.as_deref(), Some("gemini-2.0-flash-lite"));
        assert_eq!(config.crisis.extra_phrases.len(), 2);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: CareConfig = toml::from_str("").unwrap();
        assert_eq!(config.provider(), None);
        assert!(config.crisis.extra_phrases.is_empty());
    }

    #[test]
    fn test_unknown_provider_ignored() {
        let config: CareConfig = toml::from_str("[llm]\nprovider = \"glm\"\n").unwrap();
        assert_eq!(config.provider(), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[crisis]\nextra_phrases = [\"overdose\"]\n").unwrap();
        let config = CareConfig::load_from(&path);
        assert_eq!(config.crisis.extra_phrases, vec!["overdose".to_string()]);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm\nprovider = ").unwrap();
        let config = CareConfig::load_from(&path);
        assert!(config.llm.provider.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = CareConfig::load_from(Path::new("/nonexistent/campus-care/config.toml"));
        assert!(config.llm.provider.is_none());
    }
}
