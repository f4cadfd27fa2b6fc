use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Stable user identifier for the per-user remote document and the local
    /// cache. Lowercased on load; who issues it is not this app's concern.
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_theme_index")]
    pub theme_index: usize,
    #[serde(default = "default_session_size")]
    pub session_size: usize,
    #[serde(default = "default_mastery_threshold")]
    pub mastery_threshold: u32,
    /// CSV export URL for the word list; empty means cached/bundled only.
    #[serde(default = "default_source_url")]
    pub source_url: String,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Base URL of the durable document store; empty disables reconciliation.
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
}

fn default_profile() -> String {
    "local".to_string()
}
fn default_theme_index() -> usize {
    0
}
fn default_session_size() -> usize {
    20
}
fn default_mastery_threshold() -> u32 {
    7
}
fn default_source_url() -> String {
    String::new()
}
fn default_fetch_timeout_secs() -> u64 {
    30
}
fn default_remote_url() -> String {
    String::new()
}
fn default_remote_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            theme_index: default_theme_index(),
            session_size: default_session_size(),
            mastery_threshold: default_mastery_threshold(),
            source_url: default_source_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            remote_url: default_remote_url(),
            remote_timeout_secs: default_remote_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.profile = config.profile.to_lowercase();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kotoba")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.profile, "local");
        assert_eq!(config.session_size, 20);
        assert_eq!(config.mastery_threshold, 7);
        assert_eq!(config.theme_index, 0);
        assert!(config.remote_url.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
profile = "alice@example.com"
mastery_threshold = 10
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.profile, "alice@example.com");
        assert_eq!(config.mastery_threshold, 10);
        assert_eq!(config.session_size, 20);
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.session_size, deserialized.session_size);
        assert_eq!(config.mastery_threshold, deserialized.mastery_threshold);
        assert_eq!(config.remote_url, deserialized.remote_url);
    }
}
