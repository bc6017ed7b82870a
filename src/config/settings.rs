//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the session.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::types::{ModelId, OutputFormat};

/// Environment variable that overrides [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "PUBLIC_API_URL";

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Where the speech API lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every endpoint path is appended to, e.g.
    /// `http://localhost:3000` + `/api/models`.
    pub base_url: String,
    /// Client-side request timeout.  `None` leaves timing out to the
    /// transport, so a hung call keeps its busy flag set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// The base URL to use, honouring the `PUBLIC_API_URL` override.
    ///
    /// A trailing `/` is stripped so endpoint paths can always start with one.
    pub fn resolved_base_url(&self) -> String {
        let raw = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.base_url.clone());
        normalize_base_url(&raw)
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

// ---------------------------------------------------------------------------
// DefaultsConfig
// ---------------------------------------------------------------------------

/// Initial values for the conversion fields of a fresh session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub output_format: OutputFormat,
    pub model_id: ModelId,
}

// ---------------------------------------------------------------------------
// LoggingConfig
// ---------------------------------------------------------------------------

/// `env_logger` settings for the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. `"info"`,
    /// `"tts_client=debug"`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use tts_client::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// println!("{}", config.api.resolved_base_url());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote API settings.
    pub api: ApiConfig,
    /// Initial conversion settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");

        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert!(config.api.timeout_secs.is_none());
        assert_eq!(config.defaults.output_format, OutputFormat::Mp3_44100_128);
        assert_eq!(config.defaults.model_id, ModelId::ElevenMultilingualV2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.api.base_url = "https://speech.example.com".into();
        cfg.api.timeout_secs = Some(45);
        cfg.defaults.output_format = OutputFormat::Mp3_22050_32;
        cfg.defaults.model_id = ModelId::ElevenFlashV2_5;
        cfg.logging.level = "tts_client=debug".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.api.base_url, "https://speech.example.com");
        assert_eq!(loaded.api.timeout_secs, Some(45));
        assert_eq!(loaded.defaults.output_format, OutputFormat::Mp3_22050_32);
        assert_eq!(loaded.defaults.model_id, ModelId::ElevenFlashV2_5);
        assert_eq!(loaded.logging.level, "tts_client=debug");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://10.0.0.5:8080\"\n").unwrap();

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.api.base_url, "http://10.0.0.5:8080");
        assert!(loaded.api.timeout_secs.is_none());
        assert_eq!(loaded.defaults.model_id, ModelId::default());
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        assert_eq!(normalize_base_url("http://host:3000/"), "http://host:3000");
        assert_eq!(normalize_base_url(" http://host:3000 "), "http://host:3000");
        assert_eq!(normalize_base_url("http://host:3000"), "http://host:3000");
    }
}
