//! Configuration loading, validation, and management for SplitPay.
//!
//! Loads configuration from `~/.splitpay/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use splitpay_core::Language;
use std::path::{Path, PathBuf};

/// Maximum number of per-tier rule documents.
pub const MAX_TIER_SOURCES: usize = 3;

/// The root configuration structure.
///
/// Maps directly to `~/.splitpay/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Display and legal-text language
    #[serde(default)]
    pub language: Language,

    /// Always synthesize the localized legal text, ignoring any text
    /// supplied with the rules
    #[serde(default)]
    pub force_localized_legal: bool,

    /// Where the rule documents live
    #[serde(default)]
    pub sources: SourcesConfig,

    /// HTTP fetch settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Rule document locations. Each entry is an `http(s)://` URL or a local
/// path (optionally `file://`-prefixed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Per-tier documents, one per positional slot (at most three)
    #[serde(default = "default_tier_sources")]
    pub tiers: Vec<String>,

    /// Legacy combined document, fetched only when every per-tier
    /// document fails
    #[serde(default = "default_legacy_source")]
    pub legacy: String,
}

const DEFAULT_BASE_URL: &str = "https://rules.splitpay.example/v1";
const TIER_FILES: [&str; MAX_TIER_SOURCES] = ["tier1.json", "tier2.json", "tier3.json"];
const LEGACY_FILE: &str = "rules.json";

fn default_tier_sources() -> Vec<String> {
    tier_sources_under(DEFAULT_BASE_URL)
}
fn default_legacy_source() -> String {
    legacy_source_under(DEFAULT_BASE_URL)
}

fn tier_sources_under(base: &str) -> Vec<String> {
    let base = base.trim_end_matches('/');
    TIER_FILES.iter().map(|f| format!("{base}/{f}")).collect()
}

fn legacy_source_under(base: &str) -> String {
    format!("{}/{LEGACY_FILE}", base.trim_end_matches('/'))
}

impl SourcesConfig {
    /// Sources for the standard file layout under `base`.
    pub fn under(base: &str) -> Self {
        Self {
            tiers: tier_sources_under(base),
            legacy: legacy_source_under(base),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tiers: default_tier_sources(),
            legacy: default_legacy_source(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.splitpay/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `SPLITPAY_LANG`
    /// - `SPLITPAY_FORCE_LOCALIZED_LEGAL`
    /// - `SPLITPAY_RULES_BASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(lang) = var("SPLITPAY_LANG") {
            self.language = Language::from_code(&lang).ok_or_else(|| {
                ConfigError::ValidationError(format!("SPLITPAY_LANG: unsupported language '{lang}'"))
            })?;
        }

        if let Some(flag) = var("SPLITPAY_FORCE_LOCALIZED_LEGAL") {
            self.force_localized_legal = parse_flag(&flag);
        }

        if let Some(base) = var("SPLITPAY_RULES_BASE_URL") {
            self.sources = SourcesConfig::under(&base);
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".splitpay")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.tiers.len() > MAX_TIER_SOURCES {
            return Err(ConfigError::ValidationError(format!(
                "at most {MAX_TIER_SOURCES} tier sources are supported, got {}",
                self.sources.tiers.len()
            )));
        }

        if self.sources.legacy.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "sources.legacy must not be empty".into(),
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "http.timeout_secs must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            force_localized_legal: false,
            sources: SourcesConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.language, Language::Es);
        assert!(!config.force_localized_legal);
        assert_eq!(config.sources.tiers.len(), 3);
        assert!(config.sources.legacy.ends_with("/rules.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.language, config.language);
        assert_eq!(parsed.sources.tiers, config.sources.tiers);
        assert_eq!(parsed.http.timeout_secs, config.http.timeout_secs);
    }

    #[test]
    fn too_many_tier_sources_rejected() {
        let config = AppConfig {
            sources: SourcesConfig {
                tiers: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                legacy: "rules.json".into(),
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = AppConfig {
            http: HttpConfig { timeout_secs: 0 },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn config_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
language = "de"
force_localized_legal = true

[sources]
tiers = ["/srv/rules/a.json", "/srv/rules/b.json"]
legacy = "/srv/rules/all.json"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.language, Language::De);
        assert!(config.force_localized_legal);
        assert_eq!(config.sources.tiers.len(), 2);
        assert_eq!(config.sources.legacy, "/srv/rules/all.json");
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "language = [").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("SPLITPAY_LANG", "en-GB"),
                ("SPLITPAY_FORCE_LOCALIZED_LEGAL", "true"),
                ("SPLITPAY_RULES_BASE_URL", "https://cdn.shop.test/rules/"),
            ]))
            .unwrap();
        assert_eq!(config.language, Language::En);
        assert!(config.force_localized_legal);
        assert_eq!(config.sources.tiers[0], "https://cdn.shop.test/rules/tier1.json");
        assert_eq!(config.sources.legacy, "https://cdn.shop.test/rules/rules.json");
    }

    #[test]
    fn unsupported_env_language_rejected() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(env(&[("SPLITPAY_LANG", "fr")])).is_err());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("language = \"es\""));
        assert!(toml_str.contains("tier1.json"));
    }
}
