//! Configuration management for the sync tools.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings. Credentials can also come from
//! the `NOTION_TOKEN` and `NOTION_DB_ID` environment variables.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable overriding `notion.token`
pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";
/// Environment variable overriding `notion.database_id`
pub const NOTION_DB_ID_ENV: &str = "NOTION_DB_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Notion API settings
    #[serde(default)]
    pub notion: NotionConfig,

    /// Jikan API settings
    #[serde(default)]
    pub jikan: JikanConfig,

    /// Annict status kind → Notion select option name
    #[serde(default = "default_status_labels")]
    pub status_labels: BTreeMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Notion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Notion API base URL
    pub base_url: String,

    /// Value of the `Notion-Version` header
    pub api_version: String,

    /// Integration token
    #[serde(default)]
    pub token: String,

    /// Database that new pages are created in
    #[serde(default)]
    pub database_id: String,
}

/// Jikan API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanConfig {
    /// Jikan API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.notion.com/v1".to_string(),
            api_version: "2022-06-28".to_string(),
            token: String::new(),
            database_id: String::new(),
        }
    }
}

impl Default for JikanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jikan.moe/v4".to_string(),
            timeout_secs: 30,
        }
    }
}

fn default_status_labels() -> BTreeMap<String, String> {
    [
        ("wanna_watch", "見たい"),
        ("watching", "見てる"),
        ("watched", "見た"),
        ("on_hold", "一時中断"),
        ("stop_watching", "視聴中止"),
    ]
    .into_iter()
    .map(|(kind, label)| (kind.to_string(), label.to_string()))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            notion: NotionConfig::default(),
            jikan: JikanConfig::default(),
            status_labels: default_status_labels(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Override credentials from `NOTION_TOKEN` / `NOTION_DB_ID` when set
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(NOTION_TOKEN_ENV).ok(),
            std::env::var(NOTION_DB_ID_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, token: Option<String>, database_id: Option<String>) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.notion.token = token;
        }
        if let Some(database_id) = database_id.filter(|d| !d.is_empty()) {
            self.notion.database_id = database_id;
        }
    }

    /// Presence checks for the values every Notion request needs
    pub fn validate(&self) -> Result<()> {
        if self.notion.token.trim().is_empty() {
            bail!(
                "Notion token is not configured (set notion.token or {})",
                NOTION_TOKEN_ENV
            );
        }
        if self.notion.database_id.trim().is_empty() {
            bail!(
                "Notion database ID is not configured (set notion.database_id or {})",
                NOTION_DB_ID_ENV
            );
        }
        Ok(())
    }
}
