//! Logging infrastructure for the sync tools.
//!
//! Structured logging to the console, with an optional daily-rotated log file.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory path
    pub log_dir: String,
    /// Component name (used for log file naming)
    pub component: String,
    /// Default log level
    pub default_level: Level,
    /// Enable console output
    pub console: bool,
    /// Enable file output
    pub file: bool,
    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            component: "notion-sync".to_string(),
            default_level: Level::INFO,
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// Build from the `[logging]` section; `verbose` forces DEBUG
    pub fn from_settings(component: &str, settings: &LoggingConfig, verbose: bool) -> Result<Self> {
        let default_level = if verbose {
            Level::DEBUG
        } else {
            settings
                .default_level
                .parse::<Level>()
                .with_context(|| format!("Invalid log level: {}", settings.default_level))?
        };

        Ok(Self {
            log_dir: settings.log_dir.clone(),
            component: component.to_string(),
            default_level,
            console: settings.console,
            file: settings.file,
            json_format: settings.json_format,
        })
    }

    fn filter_directives(&self) -> String {
        format!(
            "{}={},shared={},notion_sync={},hyper=warn,reqwest=warn,h2=warn",
            self.component.replace('-', "_"),
            self.default_level,
            self.default_level,
            self.default_level
        )
    }
}

/// Initialize logging with the given configuration
///
/// Sets up tracing with:
/// - Human-readable console output on stderr, keeping stdout for command output
/// - Optional daily file rotation, plain or JSON
/// - Module-specific log levels, overridable via `RUST_LOG`
pub fn init(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    let mut layers = Vec::new();

    if config.console {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr)
            .boxed();
        layers.push(console_layer);
    }

    if config.file {
        let log_dir = Path::new(&config.log_dir);
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", config.log_dir))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, &config.component);

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(file_appender)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(file_appender)
                .boxed()
        };

        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        component = %config.component,
        log_dir = %config.log_dir,
        file = config.file,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config() {
        let config = LogConfig::default();
        assert_eq!(config.component, "notion-sync");
        assert_eq!(config.default_level, Level::INFO);
        assert!(config.console);
        assert!(!config.file);
    }

    #[test]
    fn test_from_settings() -> Result<()> {
        let settings = LoggingConfig {
            default_level: "warn".to_string(),
            ..Default::default()
        };

        let config = LogConfig::from_settings("notion-sync", &settings, false)?;
        assert_eq!(config.default_level, Level::WARN);

        let verbose = LogConfig::from_settings("notion-sync", &settings, true)?;
        assert_eq!(verbose.default_level, Level::DEBUG);

        Ok(())
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let settings = LoggingConfig {
            default_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(LogConfig::from_settings("notion-sync", &settings, false).is_err());
    }

    #[test]
    fn test_filter_directives_use_crate_names() {
        let config = LogConfig::default();
        let directives = config.filter_directives();
        assert!(directives.starts_with("notion_sync=INFO"));
        assert!(directives.contains("reqwest=warn"));
    }
}
