//! Shared library for the Annict → Notion sync tools.
//!
//! This crate provides common functionality used by the sync binary:
//! - Configuration management
//! - Logging infrastructure
//! - The Annict work record model

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
