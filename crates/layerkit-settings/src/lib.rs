//! LayerKit Settings Crate
//!
//! Handles configuration loading, saving and validation.

pub mod config;
pub mod error;

pub use config::{Config, HistorySettings, LogLevel, LoggingSettings, MAX_HISTORY_LIMIT};
pub use error::{ConfigError, SettingsError, SettingsResult};
