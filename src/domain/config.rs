//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file
//! (`data/config.yaml`). The system section carries the bootstrap admin
//! identity and the location of the persisted store.

use serde::Deserialize;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub system: SystemConfig,
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    /// Admin identity seeded at first start. Can never be removed.
    pub bootstrap_admin: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_data_file() -> String {
    "data/botData.json".to_string()
}

fn default_log_dir() -> String {
    "data".to_string()
}
