//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Bookkeeping engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Bookkeeping engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Prefix used when allocating journal entry numbers.
    #[serde(default = "default_entry_prefix")]
    pub entry_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            entry_prefix: default_entry_prefix(),
        }
    }
}

fn default_entry_prefix() -> String {
    "YV".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KASSA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
