//! Application configuration management.

use chrono::NaiveTime;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Recurring expense scheduler configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
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

/// Scheduler configuration for the daily recurring expense pass.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the daily timer is started with the server.
    #[serde(default = "default_scheduler_enabled")]
    pub enabled: bool,
    /// Local wall-clock time of the daily pass, formatted `HH:MM`.
    #[serde(default = "default_run_at")]
    pub run_at: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_scheduler_enabled(),
            run_at: default_run_at(),
        }
    }
}

fn default_scheduler_enabled() -> bool {
    true
}

fn default_run_at() -> String {
    "01:00".to_string() // 1 AM local time
}

impl SchedulerConfig {
    /// Parses `run_at` into a time of day.
    ///
    /// # Errors
    ///
    /// Returns an error if `run_at` is not a valid `HH:MM` time.
    pub fn run_at_time(&self) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(&self.run_at, "%H:%M")
    }
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
            .add_source(config::Environment::with_prefix("OUTLAY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
