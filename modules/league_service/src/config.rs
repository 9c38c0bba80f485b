//! Typed configuration for the league service

use serde::Deserialize;

/// Service configuration, deserialised by the server binary from YAML plus
/// environment overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SeaORM connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Listen address for the HTTP API
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Apply pending migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            bind_addr: default_bind_addr(),
            run_migrations: true,
        }
    }
}

fn default_database_url() -> String {
    "sqlite://football_league.db?mode=rwc".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_true() -> bool {
    true
}
