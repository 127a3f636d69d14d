//! Configuration module for the live editor backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the tenant store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Delay before the deferred final force-update of a restore runs
    pub refresh_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("LIVE_EDITOR_DB_PATH")
            .unwrap_or_else(|_| "./data/tenants.sqlite".to_string())
            .into();

        let bind_addr = env::var("LIVE_EDITOR_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid LIVE_EDITOR_BIND_ADDR format");

        let log_level = env::var("LIVE_EDITOR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let refresh_delay = env::var("LIVE_EDITOR_REFRESH_DELAY_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(100));

        Self {
            db_path,
            bind_addr,
            log_level,
            refresh_delay,
        }
    }
}
