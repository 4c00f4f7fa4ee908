use std::env;

use crate::application::services::MARK_ALL_LIMIT;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
    /// Upper bound of notifications touched by one mark-all-as-read call.
    pub mark_all_limit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://boardnotify.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "boardnotify".to_string());

        let metrics_port = env::var("METRICS_PORT")
            .unwrap_or_else(|_| "9000".to_string())
            .parse()
            .unwrap_or(9000);

        let mark_all_limit = match env::var("MARK_ALL_LIMIT") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidMarkAllLimit(raw))?,
            Err(_) => MARK_ALL_LIMIT,
        };

        Ok(Config {
            database_url,
            server_host,
            server_port,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
            mark_all_limit,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("MARK_ALL_LIMIT must be a positive integer, got {0:?}")]
    InvalidMarkAllLimit(String),
}
