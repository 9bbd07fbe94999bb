use crate::domain::services::PostLockSettings;
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub post_lock_ttl_seconds: u64,
    pub post_lock_wait_ms: u64,
    pub post_lock_poll_ms: u64,
    pub reminder_after_hours: i64,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://postdesk.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let post_lock_ttl_seconds = parse_or("POST_LOCK_TTL_SECONDS", 30)?;
        let post_lock_wait_ms = parse_or("POST_LOCK_WAIT_MS", 5000)?;
        let post_lock_poll_ms = parse_or("POST_LOCK_POLL_MS", 25)?;
        let reminder_after_hours = parse_or("REMINDER_AFTER_HOURS", 48)?;

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "postdesk".to_string());

        let metrics_port = env::var("METRICS_PORT")
            .unwrap_or_else(|_| "9000".to_string())
            .parse()
            .unwrap_or(9000);

        Ok(Config {
            database_url,
            server_host,
            server_port,
            post_lock_ttl_seconds,
            post_lock_wait_ms,
            post_lock_poll_ms,
            reminder_after_hours,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn post_lock_settings(&self) -> PostLockSettings {
        PostLockSettings {
            ttl_seconds: self.post_lock_ttl_seconds,
            wait: Duration::from_millis(self.post_lock_wait_ms),
            poll_interval: Duration::from_millis(self.post_lock_poll_ms),
        }
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidNumber(name)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("{0} must be a non-negative integer")]
    InvalidNumber(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_settings_follow_config() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            post_lock_ttl_seconds: 10,
            post_lock_wait_ms: 250,
            post_lock_poll_ms: 5,
            reminder_after_hours: 48,
            otel_exporter_endpoint: None,
            service_name: "postdesk".to_string(),
            metrics_port: 9000,
        };

        let settings = config.post_lock_settings();
        assert_eq!(settings.ttl_seconds, 10);
        assert_eq!(settings.wait, Duration::from_millis(250));
        assert_eq!(settings.poll_interval, Duration::from_millis(5));
        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }
}
