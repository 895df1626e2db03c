//! Environment-driven configuration

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 4004;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Runtime configuration, read once at boot
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string (required)
    pub database_url: String,

    /// TCP port to listen on
    pub port: u16,

    /// Allowed CORS origin for the frontend
    pub frontend_url: String,
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid PORT value '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let frontend_url =
            get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());

        Ok(Self {
            database_url,
            port,
            frontend_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/sales".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.port, 4004);
        assert_eq!(config.frontend_url, "http://localhost:3000");
    }

    #[test]
    fn test_missing_database_url_fails() {
        let result = AppConfig::from_lookup(|_| None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port_fails() {
        let result = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/sales".to_string()),
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_values_win() {
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://db/sales".to_string()),
            "PORT" => Some("8080".to_string()),
            "FRONTEND_URL" => Some("https://sales.example.com".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.frontend_url, "https://sales.example.com");
    }
}
