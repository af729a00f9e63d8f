// src/config.rs

use std::env;

use dotenvy::dotenv;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("either DATABASE_URL or DATABASE_NAME must be set")]
    MissingDatabase,

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `DATABASE_URL` wins when present; otherwise the URL is assembled from
    /// `DATABASE_NAME`, `DB_USER`, `PASSWORD`, `DB_HOST` and `DB_PORT`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let name = lookup("DATABASE_NAME").ok_or(ConfigError::MissingDatabase)?;
                let user = lookup("DB_USER").unwrap_or_else(|| "postgres".to_string());
                let password = lookup("PASSWORD").unwrap_or_default();
                let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
                let port = lookup("DB_PORT").unwrap_or_else(|| "5432".to_string());

                if password.is_empty() {
                    format!("postgres://{user}@{host}:{port}/{name}")
                } else {
                    format!("postgres://{user}:{password}@{host}:{port}/{name}")
                }
            }
        };

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value: raw,
                    });
                }
            },
            None => 5,
        };

        let cors_origins = lookup("CORS_ORIGINS").and_then(|raw| {
            let origins: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            if origins.is_empty() || origins.iter().any(|o| o == "*") {
                None
            } else {
                Some(origins)
            }
        });

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        Ok(Self {
            database_url,
            rust_log,
            bind_addr,
            db_max_connections,
            cors_origins,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn database_url_takes_precedence() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://a@b/c"),
            ("DATABASE_NAME", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://a@b/c");
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.db_max_connections, 5);
        assert!(config.cors_origins.is_none());
        assert_eq!(config.log_dir, "logs");
    }

    #[test]
    fn database_url_is_assembled_from_parts() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_NAME", "kahoot"),
            ("PASSWORD", "secret"),
            ("DB_HOST", "db"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://postgres:secret@db:5432/kahoot");
    }

    #[test]
    fn missing_database_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabase));
    }

    #[test]
    fn rejects_zero_pool_size() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("DB_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                ..
            }
        ));
    }

    #[test]
    fn parses_cors_origin_list() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("CORS_ORIGINS", "http://localhost:3000, http://127.0.0.1:3000"),
        ]))
        .unwrap();

        assert_eq!(
            config.cors_origins,
            Some(vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string()
            ])
        );
    }
}
