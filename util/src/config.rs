//! Application configuration loaded from environment variables.
//!
//! `AppConfig` is built once at process start (`.env` is honoured through `dotenvy`)
//! and handed to the server state; nothing here is global.

use std::env;
use thiserror::Error;

/// Fallback database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/edu.db?mode=rwc";

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: i64,
}

impl AppConfig {
    /// Loads the configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to development defaults. Numeric keys that are present
    /// but unparsable are rejected rather than silently defaulted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        Ok(Self {
            env: get("APP_ENV", "development"),
            project_name: get("PROJECT_NAME", "edu-platform"),
            log_level: get("LOG_LEVEL", "api=info,services=info"),
            log_file: get("LOG_FILE", "api.log"),
            log_to_stdout: get("LOG_TO_STDOUT", "false") == "true",
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            host: get("HOST", "127.0.0.1"),
            port: parse_key("PORT", get("PORT", "3000"), "port number")?,
            jwt_secret,
            jwt_duration_minutes: parse_key(
                "JWT_DURATION_MINUTES",
                get("JWT_DURATION_MINUTES", "60"),
                "number of minutes",
            )?,
        })
    }

    /// True when no `JWT_SECRET` was configured and the built-in development secret is in use.
    pub fn uses_dev_jwt_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    /// Configuration used by test suites: in-memory database and a fixed secret.
    pub fn for_tests() -> Self {
        Self {
            env: "test".into(),
            project_name: "edu-platform".into(),
            log_level: "api=debug".into(),
            log_file: "test.log".into(),
            log_to_stdout: false,
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "test-secret".into(),
            jwt_duration_minutes: 60,
        }
    }
}

fn parse_key<T: std::str::FromStr>(
    key: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            expected,
            value,
        })
}
