//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::str::FromStr;

use stockroom_core::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use stockroom_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEV_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}='{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// `true` when `JWT_SECRET` was unset and the dev secret is in use.
    pub jwt_secret_is_default: bool,
    /// Postgres connection string; `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub products_per_page: u32,
    pub seed_demo_data: bool,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR.parse().ok())?;

        let (jwt_secret, jwt_secret_is_default) = match get("JWT_SECRET") {
            Some(secret) => (secret, false),
            None => (DEV_JWT_SECRET.to_string(), true),
        };

        let database_max_connections: u32 =
            parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), Some(DEFAULT_MAX_CONNECTIONS))?;
        if database_max_connections == 0 {
            return Err(invalid("DATABASE_MAX_CONNECTIONS", "0", "must be at least 1"));
        }

        let products_per_page: u32 = parse_or("PRODUCTS_PER_PAGE", get("PRODUCTS_PER_PAGE"), Some(DEFAULT_PER_PAGE))?;
        if !(1..=MAX_PER_PAGE).contains(&products_per_page) {
            return Err(invalid(
                "PRODUCTS_PER_PAGE",
                &products_per_page.to_string(),
                &format!("must be between 1 and {MAX_PER_PAGE}"),
            ));
        }

        Ok(Self {
            bind_addr,
            jwt_secret,
            jwt_secret_is_default,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            products_per_page,
            seed_demo_data: parse_or("SEED_DEMO_DATA", get("SEED_DEMO_DATA"), Some(false))?,
            log_format: parse_or("LOG_FORMAT", get("LOG_FORMAT"), Some(LogFormat::Json))?,
        })
    }

    /// In-memory configuration for tests and local runs.
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: jwt_secret.into(),
            jwt_secret_is_default: false,
            database_url: None,
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            products_per_page: DEFAULT_PER_PAGE,
            seed_demo_data: false,
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse::<T>().map_err(|e| invalid(var, &value, &e.to_string())),
        None => default.ok_or_else(|| invalid(var, "", "no value and no default")),
    }
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
