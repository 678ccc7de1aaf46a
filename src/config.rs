//! Service configuration, read from the environment.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the drink catalog; lookups go to `{base}/menu/{name}`.
    pub drink_api_url: String,
    pub drink_api_timeout: Duration,
    /// When unset, orders and the id counter live in memory.
    pub database_url: Option<String>,
    /// The first order id handed out on a fresh counter is this plus one.
    pub order_id_start: i64,
    /// Browser origins allowed to call the API.
    pub cors_allowed_origins: Vec<String>,
}

pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:4200"];

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let drink_api_url = non_empty("DRINK_API_URL").ok_or(ConfigError::Missing("DRINK_API_URL"))?;

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(non_empty("PORT"), "PORT", 8080)?,
            drink_api_url,
            drink_api_timeout: Duration::from_secs(parse_or(
                non_empty("DRINK_API_TIMEOUT_SECS"),
                "DRINK_API_TIMEOUT_SECS",
                5,
            )?),
            database_url: non_empty("DATABASE_URL"),
            order_id_start: parse_or(non_empty("ORDER_ID_START"), "ORDER_ID_START", 1000)?,
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.map(String::from).to_vec()),
        })
    }
}

fn parse_or<T>(value: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: format!("'{}': {}", raw, e),
        }),
    }
}
