//! Configuration loading and representation.
//!
//! | variable | default |
//! |---|---|
//! | `DATABASE_URL` | unset (in-memory store) |
//! | `CATALOG_BIND_ADDR` | `0.0.0.0:8080` |
//! | `CATALOG_DB_MAX_CONNECTIONS` | `5` |
//! | `CATALOG_DB_ACQUIRE_TIMEOUT_SECS` | `5` |
//! | `CATALOG_BULK_POLICY` | `available-only` |

use std::net::SocketAddr;

use thiserror::Error;

use catalog_products::BulkValidationPolicy;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub bind_addr: SocketAddr,
    pub bulk_policy: BulkValidationPolicy,
}

impl CatalogConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("CATALOG_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("CATALOG_BIND_ADDR", e.to_string()))?;

        let bulk_policy = match get("CATALOG_BULK_POLICY") {
            Some(raw) => raw
                .parse::<BulkValidationPolicy>()
                .map_err(|e| ConfigError::invalid("CATALOG_BULK_POLICY", e))?,
            None => BulkValidationPolicy::default(),
        };

        let database = match get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(
                    get("CATALOG_DB_MAX_CONNECTIONS"),
                    "CATALOG_DB_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                )?,
                acquire_timeout_secs: parse_or(
                    get("CATALOG_DB_ACQUIRE_TIMEOUT_SECS"),
                    "CATALOG_DB_ACQUIRE_TIMEOUT_SECS",
                    DEFAULT_ACQUIRE_TIMEOUT_SECS,
                )?,
            }),
            None => None,
        };

        if let Some(db) = &database {
            if db.max_connections == 0 {
                return Err(ConfigError::invalid(
                    "CATALOG_DB_MAX_CONNECTIONS",
                    "must be at least 1",
                ));
            }
        }

        Ok(Self {
            database,
            bind_addr,
            bulk_policy,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::invalid(key, e.to_string())),
        None => Ok(default),
    }
}
