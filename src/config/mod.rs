//! Runtime configuration loaded from the environment.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when
//!   `STORAGE_MODE=postgres`)
//! - `DATABASE_POOL_SIZE`: connection pool size (default 10)
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: bind port (default 8080)
//! - `AUTH_TOKENS`: comma-separated `token=user-uuid` pairs, each optionally
//!   suffixed with `:display name`
//! - `LOG_FORMAT`: `text` (default) | `json`

use crate::identity::{StaticTokenResolver, UserId};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Default connection pool size.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `STORAGE_MODE` is not recognised.
    #[error("invalid STORAGE_MODE: {0} (expected in_memory or postgres)")]
    InvalidStorageMode(String),

    /// `LOG_FORMAT` is not recognised.
    #[error("invalid LOG_FORMAT: {0} (expected text or json)")]
    InvalidLogFormat(String),

    /// `DATABASE_URL` is missing while `STORAGE_MODE=postgres`.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A numeric or address variable could not be parsed.
    #[error("invalid {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// An `AUTH_TOKENS` entry is malformed.
    #[error("invalid AUTH_TOKENS entry: {0} (expected token=user-uuid[:name])")]
    InvalidAuthToken(String),
}

/// Storage back end selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage; contents are lost on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` storage.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::InvalidLogFormat(value.to_owned())),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Storage back end.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Connection pool size.
    pub pool_size: u32,
    /// Socket address to bind.
    pub bind_addr: SocketAddr,
    /// Bearer token table.
    pub auth_tokens: Vec<(String, UserId)>,
    /// Display names given in `AUTH_TOKENS`.
    pub user_names: Vec<(UserId, String)>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            auth_tokens: Vec::new(),
            user_names: Vec::new(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable holds an invalid value
    /// or `DATABASE_URL` is missing for `PostgreSQL` storage.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// Empty and whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable holds an invalid value
    /// or `DATABASE_URL` is missing for `PostgreSQL` storage.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();
        let log_format = read("LOG_FORMAT")
            .map(|value| value.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();
        let pool_size: u32 = parse_or(
            "DATABASE_POOL_SIZE",
            read("DATABASE_POOL_SIZE"),
            defaults.pool_size,
        )?;
        if pool_size == 0 {
            return Err(ConfigurationError::InvalidValue {
                name: "DATABASE_POOL_SIZE",
                value: "0".to_owned(),
            });
        }
        let host: IpAddr = parse_or("HOST", read("HOST"), defaults.bind_addr.ip())?;
        let port: u16 = parse_or("PORT", read("PORT"), defaults.bind_addr.port())?;
        let entries = read("AUTH_TOKENS")
            .map(|value| parse_auth_tokens(&value))
            .transpose()?
            .unwrap_or_default();
        let user_names = entries
            .iter()
            .filter_map(|entry| entry.name.clone().map(|name| (entry.user, name)))
            .collect();
        let auth_tokens = entries
            .into_iter()
            .map(|entry| (entry.token, entry.user))
            .collect();

        let config = Self {
            storage_mode,
            database_url: read("DATABASE_URL"),
            pool_size,
            bind_addr: SocketAddr::new(host, port),
            auth_tokens,
            user_names,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingDatabaseUrl`] when `PostgreSQL`
    /// storage is selected without a URL.
    pub const fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }

    /// Builds the bearer-token resolver for the configured token table.
    #[must_use]
    pub fn token_resolver(&self) -> StaticTokenResolver {
        StaticTokenResolver::new(self.auth_tokens.iter().cloned())
    }

    /// Returns every configured user with the name shown next to their
    /// tasks, comments, and change-log entries.
    ///
    /// Users without a configured name get [`UserId::default_name`]. When a
    /// user is named more than once the first name wins.
    #[must_use]
    pub fn known_users(&self) -> Vec<(UserId, String)> {
        self.token_resolver()
            .users()
            .into_iter()
            .map(|user| {
                let name = self
                    .user_names
                    .iter()
                    .find(|(named, _)| *named == user)
                    .map_or_else(|| user.default_name(), |(_, name)| name.clone());
                (user, name)
            })
            .collect()
    }
}

/// One parsed `AUTH_TOKENS` entry.
struct TokenEntry {
    token: String,
    user: UserId,
    name: Option<String>,
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigurationError> {
    value.map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|_| ConfigurationError::InvalidValue { name, value: raw })
    })
}

/// Parses `token=uuid[:name]` entries separated by commas.
fn parse_auth_tokens(value: &str) -> Result<Vec<TokenEntry>, ConfigurationError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (token, user) = entry
                .split_once('=')
                .ok_or_else(|| ConfigurationError::InvalidAuthToken(entry.to_owned()))?;
            let (user_text, name) = user
                .split_once(':')
                .map_or((user, None), |(id, name)| (id, Some(name.trim())));
            let user_id = Uuid::parse_str(user_text.trim())
                .map_err(|_| ConfigurationError::InvalidAuthToken(entry.to_owned()))?;
            let token_text = token.trim();
            if token_text.is_empty() || name.is_some_and(str::is_empty) {
                return Err(ConfigurationError::InvalidAuthToken(entry.to_owned()));
            }
            Ok(TokenEntry {
                token: token_text.to_owned(),
                user: UserId::from_uuid(user_id),
                name: name.map(str::to_owned),
            })
        })
        .collect()
}
