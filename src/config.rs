// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`Config`] loader shared by
//! the API server and the migration utility. Configuration is read once at
//! process start.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory holding the database file | `./data` |
//! | `DATABASE_FILE` | Database file name inside `DATA_DIR` | `whitelist.redb` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `MIGRATION_PAGE_SIZE` | Entries fetched per migration page | `100` |

use std::{
    collections::HashMap,
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the data directory path.
///
/// The database file is created inside this directory on first start.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const DATABASE_FILE_ENV: &str = "DATABASE_FILE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const MIGRATION_PAGE_SIZE_ENV: &str = "MIGRATION_PAGE_SIZE";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_DATABASE_FILE: &str = "whitelist.redb";
pub const DEFAULT_MIGRATION_PAGE_SIZE: usize = 100;

/// Default `RUST_LOG` directive when the variable is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `json` or `pretty`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub database_file: String,
    pub log_format: LogFormat,
    pub migration_page_size: usize,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an explicit variable map (used by tests).
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or(&lookup, HOST_ENV, DEFAULT_HOST.parse().ok())?;
        let port = parse_or(&lookup, PORT_ENV, Some(DEFAULT_PORT))?;
        let log_format = parse_or(&lookup, LOG_FORMAT_ENV, Some(LogFormat::default()))?;
        let migration_page_size = parse_or(
            &lookup,
            MIGRATION_PAGE_SIZE_ENV,
            Some(DEFAULT_MIGRATION_PAGE_SIZE),
        )?;
        if migration_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: MIGRATION_PAGE_SIZE_ENV,
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let database_file = lookup(DATABASE_FILE_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_FILE.to_string());

        Ok(Self {
            host,
            port,
            data_dir: PathBuf::from(data_dir),
            database_file,
            log_format,
            migration_page_size,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Full path of the redb database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => default.ok_or_else(|| ConfigError::Invalid {
            key,
            value: String::new(),
            reason: "no default available".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_map(&HashMap::new()).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database_path(), PathBuf::from("./data/whitelist.redb"));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.migration_page_size, DEFAULT_MIGRATION_PAGE_SIZE);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_map(&vars(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3001"),
            ("DATA_DIR", "/var/lib/bao"),
            ("DATABASE_FILE", "signups.redb"),
            ("LOG_FORMAT", "JSON"),
            ("MIGRATION_PAGE_SIZE", "25"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(config.database_path(), PathBuf::from("/var/lib/bao/signups.redb"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.migration_page_size, 25);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_map(&vars(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: PORT_ENV, .. }));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = Config::from_map(&vars(&[("MIGRATION_PAGE_SIZE", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: MIGRATION_PAGE_SIZE_ENV,
                ..
            }
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(" pretty ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
    }
}
