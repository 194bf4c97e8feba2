//! Store selection read from the environment.

use thiserror::Error;

/// Which repositories to wire and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `USE_PERSISTENT_STORES`: Postgres when true, in-memory otherwise.
    pub persistent: bool,
    /// `DATABASE_URL`: required when `persistent` is set.
    pub database_url: Option<String>,
    /// `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persistent: false,
            database_url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must be set when USE_PERSISTENT_STORES=true")]
    Missing(&'static str),
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a closure over a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let persistent = match lookup("USE_PERSISTENT_STORES") {
            Some(raw) => raw.trim().parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                key: "USE_PERSISTENT_STORES",
                value: raw,
            })?,
            None => defaults.persistent,
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                    });
                }
            },
            None => defaults.max_connections,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if persistent && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Self {
            persistent,
            database_url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_in_memory() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn persistent_requires_database_url() {
        let err = StoreConfig::from_lookup(lookup(&[("USE_PERSISTENT_STORES", "true")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn reads_persistent_settings() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://localhost/orderdesk"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();

        assert!(config.persistent);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/orderdesk"));
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn rejects_garbage_flags() {
        let err = StoreConfig::from_lookup(lookup(&[("USE_PERSISTENT_STORES", "yes please")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "USE_PERSISTENT_STORES", .. }));

        let err = StoreConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DATABASE_MAX_CONNECTIONS", .. }));
    }
}
