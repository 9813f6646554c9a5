//! Configuration loading and representation.

use std::path::PathBuf;

use thiserror::Error;

use stockroom_auth::AdminCredentials;

pub const INVENTORY_FILE_VAR: &str = "STOCKROOM_INVENTORY_FILE";
pub const LOG_FILE_VAR: &str = "STOCKROOM_LOG_FILE";
pub const ADMIN_PASSWORD_VAR: &str = "STOCKROOM_ADMIN_PASSWORD";
pub const RECENT_LOG_LIMIT_VAR: &str = "STOCKROOM_RECENT_LOG_LIMIT";

const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockroomConfig {
    pub inventory_path: PathBuf,
    pub log_path: PathBuf,
    pub admin_password: String,
    /// How many log entries a caller shows for undo.
    pub recent_log_limit: usize,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            inventory_path: PathBuf::from("inventory.csv"),
            log_path: PathBuf::from("log.csv"),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            recent_log_limit: 10,
        }
    }
}

impl StockroomConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`; unset variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let inventory_path = lookup(INVENTORY_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.inventory_path);
        let log_path = lookup(LOG_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);

        let admin_password = lookup(ADMIN_PASSWORD_VAR).unwrap_or_else(|| {
            tracing::warn!("{ADMIN_PASSWORD_VAR} not set; using insecure dev default");
            defaults.admin_password
        });

        let recent_log_limit = match lookup(RECENT_LOG_LIMIT_VAR) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: RECENT_LOG_LIMIT_VAR,
                    value,
                })?,
            None => defaults.recent_log_limit,
        };

        Ok(Self {
            inventory_path,
            log_path,
            admin_password,
            recent_log_limit,
        })
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials::new(self.admin_password.clone())
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
        move |var| map.get(var).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = StockroomConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, StockroomConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = StockroomConfig::from_lookup(lookup_from(&[
            (INVENTORY_FILE_VAR, "/data/stock.csv"),
            (LOG_FILE_VAR, "/data/changes.csv"),
            (ADMIN_PASSWORD_VAR, "hunter2"),
            (RECENT_LOG_LIMIT_VAR, " 25 "),
        ]))
        .unwrap();

        assert_eq!(config.inventory_path, PathBuf::from("/data/stock.csv"));
        assert_eq!(config.log_path, PathBuf::from("/data/changes.csv"));
        assert_eq!(config.recent_log_limit, 25);
        assert!(config.admin_credentials().verify("hunter2"));
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        let err = StockroomConfig::from_lookup(lookup_from(&[(RECENT_LOG_LIMIT_VAR, "ten")]))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: RECENT_LOG_LIMIT_VAR,
                value: "ten".to_string(),
            }
        );
    }
}
