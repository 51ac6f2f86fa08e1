//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database, logging and reminder cadence settings from env vars.
//! - Keep defaults usable without any environment configured.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - `reminder_interval` is always at least one second.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "MEDREMIND_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "MEDREMIND_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MEDREMIND_LOG_DIR";
pub const ENV_REMINDER_INTERVAL_SECS: &str = "MEDREMIND_REMINDER_INTERVAL_SECS";

const DEFAULT_DB_FILE_NAME: &str = "medremind.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "medremind-logs";
const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for {key}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    /// Interval between reminder matcher ticks.
    pub reminder_interval: Duration,
}

impl CoreConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = read(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));

        let reminder_interval = match read(ENV_REMINDER_INTERVAL_SECS) {
            None => Duration::from_secs(DEFAULT_REMINDER_INTERVAL_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_REMINDER_INTERVAL_SECS,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
            reminder_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_DB_PATH, ENV_REMINDER_INTERVAL_SECS};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CoreConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.reminder_interval, Duration::from_secs(60));
        assert!(config.db_path.ends_with("medremind.sqlite3"));
        assert!(config.log_dir.ends_with("medremind-logs"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "   ")])).unwrap();
        assert!(config.db_path.ends_with("medremind.sqlite3"));
    }

    #[test]
    fn explicit_values_are_used() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "/data/meds.db"),
            (ENV_REMINDER_INTERVAL_SECS, " 15 "),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/meds.db"));
        assert_eq!(config.reminder_interval, Duration::from_secs(15));
    }

    #[test]
    fn zero_or_garbage_interval_is_rejected() {
        for raw in ["0", "soon"] {
            let err =
                CoreConfig::from_lookup(lookup_from(&[(ENV_REMINDER_INTERVAL_SECS, raw)]))
                    .unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidValue {
                    key: ENV_REMINDER_INTERVAL_SECS,
                    value: raw.to_string(),
                }
            );
        }
    }
}
