//! # Configuration
//!
//! Settings are read from a TOML file; every key is optional and falls back to
//! its default.
//!
//! ```toml
//! [mission]
//! steps = 600
//! step_delay_ms = 100
//! publish_every = 20
//! packing = 0.05
//! takeoff = 0.10
//! landing = 0.95
//!
//! [sync]
//! max_attempts = 2
//! retry_backoff_ms = 50
//!
//! [store]
//! buffer_size = 32
//! ```

use crate::model::{MissionSchedule, ScheduleError};
use crate::order_store::DEFAULT_BUFFER_SIZE;
use crate::sync::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid mission schedule: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mission: MissionSchedule,
    pub sync: RetryPolicy,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Capacity of the order store actor's mailbox.
    pub buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mission.validate()?;
        if self.sync.max_attempts == 0 {
            return Err(ConfigError::Invalid("sync.max_attempts must be at least 1".into()));
        }
        if self.store.buffer_size == 0 {
            return Err(ConfigError::Invalid("store.buffer_size must be at least 1".into()));
        }
        Ok(())
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mission.steps, 600);
        assert_eq!(config.sync.max_attempts, 2);
        assert_eq!(config.store.buffer_size, 32);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: Config = "[mission]\nsteps = 200\n\n[sync]\nmax_attempts = 4\n".parse().unwrap();
        assert_eq!(config.mission.steps, 200);
        assert_eq!(config.mission.publish_every, 20);
        assert_eq!(config.mission.landing, 0.95);
        assert_eq!(config.sync.max_attempts, 4);
        assert_eq!(config.sync.retry_backoff_ms, 50);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_schedule = "[mission]\npacking = 0.5\ntakeoff = 0.2\n".parse::<Config>();
        assert!(matches!(bad_schedule, Err(ConfigError::Schedule(_))));

        let bad_retry = "[sync]\nmax_attempts = 0\n".parse::<Config>();
        assert!(matches!(bad_retry, Err(ConfigError::Invalid(_))));

        let not_toml = "[mission\nsteps = 1".parse::<Config>();
        assert!(matches!(not_toml, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store]\nbuffer_size = 8").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.store.buffer_size, 8);

        let missing = Config::from_file("/definitely/not/here.toml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
