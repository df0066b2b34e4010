//! Start-up configuration read from environment variables.
//!
//! - `MOOD_JOURNAL_DIR`: directory holding the entry store, credentials and
//!   log file (defaults to the current directory)
//! - `MOOD_JOURNAL_REMINDER_SECS`: seconds between reminders (defaults to 24h)
//! - `RUST_LOG`: log filter, handled by the logging module

use crate::error::{JournalError, JournalResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DIR: &str = "MOOD_JOURNAL_DIR";
pub const ENV_REMINDER_SECS: &str = "MOOD_JOURNAL_REMINDER_SECS";

pub const DATA_FILE: &str = "mood_data.json";
pub const CREDENTIALS_FILE: &str = "credentials.json";
pub const LOG_FILE: &str = "mood_journal.log";
pub const DEFAULT_REMINDER_SECS: u64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub reminder_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("."),
            reminder_interval: Duration::from_secs(DEFAULT_REMINDER_SECS),
        }
    }
}

impl Config {
    pub fn load() -> JournalResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> JournalResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(ENV_DIR) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = get(ENV_REMINDER_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                JournalError::Config(format!("{ENV_REMINDER_SECS} must be a number of seconds, got '{raw}'"))
            })?;
            if secs == 0 {
                return Err(JournalError::Config(format!(
                    "{ENV_REMINDER_SECS} must be greater than zero"
                )));
            }
            config.reminder_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn entries_path(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(CREDENTIALS_FILE)
    }
}
