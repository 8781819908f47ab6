use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::remind;
use crate::status::DEFAULT_EXPIRING_SOON_DAYS;

/// User configuration, loaded from `~/.config/cover/config.toml`.
///
/// Every field is defaulted, so a missing file and an empty file behave the
/// same as no config at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database path override; defaults to the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_soon_days")]
    pub expiring_soon_days: i64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: default_soon_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Days-remaining values that fire a reminder.
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<i64>,
    /// Local wall-clock time (`HH:MM`) of the daily check.
    #[serde(default = "default_daily_at")]
    pub daily_at: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            thresholds: default_thresholds(),
            daily_at: default_daily_at(),
        }
    }
}

const fn default_soon_days() -> i64 {
    DEFAULT_EXPIRING_SOON_DAYS
}

fn default_thresholds() -> Vec<i64> {
    remind::DEFAULT_THRESHOLDS.to_vec()
}

fn default_daily_at() -> String {
    "09:00".to_string()
}

impl Config {
    /// Load from the default user config path; absent file means defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; absent file means defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
    }

    /// Effective database path: explicit flag > config override > platform
    /// data dir > current directory.
    #[must_use]
    pub fn db_path(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        if let Some(path) = &self.store.path {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cover")
            .join("cover.sqlite3")
    }

    /// Parse the configured daily check time.
    ///
    /// # Errors
    ///
    /// Returns an error when `daily_at` is not a valid `HH:MM` time.
    pub fn daily_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.reminders.daily_at, "%H:%M")
            .with_context(|| format!("invalid reminders.daily_at '{}'", self.reminders.daily_at))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cover").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::Config;
    use chrono::NaiveTime;
    use std::path::Path;

    #[test]
    fn defaults_are_stable() {
        let config = Config::default();
        assert_eq!(config.list.expiring_soon_days, 30);
        assert_eq!(config.reminders.thresholds, [30, 14, 7, 1]);
        assert_eq!(config.reminders.daily_at, "09:00");
        assert!(config.store.path.is_none());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/cover-config.toml")).unwrap();
        assert_eq!(config.reminders.daily_at, "09:00");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[reminders]\ndaily_at = \"20:30\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.reminders.daily_at, "20:30");
        assert_eq!(config.reminders.thresholds, [30, 14, 7, 1]);
        assert_eq!(config.list.expiring_soon_days, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not toml [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn daily_time_parses_and_rejects() {
        let mut config = Config::default();
        assert_eq!(
            config.daily_time().unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );

        config.reminders.daily_at = "9 o'clock".into();
        assert!(config.daily_time().is_err());
    }

    #[test]
    fn db_path_precedence() {
        let mut config = Config::default();
        let flag = Path::new("/tmp/flag.sqlite3");
        assert_eq!(config.db_path(Some(flag)), flag);

        config.store.path = Some("/tmp/configured.sqlite3".into());
        assert_eq!(
            config.db_path(None),
            Path::new("/tmp/configured.sqlite3")
        );
        assert_eq!(config.db_path(Some(flag)), flag, "flag wins over config");
    }
}
