//! Configuration file handling
//!
//! Settings are read from a TOML file. Every key is optional; unknown keys
//! are ignored.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use actiontail_logs::EventFilter;

/// Config file read when `--config` isn't given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const DEFAULT_LOG_DIR: &str = "~/.runelite/action-logger";
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the Action Logger plugin writes to
    pub action_logger_log_dir: String,

    /// Directory holding the generated gameval lookup tables
    pub gameval_data_dir: PathBuf,

    pub tail: TailConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            action_logger_log_dir: DEFAULT_LOG_DIR.to_string(),
            gameval_data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tail: TailConfig::default(),
        }
    }
}

/// The `[tail]` table
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TailConfig {
    pub show_inventory_changes: bool,
    pub show_dialogue_events: bool,
    pub show_animation_changes: bool,
    pub filtered_varbits: HashSet<i64>,
    pub filtered_varps: HashSet<i64>,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            show_inventory_changes: true,
            show_dialogue_events: true,
            show_animation_changes: true,
            filtered_varbits: HashSet::new(),
            filtered_varps: HashSet::new(),
        }
    }
}

impl Config {
    /// Load config from `path`
    ///
    /// A missing file falls back to defaults unless `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read config {}", path.display()));
            }
        };
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Log directory with a leading `~` expanded
    pub fn log_dir(&self) -> PathBuf {
        expand_home(&self.action_logger_log_dir)
    }

    /// Build the event filter described by the `[tail]` table
    pub fn event_filter(&self) -> EventFilter {
        EventFilter::new()
            .with_filtered_varbits(self.tail.filtered_varbits.iter().copied())
            .with_filtered_varps(self.tail.filtered_varps.iter().copied())
            .show_inventory_changes(self.tail.show_inventory_changes)
            .show_dialogue_events(self.tail.show_dialogue_events)
            .show_animation_changes(self.tail.show_animation_changes)
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actiontail_logs::{LogEvent, LogParser};

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.tail.show_inventory_changes);
        assert!(config.tail.show_dialogue_events);
        assert!(config.tail.show_animation_changes);
        assert!(config.tail.filtered_varbits.is_empty());
        assert_eq!(config.gameval_data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
            action_logger_log_dir = "/tmp/action-logger"
            gameval_data_dir = "/opt/gamevals"
            runelite_dir = "~/git/runelite"

            [tail]
            show_inventory_changes = false
            show_animation_changes = false
            filtered_varbits = [42, 43, 42]
            filtered_varps = [281]
            "#,
        )
        .unwrap();

        assert_eq!(config.log_dir(), PathBuf::from("/tmp/action-logger"));
        assert_eq!(config.gameval_data_dir, PathBuf::from("/opt/gamevals"));
        assert!(!config.tail.show_inventory_changes);
        assert!(config.tail.show_dialogue_events);
        assert!(!config.tail.show_animation_changes);
        assert_eq!(config.tail.filtered_varbits, HashSet::from([42, 43]));
        assert_eq!(config.tail.filtered_varps, HashSet::from([281]));
    }

    #[test]
    fn test_event_filter_from_config() {
        let config = Config::parse("[tail]\nfiltered_varbits = [42]\n").unwrap();
        let filter = config.event_filter();
        let event = LogParser::parse(
            r#"{"type":"VARBIT_CHANGED","tick":5,"ts":"T","data":{"id":42,"oldValue":0,"newValue":1}}"#,
        )
        .unwrap();
        assert!(matches!(event, LogEvent::VarChange(_)));
        assert!(!filter.allows(&event));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::parse("[tail\nshow_dialogue_events = 1").is_err());
        assert!(Config::parse("[tail]\nshow_dialogue_events = \"yes\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(Config::load(&path, false).unwrap(), Config::default());
        assert!(Config::load(&path, true).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[tail]\nshow_dialogue_events = false\n").unwrap();

        let config = Config::load(&path, true).unwrap();
        assert!(!config.tail.show_dialogue_events);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("relative"), PathBuf::from("relative"));
        assert_eq!(expand_home("~user/x"), PathBuf::from("~user/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/.runelite"), home.join(".runelite"));
        }
    }
}
