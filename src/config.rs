use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::SingletonPolicy;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub roster: RosterSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub pairing: PairingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterSettings {
    #[serde(default = "default_roster_path")]
    pub path: String,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            path: default_roster_path(),
        }
    }
}

fn default_roster_path() -> String {
    "roster.txt".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistorySettings {
    #[serde(default = "default_history_path")]
    pub path: String,
    /// Rounds older than this many days no longer constrain the matching
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            lookback_days: default_lookback_days(),
        }
    }
}

fn default_history_path() -> String {
    "history.jsonl".to_string()
}

fn default_lookback_days() -> u32 {
    30
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairingSettings {
    #[serde(default)]
    pub singleton_policy: SingletonPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with COFFEE__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with COFFEE__)
            // e.g., COFFEE__HISTORY__LOOKBACK_DAYS -> history.lookback_days
            .add_source(
                Environment::with_prefix("COFFEE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply un-prefixed convenience overrides for the two file paths
        settings = apply_path_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("COFFEE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply plain ROSTER_PATH / HISTORY_PATH environment overrides
///
/// Deployments that mount the two files somewhere non-standard can point at
/// them without learning the COFFEE_ prefix scheme.
fn apply_path_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let roster_path = env::var("ROSTER_PATH").ok();
    let history_path = env::var("HISTORY_PATH").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(path) = roster_path {
        builder = builder.set_override("roster.path", path)?;
    }
    if let Some(path) = history_path {
        builder = builder.set_override("history.path", path)?;
    }

    builder.build()
}
