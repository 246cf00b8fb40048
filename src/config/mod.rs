//! Configuration loading and layering
//!
//! Precedence, lowest to highest: built-in defaults, TOML file, environment,
//! command-line flags. The first three are resolved here; the CLI applies its
//! own overrides on top of the returned [`Settings`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::model::{DetectionSettings, DEFAULT_MIN_DURATION, DEFAULT_NOISE_DB};
use crate::error::{FreezecutError, FreezecutResult};
use crate::utils::logging::LogLevel;
use crate::utils::path::DEFAULT_SUFFIX;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "freezecut.toml";

/// Environment variables and the setting each one overrides
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("FREEZECUT_FFMPEG", "ffmpeg_path"),
    ("FREEZECUT_FFPROBE", "ffprobe_path"),
    ("FREEZECUT_NOISE_DB", "noise_db"),
    ("FREEZECUT_MIN_DURATION", "min_duration"),
    ("FREEZECUT_LOG_LEVEL", "log_level"),
];

/// Effective settings for one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ffmpeg executable used for the freeze probe and the concat pass
    pub ffmpeg_path: String,
    /// ffprobe executable used for the duration probe
    pub ffprobe_path: String,
    /// Noise tolerance in dB
    pub noise_db: f64,
    /// Minimum freeze length in seconds
    pub min_duration: f64,
    pub log_level: String,
    /// Appended to the input's stem to name the default output
    pub suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            noise_db: DEFAULT_NOISE_DB,
            min_duration: DEFAULT_MIN_DURATION,
            log_level: "info".to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    freezecut: Settings,
}

impl Settings {
    /// Resolve defaults, then the config file, then the process environment.
    ///
    /// An explicit `path` must exist; without one, [`DEFAULT_CONFIG_FILE`] is
    /// read only when present.
    pub fn load(path: Option<&Path>) -> FreezecutResult<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Read the `[freezecut]` table of a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> FreezecutResult<Self> {
        if !path.exists() {
            return Err(FreezecutError::config(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> FreezecutResult<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| FreezecutError::config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(file.freezecut)
    }

    /// Overlay values from environment variables, looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> FreezecutResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides = 0;
        for &(var, key) in ENV_MAPPINGS {
            let Some(value) = lookup(var) else {
                continue;
            };
            debug!("Environment override: {} = {}", var, value);
            match key {
                "ffmpeg_path" => self.ffmpeg_path = value,
                "ffprobe_path" => self.ffprobe_path = value,
                "noise_db" => self.noise_db = parse_number(var, &value)?,
                "min_duration" => self.min_duration = parse_number(var, &value)?,
                "log_level" => self.log_level = value,
                _ => continue,
            }
            overrides += 1;
        }

        if overrides > 0 {
            debug!("Applied {} environment variable override(s)", overrides);
        }
        Ok(())
    }

    /// Check ranges of the numeric tunables and the log level
    pub fn validate(&self) -> FreezecutResult<()> {
        if !self.noise_db.is_finite() || self.noise_db >= 0.0 {
            return Err(FreezecutError::config(format!(
                "noise_db must be a negative number of dB, got {}",
                self.noise_db
            )));
        }
        if !self.min_duration.is_finite() || self.min_duration <= 0.0 {
            return Err(FreezecutError::config(format!(
                "min_duration must be a positive number of seconds, got {}",
                self.min_duration
            )));
        }
        if self.ffmpeg_path.trim().is_empty() || self.ffprobe_path.trim().is_empty() {
            return Err(FreezecutError::config("tool paths must not be empty"));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> FreezecutResult<LogLevel> {
        LogLevel::parse(&self.log_level)
    }

    pub fn detection(&self) -> DetectionSettings {
        DetectionSettings::new(self.noise_db, self.min_duration)
    }
}

fn parse_number(var: &str, value: &str) -> FreezecutResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| FreezecutError::config(format!("{} must be a number, got {:?}", var, value)))
}
