use std::path::Path;

use serde::{Deserialize, Serialize};

use super::pace::PaceRounding;

/// Configuration for the run log.
///
/// This struct holds settings that control how runs are derived and shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The number of runs shown by the "recent" view.
    recent_count: usize,

    /// Whether a pace whose seconds round up to 60 carries into the minute.
    ///
    /// When `false` (default) a pace such as `7:60` is shown as-is.
    pub carry_pace_seconds: bool,

    /// Label for the distance unit used in table headers (e.g. "mi", "km").
    distance_unit: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_count: default_recent_count(),
            carry_pace_seconds: false,
            distance_unit: default_distance_unit(),
        }
    }
}

/// Errors that can occur while loading or saving a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid TOML for this configuration.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration if the file exists, otherwise returns the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the number of runs in the "recent" view.
    #[must_use]
    pub const fn recent_count(&self) -> usize {
        self.recent_count
    }

    /// Sets the number of runs in the "recent" view.
    pub const fn set_recent_count(&mut self, count: usize) {
        self.recent_count = count;
    }

    /// Returns the distance unit label.
    #[must_use]
    pub fn distance_unit(&self) -> &str {
        &self.distance_unit
    }

    /// How paces should be rounded.
    #[must_use]
    pub const fn pace_rounding(&self) -> PaceRounding {
        if self.carry_pace_seconds {
            PaceRounding::Carry
        } else {
            PaceRounding::Uncarried
        }
    }
}

const fn default_recent_count() -> usize {
    10
}

fn default_distance_unit() -> String {
    "mi".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_recent_count")]
        recent_count: usize,

        #[serde(default)]
        carry_pace_seconds: bool,

        #[serde(default = "default_distance_unit")]
        distance_unit: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                recent_count,
                carry_pace_seconds,
                distance_unit,
            } => Self {
                recent_count,
                carry_pace_seconds,
                distance_unit,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            recent_count: config.recent_count,
            carry_pace_seconds: config.carry_pace_seconds,
            distance_unit: config.distance_unit,
        }
    }
}
