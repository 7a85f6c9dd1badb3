use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{Variant, MIN_DIMENSION};

/// Largest grid dimension the terminal board will draw.
pub const MAX_DIMENSION: usize = 64;

/// Settings for a play session: starting variant, grid size, roster and
/// log output.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub variant: Variant,
    pub grid: GridConfig,
    pub roster: RosterConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: 6,
            columns: 7,
        }
    }
}

/// Players available in the lobby when the program starts.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub players: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            players: ["Barcelona", "Bayern", "Chelsea", "Madrid"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file; the terminal is owned by the UI.
    pub file: PathBuf,
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::from("super_connect_four.log"),
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Check grid bounds, the roster and the log filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("grid.rows", self.grid.rows), ("grid.columns", self.grid.columns)] {
            if value < MIN_DIMENSION {
                return Err(ConfigError::Validation(format!(
                    "{name} must be >= {MIN_DIMENSION}"
                )));
            }
            if value > MAX_DIMENSION {
                return Err(ConfigError::Validation(format!(
                    "{name} must be <= {MAX_DIMENSION}"
                )));
            }
        }

        if self.roster.players.len() < 2 {
            return Err(ConfigError::Validation(
                "roster.players must name at least two players".into(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &self.roster.players {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "roster.players must not contain empty names".into(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "roster.players contains '{name}' twice"
                )));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// The default configuration rendered as TOML.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
