//! Explorer configuration
//!
//! Settings are read from a TOML file:
//!
//! ```toml
//! [repl]
//! prompt = "stack> "
//! history_file = "/home/me/.opcode_explorer_history"
//! max_history_entries = 500
//!
//! [simulation]
//! halt_on_error = true
//! max_undo_depth = 256
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos surface early.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, Level};

use crate::backend::simulation::SimulationOptions;

const APP_DIR: &str = "opcode-explorer";
const CONFIG_FILE: &str = "config.toml";
const HISTORY_FILE: &str = "history.txt";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub repl: ReplSettings,
    pub simulation: SimulationOptions,
    pub logging: LoggingSettings,
}

/// The `[repl]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplSettings {
    pub prompt: String,
    /// Where line history is persisted; falls back to the user data dir
    pub history_file: Option<PathBuf>,
    pub max_history_entries: usize,
}

impl Default for ReplSettings {
    fn default() -> Self {
        Self {
            prompt: "stack> ".to_string(),
            history_file: None,
            max_history_entries: 500,
        }
    }
}

impl ReplSettings {
    /// Resolved history file, if any location is available
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join(HISTORY_FILE)))
    }
}

/// The `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingSettings {
    pub fn max_level(&self) -> Result<Level, ConfigError> {
        self.level
            .parse()
            .map_err(|_| ConfigError::InvalidLevel(self.level.clone()))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: Option<PathBuf>, source: toml::de::Error },
    InvalidLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to read config '{}': {}", path.display(), source)
            }
            Self::Parse { path: Some(path), source } => {
                write!(f, "Invalid config '{}': {}", path.display(), source)
            }
            Self::Parse { path: None, source } => write!(f, "Invalid config: {}", source),
            Self::InvalidLevel(level) => write!(f, "Unknown log level: {}", level),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidLevel(_) => None,
        }
    }
}

impl Config {
    /// Parse TOML content and validate it
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })?;
        config.logging.max_level()?;
        Ok(config)
    }

    /// Load from an explicit path; the file must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "opcode_explorer::config", path = %path.display(), "loaded config");
        Self::parse_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// `<config_dir>/opcode-explorer/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the default file, or defaults when it does not exist
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
