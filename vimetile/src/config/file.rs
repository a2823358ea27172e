//! INI configuration file.
//!
//! # Format
//!
//! ```ini
//! [http]
//! timeout = 30
//! user_agent = vimetile/0.1.0
//! mirrors = https://mirror-a.example.org, https://mirror-b.example.org
//!
//! [cache]
//! max_stacks = 64
//!
//! [logging]
//! level = info
//! directory = /var/log/vimetile
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::dataset::{RegistryOptions, DEFAULT_MAX_STACKS};
use crate::transport::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Errors raised while loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// `[http]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout: u64,
    pub user_agent: String,
    /// Extra base URLs tried for every stack.
    pub mirrors: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            mirrors: Vec::new(),
        }
    }
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum number of stacks whose metadata is memoized.
    pub max_stacks: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_stacks: DEFAULT_MAX_STACKS,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Directory for rolling log files; console only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub http: HttpSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

/// Default location of the configuration file: `~/.vimetile/config.ini`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vimetile").join("config.ini"))
}

impl ConfigFile {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    /// Registry options derived from the `[http]` and `[cache]` sections.
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            max_stacks: self.cache.max_stacks,
            mirrors: self.http.mirrors.clone(),
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.http.timeout = secs;
        self
    }

    /// Overrides the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(http) = ini.section(Some("http")) {
            if let Some(v) = http.get("timeout") {
                config.http.timeout = parse_value("http.timeout", v)?;
            }
            if let Some(v) = http.get("user_agent") {
                config.http.user_agent = v.trim().to_string();
            }
            if let Some(v) = http.get("mirrors") {
                config.http.mirrors = v
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_owned)
                    .collect();
            }
        }

        if let Some(cache) = ini.section(Some("cache")) {
            if let Some(v) = cache.get("max_stacks") {
                config.cache.max_stacks = parse_value("cache.max_stacks", v)?;
            }
        }

        if let Some(logging) = ini.section(Some("logging")) {
            if let Some(v) = logging.get("level") {
                config.logging.level = v.trim().to_string();
            }
            if let Some(v) = logging.get("directory") {
                let v = v.trim();
                config.logging.directory = (!v.is_empty()).then(|| PathBuf::from(v));
            }
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("http"))
            .set("timeout", self.http.timeout.to_string())
            .set("user_agent", self.http.user_agent.as_str())
            .set("mirrors", self.http.mirrors.join(", "));
        ini.with_section(Some("cache"))
            .set("max_stacks", self.cache.max_stacks.to_string());

        let mut logging = ini.with_section(Some("logging"));
        logging.set("level", self.logging.level.as_str());
        if let Some(ref dir) = self.logging.directory {
            logging.set("directory", dir.to_string_lossy().as_ref());
        }
        ini
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
