//! TOML configuration loading
//!
//! Handles discovery and parsing of `janitor.toml`, environment overrides and
//! installation of the global verbosity. Presentation settings reach a janitor
//! through [`JanitorBuilder::config`](crate::janitor::api::JanitorBuilder::config).

use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::init_logging;
use crate::diagnostics::{set_verbosity, Verbosity, DEFAULT_INDENT_MARKER};
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured verbosity
pub const VERBOSITY_ENV: &str = "JANITOR_VERBOSITY";

pub const DEFAULT_REGISTRY_GLYPH: &str = "🧹";
pub const DEFAULT_ADHOC_GLYPH: &str = "🗑";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error reading configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::InvalidValue { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// `[logging]` table: backend settings for [`init_logging`]
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<PathBuf>,
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file: None,
            color: true,
        }
    }
}

impl LoggingConfig {
    /// Start the `flexi_logger` backend with these settings
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        let file = self.file.as_deref().and_then(Path::to_str);
        init_logging(Some(&self.level), Some(&self.format), file, self.color)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JanitorConfig {
    pub verbosity: Verbosity,
    pub indent_marker: String,
    pub registry_glyph: String,
    pub adhoc_glyph: String,
    /// Node kinds recognised as scene objects on top of the built-in set
    pub scene_node_kinds: Vec<String>,
    pub logging: LoggingConfig,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            indent_marker: DEFAULT_INDENT_MARKER.to_string(),
            registry_glyph: DEFAULT_REGISTRY_GLYPH.to_string(),
            adhoc_glyph: DEFAULT_ADHOC_GLYPH.to_string(),
            scene_node_kinds: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl JanitorConfig {
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Default config location: `<config dir>/Janitor/janitor.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Janitor").join("janitor.toml"))
    }

    /// Load the default config file if one exists, otherwise defaults
    pub fn discover() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Like [`discover`](Self::discover), but a broken file is logged and
    /// replaced by defaults
    pub fn discover_or_default() -> Self {
        Self::discover().unwrap_or_else(|e| {
            log_error_with_context(&e, "Loading janitor configuration");
            Self::default()
        })
    }

    /// Apply `JANITOR_VERBOSITY` and `NO_COLOR`
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        if let Ok(value) = std::env::var(VERBOSITY_ENV) {
            self.verbosity = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: VERBOSITY_ENV.to_string(),
                message: format!(
                    "'{}' is not one of none, info, verbose, debug",
                    value
                ),
            })?;
        }
        if std::env::var_os("NO_COLOR").is_some() {
            self.logging.color = false;
        }
        Ok(())
    }

    /// Install the configured verbosity as the process-wide gate
    pub fn install(&self) {
        set_verbosity(self.verbosity);
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.indent_marker.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "indent_marker".to_string(),
                message: "indent_marker must not be empty".to_string(),
            });
        }
        if let Some(kind) = self.scene_node_kinds.iter().find(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "scene_node_kinds".to_string(),
                message: format!("scene node kind '{}' is blank", kind),
            });
        }
        Ok(())
    }
}
