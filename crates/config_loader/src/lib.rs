//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Generate `SenderConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("sender.toml")).unwrap();
//! println!("Input: {}", config.input.path.display());
//! ```

mod error;
mod parser;
mod validator;

pub use contracts::SenderConfig;
pub use error::ConfigError;
pub use parser::ConfigFormat;

use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<SenderConfig, ConfigError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load from `path` when given, otherwise validated defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<SenderConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let config = SenderConfig::default();
                validator::validate(&config)?;
                Ok(config)
            }
        }
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<SenderConfig, ConfigError> {
        Self::parse_and_validate(content, format)
    }

    /// Check an already-built configuration (e.g. after CLI overrides)
    pub fn validate(config: &SenderConfig) -> Result<(), ConfigError> {
        validator::validate(config)
    }

    /// Serialize SenderConfig to TOML string
    pub fn to_toml(config: &SenderConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config)
            .map_err(|e| ConfigError::parse(format!("TOML serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::parse("cannot determine file format from extension"))?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::parse(format!("unsupported config format: .{ext}")))
    }

    fn read_file(path: &Path) -> Result<String, ConfigError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn parse_and_validate(content: &str, format: ConfigFormat) -> Result<SenderConfig, ConfigError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }
}
