//! Configuration errors.

use tabrelay_protocols::TabRole;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {role} tab name")]
    MissingTabName { role: TabRole },

    #[error("No valid field mappings found after SOURCE -> DESTINATION")]
    NoCorrespondences,

    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Whether this error came from the mapping text rather than the settings file.
    pub fn is_mapping_error(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingTabName { .. } | ConfigError::NoCorrespondences
        )
    }
}
